//! Weighted positive/negative masses used to grade pivots.
use crate::{HypothesisData, TrainingIndex, WeightedSampleMatrix};
use crate::common::utils;


/// Positive and negative mass of one category row,
/// split by presence of one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub(crate) pos_total: f64,
    pub(crate) neg_total: f64,
    pub(crate) pos_with: f64,
    pub(crate) neg_with: f64,
}


impl Split {
    /// The masses of the documents lacking the feature.
    /// Clamped at zero against cancellation.
    #[inline]
    fn without(&self) -> (f64, f64) {
        (
            (self.pos_total - self.pos_with).max(0f64),
            (self.neg_total - self.neg_with).max(0f64),
        )
    }


    /// Normalization factor `Z` after splitting on the feature.
    #[inline]
    pub(crate) fn z(&self) -> f64 {
        let (pos_without, neg_without) = self.without();
        utils::block_z(pos_without, neg_without)
            + utils::block_z(self.pos_with, self.neg_with)
    }


    /// Normalization factor `Z` of the constant stump.
    #[inline]
    pub(crate) fn baseline_z(&self) -> f64 {
        utils::block_z(self.pos_total, self.neg_total)
    }


    /// Stump testing `pivot` with smoothed confidences.
    pub(crate) fn stump(&self, pivot: usize, eps: f64) -> HypothesisData {
        let (pos_without, neg_without) = self.without();
        HypothesisData::new(
            pivot,
            utils::confidence(pos_without, neg_without, eps),
            utils::confidence(self.pos_with, self.neg_with, eps),
        )
    }


    /// Constant stump over the whole row.
    pub(crate) fn constant(&self, eps: f64) -> HypothesisData {
        HypothesisData::constant(
            utils::confidence(self.pos_total, self.neg_total, eps)
        )
    }
}


/// Masses of one category row for every feature.
#[derive(Debug, Clone)]
pub(crate) struct CategoryStatistics {
    pos_total: f64,
    neg_total: f64,
    pos_with: Vec<f64>,
    neg_with: Vec<f64>,
}


impl CategoryStatistics {
    /// Scan every posting list once.
    pub(crate) fn collect(
        index: &TrainingIndex,
        matrix: &WeightedSampleMatrix,
        category: usize,
    ) -> Self
    {
        let row = matrix.row(category);
        let labels = index.labels(category);
        let (pos_total, neg_total) = row_masses(row, |d| labels.contains(d));

        let n_features = index.n_features();
        let mut pos_with = vec![0f64; n_features];
        let mut neg_with = vec![0f64; n_features];
        for f in 0..n_features {
            for &d in index.postings(f) {
                if labels.contains(d) {
                    pos_with[f] += row[d];
                } else {
                    neg_with[f] += row[d];
                }
            }
        }

        Self { pos_total, neg_total, pos_with, neg_with }
    }


    /// The split on `feature`.
    #[inline]
    pub(crate) fn split(&self, feature: usize) -> Split {
        Split {
            pos_total: self.pos_total,
            neg_total: self.neg_total,
            pos_with: self.pos_with[feature],
            neg_with: self.neg_with[feature],
        }
    }


    /// The split on no feature.
    #[inline]
    pub(crate) fn baseline(&self) -> Split {
        Split {
            pos_total: self.pos_total,
            neg_total: self.neg_total,
            pos_with: 0f64,
            neg_with: 0f64,
        }
    }


    /// `Z` of every feature, in feature order.
    pub(crate) fn z_values(&self) -> Vec<f64> {
        (0..self.pos_with.len())
            .map(|f| self.split(f).z())
            .collect()
    }
}


/// The split of one category row on `feature` alone.
pub(crate) fn split_on(
    index: &TrainingIndex,
    matrix: &WeightedSampleMatrix,
    category: usize,
    feature: usize,
) -> Split
{
    let row = matrix.row(category);
    let labels = index.labels(category);
    let (pos_total, neg_total) = row_masses(row, |d| labels.contains(d));
    let (pos_with, neg_with) = index.postings(feature)
        .iter()
        .fold((0f64, 0f64), |(p, n), &d| {
            if labels.contains(d) { (p + row[d], n) } else { (p, n + row[d]) }
        });
    Split { pos_total, neg_total, pos_with, neg_with }
}


fn row_masses<F>(row: &[f64], is_positive: F) -> (f64, f64)
    where F: Fn(usize) -> bool,
{
    row.iter()
        .enumerate()
        .fold((0f64, 0f64), |(p, n), (d, &w)| {
            if is_positive(d) { (p + w, n) } else { (p, n + w) }
        })
}


/// Default smoothing `1 / (n_documents * n_categories)`.
#[inline]
pub(crate) fn default_epsilon(index: &TrainingIndex) -> f64 {
    1f64 / (index.n_documents() * index.n_categories()).max(1) as f64
}


/// Index of the smallest value strictly below `baseline`.
/// Ties go to the smallest index.
pub(crate) fn best_below(values: &[f64], baseline: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (f, &z) in values.iter().enumerate() {
        let improves = match best {
            Some((_, b)) => z < b,
            None => z < baseline,
        };
        if improves { best = Some((f, z)); }
    }
    best.map(|(f, _)| f)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_split_has_zero_z() {
        let split = Split {
            pos_total: 0.5,
            neg_total: 0.5,
            pos_with: 0.5,
            neg_with: 0f64,
        };
        assert_eq!(split.z(), 0f64);
        assert!((split.baseline_z() - 1f64).abs() < 1e-12);

        let stump = split.stump(4, 1e-3);
        assert_eq!(stump.pivot, Some(4));
        assert!(stump.c1 > 0f64);
        assert!(stump.c0 < 0f64);
    }

    #[test]
    fn best_below_is_strict() {
        assert_eq!(best_below(&[1.0, 0.5, 0.5], 1.0), Some(1));
        assert_eq!(best_below(&[1.0, 1.0], 1.0), None);
        assert_eq!(best_below(&[], 1.0), None);
    }
}
