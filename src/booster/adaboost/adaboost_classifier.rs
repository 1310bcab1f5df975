//! Provides [`AdaBoostClassifier`].
use fixedbitset::FixedBitSet;
use serde::{Serialize, Serializer, Deserialize};

use crate::{
    Error,
    Result,
    Index,
    Classifier,
    ClassificationResult,
    ClassifierRange,
    HypothesisData,
    WeakHypothesis,
};
use crate::common::utils;

use std::collections::BTreeMap;


/// The additive model produced by [`AdaBoost`](crate::AdaBoost).
///
/// The score of category `c` on document `d` is the sum, over the first
/// [`AdaBoostClassifier::iterations`] rounds, of the round's stump output
/// for `c` on `d`. A document is assigned to `c` iff its score is `>= 0`.
///
/// # Grouped mode
/// [`AdaBoostClassifier::ensure_grouped`] merges, per category,
/// the stumps sharing a pivot into one stump whose confidences are the sums.
/// Classification then sums over the merged stumps of **every** stored round,
/// ignoring the iteration count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredClassifier")]
pub struct AdaBoostClassifier {
    hypotheses: Vec<WeakHypothesis>,
    n_categories: usize,
    iterations: usize,
    #[serde(rename = "grouped", serialize_with = "serialize_grouped")]
    groups: Option<Vec<Vec<HypothesisData>>>,
}


impl AdaBoostClassifier {
    /// Construct a classifier from per-round hypotheses.
    /// Every hypothesis must cover `n_categories` categories.
    pub fn new(hypotheses: Vec<WeakHypothesis>, n_categories: usize)
        -> Result<Self>
    {
        if let Some(h) = hypotheses.iter()
            .find(|h| h.n_categories() != n_categories)
        {
            return Err(Error::CategoryMismatch {
                expected: n_categories,
                found: h.n_categories(),
            });
        }
        let iterations = hypotheses.len();
        Ok(Self { hypotheses, n_categories, iterations, groups: None })
    }


    /// Merge classifiers trained on disjoint category sets.
    /// Round `r` of the result concatenates round `r` of every input,
    /// so the categories of `classifiers[0]` come first.
    /// Every input must hold the same number of rounds.
    pub fn merge(classifiers: Vec<Self>) -> Result<Self> {
        let rounds = match classifiers.first() {
            Some(first) => first.n_rounds(),
            None => return Err(Error::Config("nothing to merge".into())),
        };
        if let Some(c) = classifiers.iter().find(|c| c.n_rounds() != rounds) {
            return Err(Error::IterationMismatch {
                expected: rounds,
                found: c.n_rounds(),
            });
        }

        let n_categories = classifiers.iter()
            .map(|c| c.n_categories)
            .sum::<usize>();
        let hypotheses = (0..rounds)
            .map(|r| {
                WeakHypothesis::concat(classifiers.iter().map(|c| &c.hypotheses[r]))
            })
            .collect::<Vec<_>>();

        let mut merged = Self::new(hypotheses, n_categories)?;
        if classifiers.iter().any(|c| c.is_grouped()) {
            merged.ensure_grouped();
        }
        Ok(merged)
    }


    /// Number of stored rounds.
    #[inline]
    pub fn n_rounds(&self) -> usize {
        self.hypotheses.len()
    }


    /// Number of rounds summed at classification time.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }


    /// The stored hypotheses, one per round.
    #[inline]
    pub fn hypotheses(&self) -> &[WeakHypothesis] {
        &self.hypotheses[..]
    }


    /// Returns `true` if the grouped cache is built.
    #[inline]
    pub fn is_grouped(&self) -> bool {
        self.groups.is_some()
    }


    /// Build the grouped cache if it is not built yet.
    pub fn ensure_grouped(&mut self) {
        if self.groups.is_some() { return; }

        let groups = (0..self.n_categories)
            .map(|c| {
                let mut merged = BTreeMap::<Option<usize>, HypothesisData>::new();
                for h in self.hypotheses.iter() {
                    let stump = h[c];
                    merged.entry(stump.pivot)
                        .and_modify(|m| {
                            m.c0 += stump.c0;
                            m.c1 += stump.c1;
                        })
                        .or_insert(stump);
                }
                merged.into_values().collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        self.groups = Some(groups);
    }


    /// Consume `self` and return it in grouped mode.
    pub fn grouped(mut self) -> Self {
        self.ensure_grouped();
        self
    }


    /// Drop the grouped cache and go back to per-round classification.
    pub fn ungroup(&mut self) {
        self.groups = None;
    }


    /// The merged stumps of `category`, if grouped.
    pub fn groups(&self, category: usize) -> Option<&[HypothesisData]> {
        self.groups.as_ref()
            .map(|groups| &groups[category][..])
    }


    /// Per-category population variance of the summed contributions
    /// of `document`: the per-round outputs, or the merged stump outputs
    /// in grouped mode.
    pub fn variance(&self, index: &dyn Index, document: usize) -> Vec<f64> {
        let features = document_features(index, document);
        (0..self.n_categories)
            .map(|c| {
                let contributions = self.contributions(&features, c);
                utils::variance(&contributions)
            })
            .collect()
    }


    fn contributions(&self, features: &FixedBitSet, category: usize)
        -> Vec<f64>
    {
        let value = |stump: &HypothesisData| {
            let has_pivot = stump.pivot
                .map(|p| features.contains(p))
                .unwrap_or(false);
            stump.value(has_pivot)
        };
        match &self.groups {
            Some(groups) => groups[category].iter()
                .map(value)
                .collect(),
            None => self.hypotheses[..self.iterations].iter()
                .map(|h| value(&h[category]))
                .collect(),
        }
    }
}


impl Classifier for AdaBoostClassifier {
    fn n_categories(&self) -> usize {
        self.n_categories
    }


    fn classify(&self, index: &dyn Index, document: usize)
        -> ClassificationResult
    {
        let features = document_features(index, document);
        let scores = (0..self.n_categories)
            .map(|c| self.contributions(&features, c).into_iter().sum::<f64>())
            .collect::<Vec<_>>();
        ClassificationResult::dense(document, scores)
    }


    fn classifier_range(&self, _category: usize) -> ClassifierRange {
        ClassifierRange::unbounded()
    }


    /// Clamped to the number of stored rounds.
    fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations.min(self.hypotheses.len());
    }
}


fn document_features(index: &dyn Index, document: usize) -> FixedBitSet {
    let mut features = FixedBitSet::with_capacity(index.n_features());
    features.extend(index.document_features(document));
    features
}


fn serialize_grouped<S>(
    groups: &Option<Vec<Vec<HypothesisData>>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
    where S: Serializer,
{
    serializer.serialize_bool(groups.is_some())
}


/// On-disk form; the grouped cache is rebuilt after loading.
#[derive(Deserialize)]
struct StoredClassifier {
    hypotheses: Vec<WeakHypothesis>,
    n_categories: usize,
    iterations: usize,
    grouped: bool,
}


impl TryFrom<StoredClassifier> for AdaBoostClassifier {
    type Error = Error;

    fn try_from(stored: StoredClassifier) -> Result<Self> {
        let mut classifier = Self::new(stored.hypotheses, stored.n_categories)?;
        classifier.set_iterations(stored.iterations);
        if stored.grouped {
            classifier.ensure_grouped();
        }
        Ok(classifier)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryIndex;

    fn index() -> MemoryIndex {
        let mut index = MemoryIndex::new(2);
        index.add_category("c", None).unwrap();
        index.add_document(&[0], &[0]).unwrap();
        index.add_document(&[1], &[]).unwrap();
        index
    }

    fn two_rounds() -> AdaBoostClassifier {
        let hypotheses = vec![
            WeakHypothesis::new(vec![HypothesisData::new(0, -1.0, 1.0)]),
            WeakHypothesis::new(vec![HypothesisData::new(0, 0.5, -3.0)]),
        ];
        AdaBoostClassifier::new(hypotheses, 1).unwrap()
    }

    #[test]
    fn iterations_to_use_flip_the_sign() {
        let index = index();
        let mut f = two_rounds();

        assert_eq!(f.classify(&index, 0).scores, vec![-2.0]);
        f.set_iterations(1);
        assert_eq!(f.classify(&index, 0).scores, vec![1.0]);
        f.set_iterations(10);
        assert_eq!(f.iterations(), 2);
    }

    #[test]
    fn grouped_mode_ignores_iterations() {
        let index = index();
        let mut f = two_rounds().grouped();
        assert_eq!(f.groups(0).unwrap().len(), 1);

        f.set_iterations(1);
        assert_eq!(f.classify(&index, 0).scores, vec![-2.0]);
        assert_eq!(f.classify(&index, 1).scores, vec![-0.5]);

        f.ungroup();
        assert_eq!(f.classify(&index, 0).scores, vec![1.0]);
    }

    #[test]
    fn variance_of_contributions() {
        let index = index();
        let f = two_rounds();
        // contributions on doc 0: 1.0 and -3.0
        assert_eq!(f.variance(&index, 0), vec![4.0]);

        // one merged stump: no spread
        let g = two_rounds().grouped();
        assert_eq!(g.variance(&index, 0), vec![0.0]);
    }

    #[test]
    fn merge_requires_equal_rounds() {
        let one = AdaBoostClassifier::new(
            vec![WeakHypothesis::new(vec![HypothesisData::constant(1.0)])],
            1,
        ).unwrap();
        let err = AdaBoostClassifier::merge(vec![two_rounds(), one]);
        assert!(matches!(
            err,
            Err(Error::IterationMismatch { expected: 2, found: 1 })
        ));
        assert!(AdaBoostClassifier::merge(Vec::new()).is_err());
    }

    #[test]
    fn grouped_flag_survives_json() {
        let f = two_rounds().grouped();
        let json = serde_json::to_string(&f).unwrap();
        let g: AdaBoostClassifier = serde_json::from_str(&json).unwrap();
        assert!(g.is_grouped());
        assert_eq!(f, g);
    }

    #[test]
    fn inconsistent_category_count_fails_to_load() {
        let json = r#"{
            "hypotheses": [{"data": [{"pivot": 0, "c0": -1.0, "c1": 1.0}]}],
            "n_categories": 2,
            "iterations": 1,
            "grouped": false
        }"#;
        assert!(serde_json::from_str::<AdaBoostClassifier>(json).is_err());
    }
}
