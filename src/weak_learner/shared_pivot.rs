//! Provides [`SharedPivot`], the AdaBoost.MH real-valued stump learner.
use rayon::prelude::*;

use crate::{
    TrainingIndex,
    WeakHypothesis,
    WeightedSampleMatrix,
};
use super::core::WeakLearner;
use super::stump_statistics::{self, CategoryStatistics};


/// Chooses one pivot shared by every category,
/// the one minimizing `Z` summed over the categories.
/// Each category keeps its own pair of confidences.
/// If no feature beats the constant stumps, every category
/// gets a constant stump.
///
/// # Example
/// ```
/// use tcboost::prelude::*;
///
/// let weak_learner = SharedPivot::new()
///     .epsilon(1e-4);
/// assert_eq!(weak_learner.name(), "AdaBoost.MH stumps");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedPivot {
    epsilon: Option<f64>,
}


impl SharedPivot {
    /// Construct a new instance of [`SharedPivot`].
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the smoothing `ε` of the confidences.
    /// By default `ε = 1 / (n_documents * n_categories)`.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }
}


impl WeakLearner for SharedPivot {
    fn name(&self) -> &str {
        "AdaBoost.MH stumps"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let eps = self.epsilon
            .map(|e| format!("{e}"))
            .unwrap_or_else(|| "1 / (docs x cats)".into());
        Some(vec![("Smoothing", eps)])
    }


    fn produce(&self, index: &TrainingIndex, matrix: &WeightedSampleMatrix)
        -> WeakHypothesis
    {
        let n_categories = index.n_categories();
        let n_features = index.n_features();
        let eps = self.epsilon
            .unwrap_or_else(|| stump_statistics::default_epsilon(index));

        // Summed `Z` per feature, and the summed baseline in the last slot.
        let summed = (0..n_categories).into_par_iter()
            .map(|c| {
                let stats = CategoryStatistics::collect(index, matrix, c);
                let mut z = stats.z_values();
                z.push(stats.baseline().baseline_z());
                z
            })
            .reduce(
                || vec![0f64; n_features + 1],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| { *x += y; });
                    a
                },
            );

        let baseline = summed[n_features];
        let pivot = stump_statistics::best_below(&summed[..n_features], baseline);
        log::debug!("shared pivot {pivot:?}");

        let data = (0..n_categories)
            .map(|c| match pivot {
                Some(f) => stump_statistics::split_on(index, matrix, c, f)
                    .stump(f, eps),
                None => CategoryStatistics::collect(index, matrix, c)
                    .baseline()
                    .constant(eps),
            })
            .collect();

        WeakHypothesis::new(data)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InitialDistribution, MemoryIndex, Normalization};

    #[test]
    fn one_pivot_for_all_categories() {
        let mut index = MemoryIndex::new(2);
        index.add_category("a", None).unwrap();
        index.add_category("b", None).unwrap();
        index.add_document(&[0], &[0]).unwrap();
        index.add_document(&[0], &[0, 1]).unwrap();
        index.add_document(&[1], &[]).unwrap();
        index.add_document(&[1], &[]).unwrap();
        let train = TrainingIndex::from_index(&index);

        let mut m = WeightedSampleMatrix::open(2, 4).unwrap();
        InitialDistribution::Uniform
            .populate(&mut m, &train, Normalization::PerCategory)
            .unwrap();

        let h = SharedPivot::new().produce(&train, &m);
        assert_eq!(h[0].pivot, Some(0));
        assert_eq!(h[1].pivot, Some(0));
        assert!(h[0].c1 > 0f64);
        assert!(h[0].c0 < 0f64);
    }
}
