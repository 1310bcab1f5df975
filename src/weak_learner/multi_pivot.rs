//! Provides [`MultiPivot`], the MP-Boost decision-stump learner.
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    Result,
    TrainingIndex,
    WeakHypothesis,
    WeightedSampleMatrix,
};
use super::core::WeakLearner;
use super::stump_statistics::{self, CategoryStatistics};

use std::sync::Arc;


/// Chooses, independently for every category, the pivot minimizing
/// `Z = 2 Σ_b sqrt(W⁺_b W⁻_b)` over the blocks `b` of documents
/// without/with the pivot.
/// The confidences are `c_b = ½ ln((W⁺_b + ε) / (W⁻_b + ε))`.
/// A category whose best `Z` does not beat the constant stump
/// gets no pivot.
///
/// The per-category searches run in parallel, on the global rayon pool
/// or on a dedicated pool set by [`MultiPivot::n_threads`].
///
/// # Example
/// ```
/// use tcboost::prelude::*;
///
/// let weak_learner = MultiPivot::new()
///     .n_threads(2)
///     .unwrap();
/// assert_eq!(weak_learner.name(), "MP-Boost stumps");
/// ```
#[derive(Clone, Default)]
pub struct MultiPivot {
    epsilon: Option<f64>,
    pool: Option<Arc<ThreadPool>>,
}


impl MultiPivot {
    /// Construct a new instance of [`MultiPivot`].
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the smoothing `ε` of the confidences.
    /// By default `ε = 1 / (n_documents * n_categories)`.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }


    /// Search on a dedicated pool of `n_threads` workers.
    pub fn n_threads(mut self, n_threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()?;
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }


    fn search(&self, index: &TrainingIndex, matrix: &WeightedSampleMatrix)
        -> WeakHypothesis
    {
        let eps = self.epsilon
            .unwrap_or_else(|| stump_statistics::default_epsilon(index));

        let data = (0..index.n_categories()).into_par_iter()
            .map(|c| {
                let stats = CategoryStatistics::collect(index, matrix, c);
                let baseline = stats.baseline();
                let z = stats.z_values();
                match stump_statistics::best_below(&z, baseline.baseline_z()) {
                    Some(f) => stats.split(f).stump(f, eps),
                    None => baseline.constant(eps),
                }
            })
            .collect::<Vec<_>>();

        WeakHypothesis::new(data)
    }
}


impl WeakLearner for MultiPivot {
    fn name(&self) -> &str {
        "MP-Boost stumps"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let eps = self.epsilon
            .map(|e| format!("{e}"))
            .unwrap_or_else(|| "1 / (docs x cats)".into());
        let threads = self.pool.as_ref()
            .map(|p| format!("{}", p.current_num_threads()))
            .unwrap_or_else(|| "global".into());
        Some(vec![
            ("Smoothing", eps),
            ("Threads", threads),
        ])
    }


    fn produce(&self, index: &TrainingIndex, matrix: &WeightedSampleMatrix)
        -> WeakHypothesis
    {
        match &self.pool {
            Some(pool) => pool.install(|| self.search(index, matrix)),
            None => self.search(index, matrix),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InitialDistribution, MemoryIndex, Normalization};

    #[test]
    fn picks_a_pivot_per_category() {
        let mut index = MemoryIndex::new(3);
        index.add_category("a", None).unwrap();
        index.add_category("b", None).unwrap();
        index.add_document(&[0], &[0]).unwrap();
        index.add_document(&[0], &[0]).unwrap();
        index.add_document(&[1], &[1]).unwrap();
        index.add_document(&[2], &[]).unwrap();
        let train = TrainingIndex::from_index(&index);

        let mut m = WeightedSampleMatrix::open(2, 4).unwrap();
        InitialDistribution::Uniform
            .populate(&mut m, &train, Normalization::PerCategory)
            .unwrap();

        let h = MultiPivot::new().n_threads(2).unwrap().produce(&train, &m);
        assert_eq!(h.n_categories(), 2);
        assert_eq!(h[0].pivot, Some(0));
        assert_eq!(h[1].pivot, Some(1));
        assert!(h[0].c1 > 0f64 && h[0].c0 < 0f64);
    }

    #[test]
    fn featureless_index_yields_constant_stumps() {
        let mut index = MemoryIndex::new(0);
        index.add_category("a", None).unwrap();
        index.add_document(&[], &[0]).unwrap();
        index.add_document(&[], &[]).unwrap();
        index.add_document(&[], &[]).unwrap();
        let train = TrainingIndex::from_index(&index);

        let mut m = WeightedSampleMatrix::open(1, 3).unwrap();
        InitialDistribution::Uniform
            .populate(&mut m, &train, Normalization::Global)
            .unwrap();

        let h = MultiPivot::new().produce(&train, &m);
        assert_eq!(h[0].pivot, None);
        assert!(h[0].c0 < 0f64);
    }
}
