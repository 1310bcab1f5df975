//! Provides the `WeakLearner` trait.
use crate::{
    TrainingIndex,
    WeakHypothesis,
    WeightedSampleMatrix,
};


/// A trait that the weak learners implement.
/// Given the current distribution, a weak learner returns one
/// decision stump per category of the training index.
///
/// # Required Methods
/// - [`WeakLearner::name`]
/// - [`WeakLearner::produce`]
/// - [`WeakLearner::info`] ... optional.
pub trait WeakLearner: Sync {
    /// Returns the name of the weak learner.
    fn name(&self) -> &str;


    /// Returns the parameters of the weak learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Returns a weak hypothesis covering
    /// every category of `index`, weighted by `matrix`.
    /// `matrix` and `index` are only read.
    fn produce(&self, index: &TrainingIndex, matrix: &WeightedSampleMatrix)
        -> WeakHypothesis;
}
