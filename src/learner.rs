//! Provides the [`Learner`] trait.
use crate::{Classifier, Index, Result};


/// Builds classifiers from a training index.
///
/// A learner is an immutable configuration;
/// [`Learner::build`] can be called on any number of indices,
/// possibly from several threads.
pub trait Learner: Send + Sync {
    /// The classifier this learner builds.
    type Output: Classifier + Send + Sync;


    /// The name of the learner.
    fn name(&self) -> &str;


    /// Train a classifier on every document and category of `index`.
    fn build(&self, index: &dyn Index) -> Result<Self::Output>;


    /// Merge classifiers trained on disjoint category sets
    /// into one classifier scoring their categories in order.
    fn merge(&self, classifiers: Vec<Self::Output>) -> Result<Self::Output>;
}
