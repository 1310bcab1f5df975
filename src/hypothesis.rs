//! The core library for `Classifier` traits
//! and the decision-stump weak hypotheses.

pub(crate) mod hypothesis_traits;
pub(crate) mod weak_hypothesis;


pub use hypothesis_traits::{
    Classifier,
    ClassificationResult,
    ClassifierRange,
};

pub use weak_hypothesis::{
    HypothesisData,
    WeakHypothesis,
};
