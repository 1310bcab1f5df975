#![warn(missing_docs)]

//!
//! A crate that provides boosting algorithms for
//! (hierarchical) multi-label text categorization.
//!
//! - `AdaBoost` (AdaBoost.MH)
//!     An additive model of decision stumps, one per category and round,
//!     trained over a weighted-sample matrix of
//!     category × document pairs.
//!     The weak learners are `SharedPivot` (one pivot for every category)
//!     and `MultiPivot` (MP-Boost, one pivot per category).
//!
//!
//! - `TreeBoost`
//!     Decomposes a category tree into one boosting problem per internal
//!     node and routes documents top-down at classification time.
//!
//! The `research` module provides k-fold evaluators,
//! contingency tables, and per-round loggers.

pub mod error;
pub mod common;
pub mod index;
pub mod distribution;
pub mod hypothesis;
pub mod weak_learner;
pub mod learner;
pub mod booster;
pub mod research;
pub mod persistence;

/// Exports the learners, the classifiers and the traits.
pub mod prelude;


pub use error::{Error, Result};

pub use common::{
    CancellationToken,
    StatusListener,
};

pub use index::{
    Index,
    MemoryIndex,
    IndexView,
    TrainingIndex,
};

pub use distribution::{
    WeightedSampleMatrix,
    Normalization,
    InitialDistribution,
    BoostingLoss,
    Corrections,
    DistributionUpdate,
};

pub use hypothesis::{
    Classifier,
    ClassificationResult,
    ClassifierRange,
    HypothesisData,
    WeakHypothesis,
};

pub use weak_learner::{
    WeakLearner,
    SharedPivot,
    MultiPivot,
};

pub use learner::Learner;

pub use booster::{
    Booster,
    AdaBoost,
    AdaBoostTrainer,
    AdaBoostClassifier,
    TreeBoost,
    TreeBoostClassifier,
    Level,
    Address,
    NegativesChooser,
    AllNegatives,
    SiblingNegatives,
    CentroidNegatives,
    KnnNegatives,
    ClusterNegatives,
};

pub use research::{
    Folds,
    FoldSplit,
    ContingencyTable,
    ContingencyTableSet,
    KFoldEvaluator,
    PerCategoryKFold,
};

pub use persistence::ModelStore;
