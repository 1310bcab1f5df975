//! Exports the standard learners, classifiers and traits.
//!
pub use crate::{
    Error,
    Result,
    CancellationToken,
    StatusListener,
};


pub use crate::index::{
    // Index trait
    Index,

    MemoryIndex,
    IndexView,
};


pub use crate::distribution::{
    WeightedSampleMatrix,
    Normalization,
    InitialDistribution,
    BoostingLoss,
    Corrections,
};


pub use crate::weak_learner::{
    // Weak learner trait
    WeakLearner,

    SharedPivot,
    MultiPivot,
};


pub use crate::booster::{
    // Booster trait
    Booster,

    // Flat boosting -----------------------------
    AdaBoost,
    AdaBoostClassifier,

    // Hierarchical boosting ---------------------
    TreeBoost,
    TreeBoostClassifier,
    Level,
    Address,

    // Negatives choosers
    NegativesChooser,
    AllNegatives,
    SiblingNegatives,
    CentroidNegatives,
    KnnNegatives,
    ClusterNegatives,
};


pub use crate::hypothesis::{
    Classifier,
    ClassificationResult,
    ClassifierRange,
};


pub use crate::learner::Learner;
pub use crate::persistence::ModelStore;
