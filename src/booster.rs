//! Provides the boosting learners.

mod core;

// ------------------------------------------------
// Flat multi-label boosting
pub mod adaboost;

// ------------------------------------------------
// Hierarchical boosting
pub mod treeboost;


/// Booster trait
pub use self::core::Booster;

pub use self::adaboost::{
    AdaBoost,
    AdaBoostTrainer,
    AdaBoostClassifier,
};

pub use self::treeboost::{
    TreeBoost,
    TreeBoostClassifier,
    LevelNode,
    Level,
    Address,
    NegativesChooser,
    AllNegatives,
    SiblingNegatives,
    CentroidNegatives,
    KnnNegatives,
    ClusterNegatives,
};
