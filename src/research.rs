//! This directory provides some features for research
//! - K-fold evaluation, multi-label or per category
//! - Contingency tables and their micro/macro averages
//! - Per-round logging of the training/test Hamming loss

/// Provides the train/test fold generator.
pub mod cross_validation;

/// Defines the contingency tables.
pub mod contingency;

/// Multi-label k-fold evaluation.
pub mod kfold;

/// Per-category binary k-fold evaluation.
pub mod per_category;

/// Defines a trait for logging.
pub mod logger;

/// Defines multi-label losses (e.g., Hamming loss).
pub mod loss_functions;

pub use cross_validation::{Folds, FoldSplit};
pub use contingency::{ContingencyTable, ContingencyTableSet};
pub use kfold::{KFoldEvaluator, KFoldReport};
pub use per_category::{PerCategoryKFold, PerCategoryReport};
pub use logger::{Logger, Research};

pub use loss_functions::{
    hamming_loss,
    subset_zero_one_loss,
};
