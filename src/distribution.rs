//! The weighted-sample matrix (the boosting distribution over
//! category × document pairs), its initial policies,
//! and the per-round update.

/// Defines `WeightedSampleMatrix`.
pub mod matrix;

/// Defines the initial distribution policies.
pub mod initial;

/// Defines the post-round update and the loss functions.
pub mod update;

pub use matrix::{
    Normalization,
    WeightedSampleMatrix,
};
pub use initial::InitialDistribution;
pub use update::{
    BoostingLoss,
    Corrections,
    DistributionUpdate,
};
