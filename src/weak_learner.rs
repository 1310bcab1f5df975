//! The files in `weak_learner/` directory defines
//! `WeakLearner` trait and the decision-stump weak learners.

/// Provides WeakLearner trait.
pub mod core;

/// Weighted counts shared by the stump searches.
pub(crate) mod stump_statistics;

/// AdaBoost.MH stumps: one pivot for every category.
pub mod shared_pivot;

/// MP-Boost stumps: one pivot per category.
pub mod multi_pivot;

pub use self::core::WeakLearner;
pub use shared_pivot::SharedPivot;
pub use multi_pivot::MultiPivot;
