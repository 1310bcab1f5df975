//! Numeric constants shared across the crate.

/// Tolerance used when checking that a distribution is normalized.
pub const SIMPLEX_TOLERANCE: f64 = 1e-5;

/// Default number of boosting rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default number of folds of the k-fold evaluators.
pub const DEFAULT_N_FOLDS: usize = 10;

/// Default seed used when shuffling documents.
pub const DEFAULT_SEED: u64 = 1234;

/// Default positive-class boost of the category-oriented distribution.
pub const DEFAULT_POSITIVE_BOOST: f64 = 1.0;

/// Width of the fold counter in verbose output.
pub const PRINT_WIDTH: usize = 9;
