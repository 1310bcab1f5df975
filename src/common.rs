//! Defines some common functions and types used in this library.

/// Numeric constants.
pub mod constants;

/// Precondition checks returning [`Error::Config`](crate::Error::Config).
pub mod checkers;

/// Progress reporting and cooperative cancellation.
pub mod status;

/// Small numeric helpers.
pub(crate) mod utils;

pub use status::{
    CancellationToken,
    StatusListener,
};
