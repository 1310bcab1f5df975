//! Defines the error type shared by every learner, classifier and evaluator.
use std::io;


/// Errors raised while training, classifying, evaluating or persisting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A learner or evaluator received an invalid parameter.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The initial distribution name is not one of the known policies.
    #[error("unsupported initial distribution `{0}`")]
    UnsupportedDistribution(String),

    /// The weighted-sample matrix could not be allocated.
    #[error(
        "failed to allocate a weighted-sample matrix \
        of {n_categories} categories x {n_documents} documents"
    )]
    Allocation {
        /// Number of rows requested.
        n_categories: usize,
        /// Number of columns requested.
        n_documents: usize,
    },

    /// Classifiers with different round counts cannot be merged.
    #[error(
        "cannot merge classifiers trained for {expected} and {found} iterations"
    )]
    IterationMismatch {
        /// Round count of the first classifier.
        expected: usize,
        /// Round count of the offending classifier.
        found: usize,
    },

    /// A weak hypothesis does not cover the expected categories.
    #[error("category count mismatch: expected {expected}, found {found}")]
    CategoryMismatch {
        /// Categories the classifier declares.
        expected: usize,
        /// Categories the hypothesis carries.
        found: usize,
    },

    /// The training index has no documents or no categories.
    #[error("the training index is empty ({0})")]
    EmptyIndex(&'static str),

    /// A tree node has no document to learn from.
    #[error("category {category} has no usable training documents")]
    EmptyTrainingSet {
        /// Global id of the category.
        category: usize,
    },

    /// A normalization pass found an all-zero row or matrix.
    #[error("cannot normalize the weighted-sample matrix: {0} sums to zero")]
    DegenerateDistribution(String),

    /// Inconsistent index content (unknown ids, cycles in the tree, ...).
    #[error("invalid index: {0}")]
    Index(String),

    /// The operation was interrupted through a `CancellationToken`.
    #[error("operation cancelled")]
    Cancelled,

    /// I/O failure while persisting a model.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// (De)serialization failure while persisting a model.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The worker pool of a weak learner could not be created.
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}


/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
