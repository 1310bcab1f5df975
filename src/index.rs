//! The files in `index/` directory define the [`Index`] contract
//! consumed by every learner, an in-memory implementation,
//! and cheap subset views over any index.

/// Defines the `Index` trait.
pub mod core;

/// In-memory index backed by bit sets.
pub mod memory_index;

/// Subset views (documents + categories) over an index.
pub mod index_view;

/// Per-build cache consumed by the weak learners.
pub mod training_index;

pub use self::core::Index;
pub use memory_index::MemoryIndex;
pub use index_view::IndexView;
pub use training_index::TrainingIndex;
