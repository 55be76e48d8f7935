//! Error types for tree construction and insertion.

use thiserror::Error;

/// Errors reported by [`Region`](crate::Region) and [`Orthtree`](crate::Orthtree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The minimum corner exceeds the maximum corner on some axis.
    #[error("inverted bounds on axis {axis}: min is greater than max")]
    InvertedBounds { axis: usize },

    /// A boundary coordinate is NaN or infinite.
    #[error("non-finite bound on axis {axis}")]
    NonFiniteBounds { axis: usize },

    /// The tree was configured with a maximum depth of zero.
    #[error("max depth must be at least 1")]
    ZeroDepth,

    /// An inserted position lies outside the tree boundary.
    #[error("position lies outside the tree boundary")]
    OutOfBounds,
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
