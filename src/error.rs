use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdIndexError {
    /// A tree was built from zero points.
    #[error("Cannot build a KDTree from zero points.")]
    EmptyInput,

    /// Points of differing dimensionality were added to the same tree.
    #[error("Point {index} has {found} dimensions, expected {expected}.")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        index: usize,
    },

    /// A query was run against a tree without a root node.
    #[error("KDTree has no nodes.")]
    EmptyTree,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
