//! Error types for down-sampling.
//!
//! Sampling itself can only fail in a handful of ways: a random draw asks for more
//! distinct positions than its pool holds, the catalog refuses to copy metadata
//! onto a sample, the caller passes degenerate arguments, or Arrow fails while
//! casting or slicing a table.

use arrow::error::ArrowError;
use thiserror::Error;

use crate::table::TableId;

/// Result type alias for down-sampling operations
pub type Result<T> = std::result::Result<T, DownSampleError>;

/// Errors returned by the sampler.
#[derive(Error, Debug)]
pub enum DownSampleError {
    /// A draw without replacement requested more items than the pool contains.
    ///
    /// This is a hard failure. The sampler never clamps the request to the pool size.
    #[error("cannot draw {requested} distinct positions from a pool of {available}")]
    InsufficientPool { requested: usize, available: usize },

    /// The catalog could not copy table metadata onto a sample.
    #[error("failed to copy table metadata: {0}")]
    MetadataCopy(#[from] CatalogError),

    /// A precondition on the inputs was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Arrow failed while casting or slicing a table.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl DownSampleError {
    /// Returns true if this is an [`DownSampleError::InsufficientPool`] error
    pub fn is_insufficient_pool(&self) -> bool {
        matches!(self, DownSampleError::InsufficientPool { .. })
    }
}

/// Errors raised by a [`crate::catalog::Catalog`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The table has no entry in the catalog
    #[error("table {0} is not registered in the catalog")]
    NotRegistered(TableId),

    /// The table is registered but no key column was declared for it
    #[error("table {0} has no key column")]
    MissingKey(TableId),

    /// A column named in the metadata does not exist in the table schema
    #[error("column '{column}' not found in table {table}")]
    ColumnNotFound { table: TableId, column: String },

    /// The key column holds nulls or duplicate values
    #[error("column '{column}' is not a valid key for table {table}: {reason}")]
    InvalidKey {
        table: TableId,
        column: String,
        reason: String,
    },

    /// The destination already carries different metadata
    #[error("table {0} already carries conflicting metadata")]
    Conflict(TableId),
}
