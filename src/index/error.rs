//! Query error types
//!
//! Unseen values and out-of-range positions degrade to empty results; only
//! misconfiguration (querying a dimension the index was never built with)
//! surfaces as an error.

use thiserror::Error;

/// Errors that can occur during query operations
#[derive(Error, Debug)]
pub enum QueryError {
    /// Referenced dimension was not declared at construction
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
