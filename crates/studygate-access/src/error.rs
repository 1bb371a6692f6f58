//! Error types for access evaluation.

use crate::source::SourceError;
use thiserror::Error;

/// Failure of an attempt evaluation.
///
/// Evaluation itself cannot fail: unknown studies clear the attempt and
/// absent permission entries deny it. The only failures are propagated
/// data-source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A user, catalog, or permissions fetch failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result alias for gate operations.
pub type AccessResult<T> = Result<T, AccessError>;
