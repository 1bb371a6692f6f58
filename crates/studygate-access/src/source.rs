//! The data-source seam.
//!
//! The gate owns no transport. Embedders adapt their portal services (the
//! user endpoint, the study catalog, and the study-access permissions
//! endpoint) behind [`AccessDataSource`] and hand the gate an `Arc` of it.

use async_trait::async_trait;
use studygate_core::{PermissionsResponse, PortalUser, StudyRecord};
use thiserror::Error;

/// Failure surface of an [`AccessDataSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The backing service answered with an error status.
    #[error("service error {status}: {message}")]
    Service {
        /// Status code reported by the service.
        status: u16,
        /// Service-provided message.
        message: String,
    },

    /// The backing service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The response could not be interpreted.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Async access to the portal services the gate consumes.
///
/// Fetch failures are propagated to the gate's caller unchanged; the gate
/// performs no retries.
#[async_trait]
pub trait AccessDataSource: Send + Sync {
    /// The user on whose behalf actions run.
    async fn current_user(&self) -> Result<PortalUser, SourceError>;

    /// Raw study catalog records. The gate validates them; see
    /// [`StudyCatalog`](studygate_core::StudyCatalog).
    async fn study_records(&self) -> Result<Vec<StudyRecord>, SourceError>;

    /// The raw permissions response for the current user.
    async fn permissions(&self) -> Result<PermissionsResponse, SourceError>;
}
