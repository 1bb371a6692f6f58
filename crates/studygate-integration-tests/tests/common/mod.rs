//! Shared test harness for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use studygate_access::{AccessDataSource, SourceError};
use studygate_core::{PermissionsResponse, PortalUser, StudyRecord};

/// An in-memory portal backend with per-endpoint call counters.
///
/// Serves a fixed user, catalog, and permissions response; individual
/// endpoints can be made to fail instead.
#[allow(dead_code)]
pub struct PortalFixture {
    user: PortalUser,
    records: Vec<StudyRecord>,
    response: PermissionsResponse,
    records_error: Option<SourceError>,
    /// Times the permissions endpoint was hit.
    pub permission_fetches: AtomicUsize,
}

#[allow(dead_code)]
impl PortalFixture {
    /// Fixture serving `user`, `records`, and `response`.
    pub fn new(
        user: PortalUser,
        records: Vec<StudyRecord>,
        response: PermissionsResponse,
    ) -> Self {
        Self {
            user,
            records,
            response,
            records_error: None,
            permission_fetches: AtomicUsize::new(0),
        }
    }

    /// Make the catalog endpoint fail with `error`.
    pub fn with_records_error(mut self, error: SourceError) -> Self {
        self.records_error = Some(error);
        self
    }

    /// Wrap the fixture for handing to a gate, keeping a handle for
    /// counter assertions.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl AccessDataSource for PortalFixture {
    async fn current_user(&self) -> Result<PortalUser, SourceError> {
        Ok(self.user.clone())
    }

    async fn study_records(&self) -> Result<Vec<StudyRecord>, SourceError> {
        match &self.records_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.records.clone()),
        }
    }

    async fn permissions(&self) -> Result<PermissionsResponse, SourceError> {
        self.permission_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// A complete catalog record for `id` at the given access level.
#[allow(dead_code)]
pub fn catalog_record(id: &str, access: &str, is_public: bool) -> StudyRecord {
    StudyRecord::new()
        .with_attribute("card_headline", format!("About study {id}"))
        .with_attribute("card_points", "[]")
        .with_attribute("card_questions", "{}")
        .with_attribute("dataset_id", id)
        .with_attribute("display_name", format!("Study {id}"))
        .with_attribute("is_public", if is_public { "true" } else { "false" })
        .with_attribute("study_access", access)
        .with_attribute("policy_url", "https://example.org/policy.pdf")
        .with_attribute("bulk_download_url", "/download")
}
