//! The validated study catalog.
//!
//! Raw catalog records arrive from the portal's catalog service as bags of
//! string attributes. [`StudyCatalog::from_records`] checks each record for
//! the required attributes, parses its access level, and filters unreleased
//! studies. Rejected records are reported alongside the valid ones; a bad
//! record never aborts the load.

use crate::error::{CatalogError, CatalogResult};
use crate::study::{RestrictionLevel, Study, StudyId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

/// Catalog attributes a record must carry to become a [`Study`].
const REQUIRED_ATTRIBUTES: [&str; 8] = [
    "card_headline",
    "card_points",
    "card_questions",
    "dataset_id",
    "display_name",
    "is_public",
    "study_access",
    "bulk_download_url",
];

/// Placeholder reported for records rejected without a readable id.
const UNKNOWN_ID: &str = "<unknown>";

/// A raw study record as fetched from the catalog service: attribute values
/// keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyRecord {
    attributes: HashMap<String, String>,
}

impl StudyRecord {
    /// Empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record with one more attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Options controlling catalog construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Keep unreleased studies instead of filtering them out.
    pub include_unreleased: bool,
}

/// A record the catalog rejected, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRecord {
    /// The raw record as received.
    pub record: StudyRecord,
    /// Why validation rejected it.
    pub error: CatalogError,
}

/// The validated study catalog.
#[derive(Debug, Clone, Default)]
pub struct StudyCatalog {
    studies: Vec<Study>,
    invalid: Vec<InvalidRecord>,
}

impl StudyCatalog {
    /// Validate raw catalog records into a catalog.
    ///
    /// Each rejected record lands in
    /// [`invalid_records`](Self::invalid_records) with the reason and is
    /// logged; valid records are unaffected. Unreleased studies are dropped
    /// unless `options.include_unreleased` keeps them.
    #[must_use]
    pub fn from_records(records: Vec<StudyRecord>, options: CatalogOptions) -> Self {
        let mut studies = Vec::new();
        let mut invalid = Vec::new();
        for record in records {
            match validate(&record) {
                Ok(study) => {
                    if study.released || options.include_unreleased {
                        studies.push(study);
                    }
                },
                Err(error) => {
                    warn!(%error, "rejecting catalog record");
                    invalid.push(InvalidRecord { record, error });
                },
            }
        }
        info!(
            loaded = studies.len(),
            rejected = invalid.len(),
            "study catalog ready"
        );
        Self { studies, invalid }
    }

    /// Catalog over already-parsed studies, bypassing record validation.
    #[must_use]
    pub fn from_studies(studies: Vec<Study>) -> Self {
        Self {
            studies,
            invalid: Vec::new(),
        }
    }

    /// Resolve a study by id.
    ///
    /// Disabled studies are skipped: for gating purposes they behave as if
    /// they were not in the catalog at all.
    #[must_use]
    pub fn find(&self, id: &StudyId) -> Option<&Study> {
        self.studies
            .iter()
            .find(|study| !study.disabled && study.id == *id)
    }

    /// Studies that passed validation and filtering, in record order.
    #[must_use]
    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    /// Records rejected by validation.
    #[must_use]
    pub fn invalid_records(&self) -> &[InvalidRecord] {
        &self.invalid
    }

    /// Number of studies in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.studies.len()
    }

    /// True when no studies survived validation and filtering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }
}

fn validate(record: &StudyRecord) -> CatalogResult<Study> {
    let missing: Vec<String> = REQUIRED_ATTRIBUTES
        .iter()
        .filter(|name| record.attribute(name).is_none())
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        let dataset_id = record
            .attribute("dataset_id")
            .unwrap_or(UNKNOWN_ID)
            .to_string();
        return Err(CatalogError::MissingAttributes {
            dataset_id,
            missing,
        });
    }

    let dataset_id = record.attribute("dataset_id").unwrap_or_default();
    let access_value = record.attribute("study_access").unwrap_or_default();
    let access = RestrictionLevel::parse(access_value).ok_or_else(|| {
        CatalogError::UnknownRestrictionLevel {
            dataset_id: dataset_id.to_string(),
            value: access_value.to_string(),
        }
    })?;

    let mut study = Study::new(
        dataset_id,
        record.attribute("display_name").unwrap_or_default(),
        access,
    )
    .with_released(record.attribute("is_public") == Some("true"));

    if let Some(url) = record.attribute("policy_url") {
        study = study.with_policy_url(url);
    }
    if let Some(value) = record.attribute("request_needs_approval") {
        study = study.with_request_needs_approval(value);
    }
    if let Some(url) = record.attribute("bulk_download_url") {
        study = study.with_download_url(url);
    }
    // The attribute value is itself a JSON array; a malformed one is
    // treated as absent rather than failing the record.
    study.project_availability = record
        .attribute("project_availability")
        .and_then(|value| serde_json::from_str(value).ok());

    Ok(study)
}
