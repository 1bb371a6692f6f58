//! Studies, their identifiers, and access-control levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a study (dataset) in the portal catalog, e.g.
/// `DS_480c976ef9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyId(String);

impl StudyId {
    /// Create a study id from a raw dataset-id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract a study id from a WDK record-class name such as
    /// `DS_480c976ef9_RSRC`.
    ///
    /// The id is the `DS_` prefix plus the hash up to the next underscore,
    /// truncated to 13 characters. Returns `None` when the name does not
    /// start with a dataset-id prefix.
    #[must_use]
    pub fn from_record_class(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("DS_")?;
        let hash = rest.split('_').next()?;
        if hash.is_empty() {
            return None;
        }
        let len = "DS_".len().saturating_add(hash.len()).min(13);
        name.get(..len).map(Self::new)
    }

    /// The raw dataset-id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StudyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StudyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Access-control level of a study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionLevel {
    /// Openly available to everyone.
    Public,
    /// Announced but not yet publicly released.
    Prerelease,
    /// Most actions open; record-level access and downloads need approval.
    Protected,
    /// Browsing open; downloads need approval.
    Controlled,
    /// Every action needs approval.
    Private,
}

impl RestrictionLevel {
    /// Every level, in declaration order.
    pub const ALL: [RestrictionLevel; 5] = [
        Self::Public,
        Self::Prerelease,
        Self::Protected,
        Self::Controlled,
        Self::Private,
    ];

    /// Parse a catalog `study_access` value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "prerelease" => Some(Self::Prerelease),
            "protected" => Some(Self::Protected),
            "controlled" => Some(Self::Controlled),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// Wire/log label for this level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Prerelease => "prerelease",
            Self::Protected => "protected",
            Self::Controlled => "controlled",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for RestrictionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A study record from the portal catalog.
///
/// Read-only from the gate's perspective: studies are fetched, validated by
/// [`StudyCatalog`](crate::catalog::StudyCatalog), and consulted during
/// evaluation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    /// Dataset id.
    pub id: StudyId,
    /// Display name shown in restriction notices.
    pub display_name: String,
    /// Access-control level.
    pub access: RestrictionLevel,
    /// Link to the study's Data Access and Use Policy, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_url: Option<String>,
    /// Catalog flag: `"0"` means an access request is granted immediately
    /// upon submission, without study-team review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_needs_approval: Option<String>,
    /// Bulk-download location for the study's data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Portal projects the study appears in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_availability: Option<Vec<String>>,
    /// Whether the study has been publicly released.
    pub released: bool,
    /// Disabled studies stay in the catalog but are invisible to gating.
    #[serde(default)]
    pub disabled: bool,
}

impl Study {
    /// Create a released, enabled study with the given access level.
    pub fn new(
        id: impl Into<StudyId>,
        display_name: impl Into<String>,
        access: RestrictionLevel,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            access,
            policy_url: None,
            request_needs_approval: None,
            download_url: None,
            project_availability: None,
            released: true,
            disabled: false,
        }
    }

    /// Set the policy link.
    #[must_use]
    pub fn with_policy_url(mut self, url: impl Into<String>) -> Self {
        self.policy_url = Some(url.into());
        self
    }

    /// Set the raw `request_needs_approval` catalog value.
    #[must_use]
    pub fn with_request_needs_approval(mut self, value: impl Into<String>) -> Self {
        self.request_needs_approval = Some(value.into());
        self
    }

    /// Set the bulk-download location.
    #[must_use]
    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    /// Mark the study released or unreleased.
    #[must_use]
    pub fn with_released(mut self, released: bool) -> Self {
        self.released = released;
        self
    }

    /// Mark the study disabled or enabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// True iff a submitted access request is granted without review.
    #[must_use]
    pub fn grants_request_immediately(&self) -> bool {
        self.request_needs_approval.as_deref() == Some("0")
    }
}
