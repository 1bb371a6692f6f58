//! Per-dataset permission records as the study-access service serializes
//! them, plus the approval-status workflow table.
//!
//! The JSON shape is fixed by the service: camelCase field names, a `type`
//! tag discriminating provider entries from end-user entries, and lowercase
//! approval statuses. Unknown fields (`studyId`, `sha1Hash`, ...) are
//! tolerated and ignored.

use crate::action::ActionCategory;
use crate::study::StudyId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The five capability booleans attached to a dataset permission entry.
///
/// A capability absent from the wire reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionAuthorization {
    /// May view study metadata.
    pub study_metadata: bool,
    /// May subset the study's data.
    pub subsetting: bool,
    /// May create and view visualizations.
    pub visualizations: bool,
    /// May view the first page of results.
    pub results_first_page: bool,
    /// May view all results.
    pub results_all: bool,
}

impl ActionAuthorization {
    /// Authorization granting every capability.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            study_metadata: true,
            subsetting: true,
            visualizations: true,
            results_first_page: true,
            results_all: true,
        }
    }

    /// Authorization granting nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            study_metadata: false,
            subsetting: false,
            visualizations: false,
            results_first_page: false,
            results_all: false,
        }
    }

    /// The boolean gating one capability category.
    #[must_use]
    pub const fn permits(self, category: ActionCategory) -> bool {
        match category {
            ActionCategory::StudyMetadata => self.study_metadata,
            ActionCategory::Subsetting => self.subsetting,
            ActionCategory::Visualizations => self.visualizations,
            ActionCategory::ResultsFirstPage => self.results_first_page,
            ActionCategory::ResultsAll => self.results_all,
        }
    }

    /// True iff all five capabilities are granted.
    #[must_use]
    pub const fn grants_all(self) -> bool {
        self.study_metadata
            && self.subsetting
            && self.visualizations
            && self.results_first_page
            && self.results_all
    }

    /// Copy of this authorization with one capability set to `granted`.
    #[must_use]
    pub const fn with_capability(mut self, category: ActionCategory, granted: bool) -> Self {
        match category {
            ActionCategory::StudyMetadata => self.study_metadata = granted,
            ActionCategory::Subsetting => self.subsetting = granted,
            ActionCategory::Visualizations => self.visualizations = granted,
            ActionCategory::ResultsFirstPage => self.results_first_page = granted,
            ActionCategory::ResultsAll => self.results_all = granted,
        }
        self
    }
}

/// A single per-dataset permission record.
///
/// At most one entry exists per dataset. A dataset with no entry grants
/// nothing: every capability reads `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DatasetPermissionEntry {
    /// A member of the study team.
    #[serde(rename = "provider", rename_all = "camelCase")]
    Provider {
        /// Managers may change the provider and end-user lists themselves.
        #[serde(default)]
        is_manager: bool,
        /// Whether the dataset is a user-contributed study.
        #[serde(default)]
        is_user_study: bool,
        /// Capability grants for the dataset.
        action_authorization: ActionAuthorization,
    },

    /// An external user granted access to the dataset.
    #[serde(rename = "end-user", rename_all = "camelCase")]
    EndUser {
        /// Whether the dataset is a user-contributed study.
        #[serde(default)]
        is_user_study: bool,
        /// Capability grants for the dataset.
        action_authorization: ActionAuthorization,
    },
}

impl DatasetPermissionEntry {
    /// The fixed fully-authorized end-user entry, handed out for every
    /// dataset on portals that do not track study-scoped approvals.
    #[must_use]
    pub const fn unrestricted_stub() -> Self {
        Self::EndUser {
            is_user_study: false,
            action_authorization: ActionAuthorization::full(),
        }
    }

    /// Capability grants carried by this entry.
    #[must_use]
    pub const fn authorization(&self) -> ActionAuthorization {
        match self {
            Self::Provider {
                action_authorization,
                ..
            }
            | Self::EndUser {
                action_authorization,
                ..
            } => *action_authorization,
        }
    }

    /// True for provider entries.
    #[must_use]
    pub const fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// True for provider entries carrying the manager flag.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self, Self::Provider { is_manager: true, .. })
    }
}

/// The raw permissions response fetched from the study-access service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionsResponse {
    /// Permission entries keyed by dataset id.
    pub per_dataset: HashMap<StudyId, DatasetPermissionEntry>,
    /// Set when the user owns the study-access application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
    /// Set when the user is portal staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
}

impl PermissionsResponse {
    /// Response with one more per-dataset entry.
    #[must_use]
    pub fn with_entry(mut self, id: impl Into<StudyId>, entry: DatasetPermissionEntry) -> Self {
        self.per_dataset.insert(id.into(), entry);
        self
    }
}

/// Status of an end user's request for access to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Access granted.
    Approved,
    /// Awaiting a decision.
    Requested,
    /// Access refused.
    Denied,
}

impl ApprovalStatus {
    /// Statuses a dashboard reviewer may move this status to.
    ///
    /// An approved request cannot re-enter the queue; a denied one can.
    #[must_use]
    pub const fn permitted_transitions(self) -> &'static [ApprovalStatus] {
        match self {
            Self::Approved => &[Self::Approved, Self::Denied],
            Self::Requested | Self::Denied => &[Self::Requested, Self::Approved, Self::Denied],
        }
    }

    /// Wire/log label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Requested => "requested",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::StudyAction;

    // ---- ActionAuthorization ----

    #[test]
    fn test_permits_selects_the_right_capability() {
        let auth = ActionAuthorization::none().with_capability(ActionCategory::Subsetting, true);
        assert!(auth.permits(ActionCategory::Subsetting));
        assert!(!auth.permits(ActionCategory::ResultsAll));
        assert!(!auth.permits(ActionCategory::StudyMetadata));
    }

    #[test]
    fn test_grants_all_requires_all_five() {
        assert!(ActionAuthorization::full().grants_all());
        assert!(!ActionAuthorization::none().grants_all());

        for category in ActionCategory::ALL {
            let auth = ActionAuthorization::full().with_capability(category, false);
            assert!(
                !auth.grants_all(),
                "flipping {category} off should break grants_all"
            );
        }
    }

    #[test]
    fn test_authorization_wire_names() {
        let auth = ActionAuthorization::none()
            .with_capability(ActionCategory::ResultsFirstPage, true)
            .with_capability(ActionCategory::StudyMetadata, true);
        let json = serde_json::to_value(auth).unwrap();
        assert_eq!(json["resultsFirstPage"], true);
        assert_eq!(json["studyMetadata"], true);
        assert_eq!(json["subsetting"], false);
    }

    #[test]
    fn test_authorization_missing_fields_default_false() {
        let auth: ActionAuthorization = serde_json::from_str(r#"{"subsetting": true}"#).unwrap();
        assert!(auth.subsetting);
        assert!(!auth.results_all);
        assert!(!auth.grants_all());
    }

    // ---- DatasetPermissionEntry ----

    #[test]
    fn test_provider_entry_from_service_json() {
        let json = r#"{
            "type": "provider",
            "studyId": "DS_480c976ef9",
            "sha1Hash": "0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33",
            "isManager": true,
            "isUserStudy": false,
            "actionAuthorization": {
                "studyMetadata": true,
                "subsetting": true,
                "visualizations": true,
                "resultsFirstPage": true,
                "resultsAll": false
            }
        }"#;
        let entry: DatasetPermissionEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_provider());
        assert!(entry.is_manager());
        assert!(entry.authorization().subsetting);
        assert!(!entry.authorization().results_all);
    }

    #[test]
    fn test_end_user_entry_defaults() {
        let json = r#"{"type": "end-user", "actionAuthorization": {"subsetting": true}}"#;
        let entry: DatasetPermissionEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_provider());
        assert!(!entry.is_manager());
        match entry {
            DatasetPermissionEntry::EndUser { is_user_study, .. } => assert!(!is_user_study),
            DatasetPermissionEntry::Provider { .. } => panic!("parsed as provider"),
        }
    }

    #[test]
    fn test_entry_type_tags() {
        let provider = DatasetPermissionEntry::Provider {
            is_manager: false,
            is_user_study: false,
            action_authorization: ActionAuthorization::none(),
        };
        let json = serde_json::to_value(&provider).unwrap();
        assert_eq!(json["type"], "provider");

        let json = serde_json::to_value(DatasetPermissionEntry::unrestricted_stub()).unwrap();
        assert_eq!(json["type"], "end-user");
    }

    #[test]
    fn test_unrestricted_stub_grants_everything() {
        let stub = DatasetPermissionEntry::unrestricted_stub();
        assert!(stub.authorization().grants_all());
        for action in StudyAction::ALL {
            assert!(stub.authorization().permits(action.category()));
        }
    }

    // ---- PermissionsResponse ----

    #[test]
    fn test_permissions_response_round_trip() {
        let response = PermissionsResponse {
            is_owner: Some(true),
            ..PermissionsResponse::default()
        }
        .with_entry(
            "DS_1",
            DatasetPermissionEntry::EndUser {
                is_user_study: false,
                action_authorization: ActionAuthorization::full(),
            },
        );

        let json = serde_json::to_string(&response).unwrap();
        let parsed: PermissionsResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
        assert!(parsed.per_dataset.contains_key(&StudyId::new("DS_1")));
    }

    #[test]
    fn test_permissions_response_accepts_sparse_json() {
        let parsed: PermissionsResponse = serde_json::from_str(r#"{"perDataset": {}}"#).unwrap();
        assert!(parsed.per_dataset.is_empty());
        assert_eq!(parsed.is_owner, None);
        assert_eq!(parsed.is_staff, None);
    }

    // ---- ApprovalStatus ----

    #[test]
    fn test_permitted_transitions() {
        assert_eq!(
            ApprovalStatus::Requested.permitted_transitions(),
            &[
                ApprovalStatus::Requested,
                ApprovalStatus::Approved,
                ApprovalStatus::Denied
            ]
        );
        assert_eq!(
            ApprovalStatus::Approved.permitted_transitions(),
            &[ApprovalStatus::Approved, ApprovalStatus::Denied]
        );
        assert_eq!(
            ApprovalStatus::Denied.permitted_transitions(),
            &[
                ApprovalStatus::Requested,
                ApprovalStatus::Approved,
                ApprovalStatus::Denied
            ]
        );
    }

    #[test]
    fn test_approval_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Approved).unwrap(),
            "\"approved\""
        );
        let status: ApprovalStatus = serde_json::from_str("\"denied\"").unwrap();
        assert_eq!(status, ApprovalStatus::Denied);
        assert_eq!(ApprovalStatus::Requested.to_string(), "requested");
    }
}
