//! Portal users as the gate sees them.

use crate::study::StudyId;
use serde::{Deserialize, Serialize};

/// The user on whose behalf actions are attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalUser {
    /// Stable user id assigned by the portal.
    pub id: u64,
    /// Guests can browse public data but cannot hold approvals.
    pub is_guest: bool,
    /// Dataset ids the user holds study-scoped approval for.
    ///
    /// `None` marks a portal that does not track study-scoped approvals at
    /// all; the gate then treats every dataset as fully authorized instead
    /// of fetching permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_studies: Option<Vec<StudyId>>,
}

impl PortalUser {
    /// A signed-in user with no study approvals yet.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            is_guest: false,
            approved_studies: Some(Vec::new()),
        }
    }

    /// A guest session.
    #[must_use]
    pub const fn guest(id: u64) -> Self {
        Self {
            id,
            is_guest: true,
            approved_studies: Some(Vec::new()),
        }
    }

    /// Replace the approved-studies list.
    #[must_use]
    pub fn with_approved_studies<I, S>(mut self, studies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StudyId>,
    {
        self.approved_studies = Some(studies.into_iter().map(Into::into).collect());
        self
    }

    /// Mark the user as belonging to a portal without study-scoped
    /// approvals.
    #[must_use]
    pub fn without_study_approvals(mut self) -> Self {
        self.approved_studies = None;
        self
    }

    /// True when the portal tracks study-scoped approvals for this user.
    #[must_use]
    pub const fn uses_study_approvals(&self) -> bool {
        self.approved_studies.is_some()
    }

    /// True when the user's approved-studies list names the study.
    ///
    /// On portals without study-scoped approvals every study counts as
    /// approved.
    #[must_use]
    pub fn holds_approval_for(&self, id: &StudyId) -> bool {
        match &self.approved_studies {
            Some(studies) => studies.contains(id),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_approval_checks_membership() {
        let user = PortalUser::new(7).with_approved_studies(["DS_1"]);
        assert!(user.holds_approval_for(&StudyId::new("DS_1")));
        assert!(!user.holds_approval_for(&StudyId::new("DS_2")));
    }

    #[test]
    fn test_portal_without_approvals_approves_everything() {
        let user = PortalUser::new(7).without_study_approvals();
        assert!(!user.uses_study_approvals());
        assert!(user.holds_approval_for(&StudyId::new("DS_anything")));
    }

    #[test]
    fn test_guest_flag() {
        assert!(PortalUser::guest(0).is_guest);
        assert!(!PortalUser::new(1).is_guest);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(PortalUser::guest(3)).unwrap();
        assert_eq!(json["isGuest"], true);
        assert_eq!(json["approvedStudies"], serde_json::json!([]));

        let parsed: PortalUser = serde_json::from_str(r#"{"id": 5, "isGuest": false}"#).unwrap();
        assert_eq!(parsed.approved_studies, None);
    }
}
