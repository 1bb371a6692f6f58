//! The requirement a user must satisfy before an action is allowed.

use serde::{Deserialize, Serialize};
use studygate_core::{PortalUser, RestrictionLevel, Study, StudyAction};

/// What stands between a user and an action on a study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequirement {
    /// The action is open at this restriction level.
    Allowed,

    /// The action needs an approved access request.
    ApprovalRequired,
}

impl AccessRequirement {
    /// The requirement `level` imposes on `action`, before any per-user
    /// approval is considered.
    ///
    /// Total over both enums. Levels ratchet: everything `controlled`
    /// gates is also gated by `protected`, and `private` gates every
    /// action.
    #[must_use]
    pub const fn of(level: RestrictionLevel, action: StudyAction) -> Self {
        match (level, action) {
            (RestrictionLevel::Public | RestrictionLevel::Prerelease, _) => Self::Allowed,
            (RestrictionLevel::Controlled, action) => match action {
                StudyAction::Download | StudyAction::DownloadPage => Self::ApprovalRequired,
                _ => Self::Allowed,
            },
            (RestrictionLevel::Protected, action) => match action {
                StudyAction::Paginate
                | StudyAction::Record
                | StudyAction::RecordPage
                | StudyAction::Download
                | StudyAction::DownloadPage => Self::ApprovalRequired,
                _ => Self::Allowed,
            },
            (RestrictionLevel::Private, _) => Self::ApprovalRequired,
        }
    }

    /// The requirement left for `user` after their approvals are applied.
    ///
    /// A user holding an approval for the study satisfies every
    /// level-imposed requirement.
    #[must_use]
    pub fn for_user(user: &PortalUser, study: &Study, action: StudyAction) -> Self {
        if user.holds_approval_for(&study.id) {
            Self::Allowed
        } else {
            Self::of(study.access, action)
        }
    }

    /// True when nothing further is required.
    #[must_use]
    pub const fn is_met(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The user-facing phrase for satisfying this requirement.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::ApprovalRequired => "acquire research approval",
            Self::Allowed => "contact us",
        }
    }
}
