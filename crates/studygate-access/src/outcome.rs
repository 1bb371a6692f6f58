//! Evaluation outcomes.

use serde::{Deserialize, Serialize};
use studygate_core::{Study, StudyAction, StudyId};

use crate::notice::RestrictionNotice;

/// The result of evaluating one action attempt against one study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RestrictionOutcome {
    /// The user may proceed.
    #[serde(rename_all = "camelCase")]
    Unrestricted {
        /// The study the action ran against.
        study: Study,
        /// The attempted action.
        action: StudyAction,
    },

    /// The user is blocked; `notice` says why and what to do about it.
    #[serde(rename_all = "camelCase")]
    Restricted {
        /// The study the action ran against.
        study: Study,
        /// The attempted action.
        action: StudyAction,
        /// The dialog to render.
        notice: RestrictionNotice,
    },

    /// The study is not in the catalog, so the action proceeds ungated.
    #[serde(rename_all = "camelCase")]
    Cleared {
        /// The identifier that matched nothing.
        study_id: StudyId,
        /// The attempted action.
        action: StudyAction,
    },
}

impl RestrictionOutcome {
    /// The verdict this outcome reports to approval hooks.
    #[must_use]
    pub const fn verdict(&self) -> ApprovalVerdict {
        match self {
            Self::Unrestricted { .. } => ApprovalVerdict::Approved,
            Self::Restricted { .. } => ApprovalVerdict::NotApproved,
            Self::Cleared { .. } => ApprovalVerdict::StudyNotFound,
        }
    }

    /// True when the action may proceed.
    #[must_use]
    pub const fn allows(&self) -> bool {
        !matches!(self, Self::Restricted { .. })
    }

    /// The attempted action.
    #[must_use]
    pub const fn action(&self) -> StudyAction {
        match self {
            Self::Unrestricted { action, .. }
            | Self::Restricted { action, .. }
            | Self::Cleared { action, .. } => *action,
        }
    }
}

/// How an attempt is reported to auditing and analytics hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalVerdict {
    /// The user held the approval the action needed.
    Approved,

    /// The user lacked the approval the action needed.
    NotApproved,

    /// The study could not be matched against the catalog.
    StudyNotFound,
}

impl ApprovalVerdict {
    /// Wire and log name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::NotApproved => "not-approved",
            Self::StudyNotFound => "study-not-found",
        }
    }
}

impl std::fmt::Display for ApprovalVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
