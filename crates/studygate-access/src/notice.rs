//! User-facing restriction notices.
//!
//! When an action is denied the gate composes a [`RestrictionNotice`]:
//! a headline, a message explaining what to do, an optional policy link,
//! and the single prompt the portal should render. Strict actions produce
//! blocking notices; everything else is dismissible.

use serde::{Deserialize, Serialize};
use studygate_core::{PortalUser, RestrictionLevel, Study, StudyAction};

use crate::permissions::UserPermissions;
use crate::requirement::AccessRequirement;

/// The one call to action a notice carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum AccessPrompt {
    /// Ask the guest to sign in before anything else.
    LogIn,

    /// Offer the access-request form.
    #[serde(rename_all = "camelCase")]
    SubmitAccessRequest {
        /// Whether submitting grants access without waiting for review.
        granted_immediately: bool,
    },

    /// Point at the study page; used for studies not yet released.
    VisitStudyPage,
}

/// Everything the portal needs to render a restriction dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionNotice {
    /// Dialog title.
    pub headline: String,

    /// Dialog body text.
    pub message: String,

    /// Link to the study's data access and use policy, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_url: Option<String>,

    /// The call to action, if any applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<AccessPrompt>,

    /// False for strict actions, which must block until resolved.
    pub dismissible: bool,
}

impl RestrictionNotice {
    /// Compose the notice for a denied `action` on `study`.
    #[must_use]
    pub fn compose(
        study: &Study,
        action: StudyAction,
        user: &PortalUser,
        permissions: &UserPermissions,
    ) -> Self {
        let dismissible = !action.is_strict();

        if study.access == RestrictionLevel::Prerelease
            && !permissions.is_fully_approved_for_study(&study.id)
        {
            return Self {
                headline: format!(
                    "The {} study is not yet publicly available.",
                    study.display_name
                ),
                message: format!(
                    "Please see the {} study page to learn more about the study and how to \
                     request access to the data.",
                    study.display_name
                ),
                // Prerelease notices never carry the policy link.
                policy_url: None,
                prompt: Some(AccessPrompt::VisitStudyPage),
                dismissible,
            };
        }

        let requirement = AccessRequirement::for_user(user, study, action);
        let granted_immediately = study.grants_request_immediately();

        let base = if action == StudyAction::Download {
            "This study requires you to submit an access request".to_owned()
        } else {
            format!("Please {} in order to {}", requirement.instruction(), action.verb())
        };
        let message = if study.policy_url.is_none() {
            format!("{base}.")
        } else if granted_immediately {
            format!("{base}. Data access will be granted immediately upon request submission.")
        } else {
            format!("{base} and get approval from the study team before downloading data.")
        };

        let prompt = if user.is_guest {
            Some(AccessPrompt::LogIn)
        } else if !requirement.is_met() {
            Some(AccessPrompt::SubmitAccessRequest {
                granted_immediately,
            })
        } else {
            None
        };

        Self {
            headline: format!("The {} study has data access restrictions.", study.display_name),
            message,
            policy_url: study.policy_url.clone(),
            prompt,
            dismissible,
        }
    }
}
