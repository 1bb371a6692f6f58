//! Resolved user permissions and the predicates over them.
//!
//! [`UserPermissions`] is the immutable snapshot built from a fetched
//! [`PermissionsResponse`]: staff (with the owner flag preserved) or
//! external, each carrying a per-dataset grant lookup. The predicates
//! mirror the study-access dashboard's decision points; every one is a
//! pure combinator with no hidden state and no ordering dependency
//! between calls.

use std::collections::HashMap;
use studygate_core::{
    ActionAuthorization, DatasetPermissionEntry, PermissionsResponse, StudyAction, StudyId,
};

static UNRESTRICTED_STUB: DatasetPermissionEntry = DatasetPermissionEntry::unrestricted_stub();

/// Per-dataset grant lookup behind a [`UserPermissions`] value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetGrants {
    /// Every dataset answers with the fixed fully-authorized stub entry.
    ///
    /// Stands in for a fetched response on portals that do not track
    /// study-scoped approvals.
    Unrestricted,

    /// Explicit per-dataset entries. A dataset with no entry grants
    /// nothing.
    PerStudy(HashMap<StudyId, DatasetPermissionEntry>),
}

impl DatasetGrants {
    /// The entry for a dataset, if any grant exists.
    #[must_use]
    pub fn entry(&self, dataset: &StudyId) -> Option<&DatasetPermissionEntry> {
        match self {
            Self::Unrestricted => Some(&UNRESTRICTED_STUB),
            Self::PerStudy(entries) => entries.get(dataset),
        }
    }

    /// Capability grants for a dataset.
    #[must_use]
    pub fn authorization(&self, dataset: &StudyId) -> Option<ActionAuthorization> {
        self.entry(dataset)
            .map(DatasetPermissionEntry::authorization)
    }
}

/// Resolved permissions for one user session.
///
/// Constructed once from a permissions response and shared immutably;
/// re-resolved only when the navigation key changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPermissions {
    /// Portal staff. Owners additionally administer the staff list itself.
    Staff {
        /// Whether the user owns the study-access application.
        is_owner: bool,
        /// Per-dataset grants.
        grants: DatasetGrants,
    },

    /// Anyone who is not staff: study-team providers and end users.
    External {
        /// Per-dataset grants.
        grants: DatasetGrants,
    },
}

impl UserPermissions {
    /// Resolve a raw permissions response.
    ///
    /// A set staff or owner flag yields the `Staff` variant with the owner
    /// flag preserved; anything else is `External`. Total; malformed input
    /// violates an upstream contract and is not handled here.
    #[must_use]
    pub fn from_response(response: PermissionsResponse) -> Self {
        let grants = DatasetGrants::PerStudy(response.per_dataset);
        if response.is_staff == Some(true) || response.is_owner == Some(true) {
            Self::Staff {
                is_owner: response.is_owner == Some(true),
                grants,
            }
        } else {
            Self::External { grants }
        }
    }

    /// Permissions treating every dataset as fully authorized.
    ///
    /// Used instead of a fetch when the current user's portal tracks no
    /// study-scoped approvals.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self::External {
            grants: DatasetGrants::Unrestricted,
        }
    }

    /// Per-dataset grants.
    #[must_use]
    pub const fn grants(&self) -> &DatasetGrants {
        match self {
            Self::Staff { grants, .. } | Self::External { grants } => grants,
        }
    }

    // ---- role predicates ----

    /// True for portal staff.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Staff { .. })
    }

    /// True for staff who own the study-access application.
    #[must_use]
    pub const fn is_owner(&self) -> bool {
        matches!(self, Self::Staff { is_owner: true, .. })
    }

    /// True when the user holds a provider entry for the dataset.
    ///
    /// Staff are never providers, whatever entries they hold.
    #[must_use]
    pub fn is_provider(&self, dataset: &StudyId) -> bool {
        match self {
            Self::Staff { .. } => false,
            Self::External { grants } => grants
                .entry(dataset)
                .is_some_and(DatasetPermissionEntry::is_provider),
        }
    }

    /// True when the user's provider entry for the dataset carries the
    /// manager flag.
    #[must_use]
    pub fn is_manager(&self, dataset: &StudyId) -> bool {
        match self {
            Self::Staff { .. } => false,
            Self::External { grants } => grants
                .entry(dataset)
                .is_some_and(DatasetPermissionEntry::is_manager),
        }
    }

    // ---- approval predicates ----

    /// Whether the user may perform `action` against the dataset.
    ///
    /// A dataset with no entry denies every action.
    #[must_use]
    pub fn is_approved_for_action(&self, dataset: &StudyId, action: StudyAction) -> bool {
        self.grants()
            .authorization(dataset)
            .is_some_and(|authorization| authorization.permits(action.category()))
    }

    /// Whether the user holds every capability for the dataset.
    ///
    /// Requires an entry with all five capability booleans set, not just
    /// the one relevant to some particular action.
    #[must_use]
    pub fn is_fully_approved_for_study(&self, dataset: &StudyId) -> bool {
        self.grants()
            .authorization(dataset)
            .is_some_and(ActionAuthorization::grants_all)
    }

    // ---- dashboard predicates ----

    /// Staff and the dataset's providers may open the access dashboard.
    #[must_use]
    pub fn can_access_dashboard(&self, dataset: &StudyId) -> bool {
        self.is_staff() || self.is_provider(dataset)
    }

    /// Only owners are offered a dashboard link elsewhere in the portal.
    #[must_use]
    pub const fn should_offer_dashboard_link(&self) -> bool {
        self.is_owner()
    }

    /// The staff table is staff-only.
    #[must_use]
    pub const fn should_display_staff_table(&self) -> bool {
        self.is_staff()
    }

    /// Adding, removing, or re-owning staff members is owner-only.
    #[must_use]
    pub const fn can_update_staff(&self) -> bool {
        self.is_owner()
    }

    /// The providers table shows for staff and the dataset's providers.
    #[must_use]
    pub fn should_display_providers_table(&self, dataset: &StudyId) -> bool {
        self.is_staff() || self.is_provider(dataset)
    }

    /// Owners and managers may add providers.
    #[must_use]
    pub fn can_add_providers(&self, dataset: &StudyId) -> bool {
        self.is_owner() || self.is_manager(dataset)
    }

    /// Removing providers is owner-only.
    #[must_use]
    pub const fn can_remove_providers(&self) -> bool {
        self.is_owner()
    }

    /// Owners and managers may update providers.
    #[must_use]
    pub fn can_update_providers(&self, dataset: &StudyId) -> bool {
        self.is_owner() || self.is_manager(dataset)
    }

    /// The end-users table follows dashboard access.
    #[must_use]
    pub fn should_display_end_users_table(&self, dataset: &StudyId) -> bool {
        self.can_access_dashboard(dataset)
    }

    /// Owners and managers may add end users.
    #[must_use]
    pub fn can_add_end_users(&self, dataset: &StudyId) -> bool {
        self.is_owner() || self.is_manager(dataset)
    }

    /// Removing end users is owner-only.
    #[must_use]
    pub const fn can_remove_end_users(&self) -> bool {
        self.is_owner()
    }

    /// Owners and the dataset's providers may change approval statuses.
    #[must_use]
    pub fn can_update_approval_status(&self, dataset: &StudyId) -> bool {
        self.is_owner() || self.is_provider(dataset)
    }

    /// The request-history table is owner-only.
    #[must_use]
    pub const fn should_display_history_table(&self) -> bool {
        self.is_owner()
    }
}
