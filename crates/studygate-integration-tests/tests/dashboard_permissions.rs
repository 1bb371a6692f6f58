//! Dashboard decisions over permissions as the portal actually sends them.
//!
//! These tests parse realistic permissions payloads, resolve them, and
//! walk each role through the access dashboard's decision points.

use serde_json::json;
use studygate_access::UserPermissions;
use studygate_core::{PermissionsResponse, StudyAction, StudyId};

fn resolve(payload: serde_json::Value) -> UserPermissions {
    let response: PermissionsResponse =
        serde_json::from_value(payload).expect("payload should parse");
    UserPermissions::from_response(response)
}

fn ds(id: &str) -> StudyId {
    StudyId::new(id)
}

/// Owners administer every table and see the request history.
#[test]
fn test_owner_controls_the_whole_dashboard() {
    let permissions = resolve(json!({
        "isOwner": true,
        "isStaff": true,
        "perDataset": {}
    }));

    assert!(permissions.is_staff());
    assert!(permissions.is_owner());
    assert!(permissions.can_access_dashboard(&ds("DS_1")));
    assert!(permissions.should_offer_dashboard_link());
    assert!(permissions.can_update_staff());
    assert!(permissions.can_add_providers(&ds("DS_1")));
    assert!(permissions.can_remove_providers());
    assert!(permissions.can_update_providers(&ds("DS_1")));
    assert!(permissions.can_add_end_users(&ds("DS_1")));
    assert!(permissions.can_remove_end_users());
    assert!(permissions.can_update_approval_status(&ds("DS_1")));
    assert!(permissions.should_display_history_table());
}

/// Plain staff observe every table but administer nothing.
#[test]
fn test_staff_observe_without_administering() {
    let permissions = resolve(json!({
        "isStaff": true,
        "perDataset": {}
    }));

    assert!(permissions.is_staff());
    assert!(!permissions.is_owner());
    assert!(permissions.can_access_dashboard(&ds("DS_1")));
    assert!(permissions.should_display_staff_table());
    assert!(permissions.should_display_providers_table(&ds("DS_1")));
    assert!(permissions.should_display_end_users_table(&ds("DS_1")));

    assert!(!permissions.should_offer_dashboard_link());
    assert!(!permissions.can_update_staff());
    assert!(!permissions.can_add_providers(&ds("DS_1")));
    assert!(!permissions.can_remove_providers());
    assert!(!permissions.can_update_approval_status(&ds("DS_1")));
    assert!(!permissions.should_display_history_table());
}

/// A managing provider runs their own study's rosters, and unknown service
/// fields in the payload are simply ignored.
#[test]
fn test_manager_runs_their_study() {
    let permissions = resolve(json!({
        "perDataset": {
            "DS_mine": {
                "type": "provider",
                "isManager": true,
                "studyId": "DS_mine",
                "sha1Hash": "1df936c51a15ad7d",
                "actionAuthorization": {
                    "studyMetadata": true,
                    "subsetting": true,
                    "visualizations": true,
                    "resultsFirstPage": true,
                    "resultsAll": true
                }
            }
        }
    }));

    assert!(permissions.is_provider(&ds("DS_mine")));
    assert!(permissions.is_manager(&ds("DS_mine")));
    assert!(permissions.can_access_dashboard(&ds("DS_mine")));
    assert!(permissions.can_add_providers(&ds("DS_mine")));
    assert!(permissions.can_update_providers(&ds("DS_mine")));
    assert!(permissions.can_add_end_users(&ds("DS_mine")));
    assert!(permissions.can_update_approval_status(&ds("DS_mine")));

    // Removal and history stay owner-only even for managers.
    assert!(!permissions.can_remove_providers());
    assert!(!permissions.can_remove_end_users());
    assert!(!permissions.should_display_history_table());

    // The role is scoped to the managed study.
    assert!(!permissions.is_provider(&ds("DS_other")));
    assert!(!permissions.can_access_dashboard(&ds("DS_other")));
}

/// A non-managing provider reviews requests without editing rosters.
#[test]
fn test_provider_reviews_without_editing_rosters() {
    let permissions = resolve(json!({
        "perDataset": {
            "DS_mine": {
                "type": "provider",
                "actionAuthorization": {
                    "studyMetadata": true,
                    "subsetting": true,
                    "visualizations": true,
                    "resultsFirstPage": true,
                    "resultsAll": true
                }
            }
        }
    }));

    assert!(permissions.is_provider(&ds("DS_mine")));
    assert!(!permissions.is_manager(&ds("DS_mine")));
    assert!(permissions.can_access_dashboard(&ds("DS_mine")));
    assert!(permissions.can_update_approval_status(&ds("DS_mine")));
    assert!(!permissions.can_add_providers(&ds("DS_mine")));
    assert!(!permissions.can_update_providers(&ds("DS_mine")));
    assert!(!permissions.can_add_end_users(&ds("DS_mine")));
}

/// An end user's capability grants decide action approval, category by
/// category, and never open the dashboard.
#[test]
fn test_end_user_capabilities_drive_action_approval() {
    let permissions = resolve(json!({
        "perDataset": {
            "DS_1": {
                "type": "end-user",
                "actionAuthorization": {
                    "studyMetadata": true,
                    "subsetting": true,
                    "visualizations": true,
                    "resultsFirstPage": false,
                    "resultsAll": false
                }
            }
        }
    }));

    assert!(permissions.is_approved_for_action(&ds("DS_1"), StudyAction::Search));
    assert!(permissions.is_approved_for_action(&ds("DS_1"), StudyAction::Analysis));
    assert!(permissions.is_approved_for_action(&ds("DS_1"), StudyAction::RecordPage));
    assert!(!permissions.is_approved_for_action(&ds("DS_1"), StudyAction::Results));
    assert!(!permissions.is_approved_for_action(&ds("DS_1"), StudyAction::Paginate));
    assert!(!permissions.is_approved_for_action(&ds("DS_1"), StudyAction::Download));

    assert!(!permissions.is_fully_approved_for_study(&ds("DS_1")));
    assert!(!permissions.can_access_dashboard(&ds("DS_1")));
    assert!(!permissions.can_update_approval_status(&ds("DS_1")));
}

/// Omitted capability fields default to denied.
#[test]
fn test_omitted_capabilities_default_to_denied() {
    let permissions = resolve(json!({
        "perDataset": {
            "DS_1": {
                "type": "end-user",
                "actionAuthorization": { "subsetting": true }
            }
        }
    }));

    assert!(permissions.is_approved_for_action(&ds("DS_1"), StudyAction::Search));
    for action in [
        StudyAction::Analysis,
        StudyAction::Results,
        StudyAction::RecordPage,
        StudyAction::Download,
    ] {
        assert!(
            !permissions.is_approved_for_action(&ds("DS_1"), action),
            "{action} should default to denied"
        );
    }
}

/// A dataset the payload never mentions denies and hides everything.
#[test]
fn test_unmentioned_dataset_denies_and_hides() {
    let permissions = resolve(json!({ "perDataset": {} }));

    for action in StudyAction::ALL {
        assert!(!permissions.is_approved_for_action(&ds("DS_1"), action));
    }
    assert!(!permissions.can_access_dashboard(&ds("DS_1")));
    assert!(!permissions.should_display_providers_table(&ds("DS_1")));
    assert!(!permissions.should_display_end_users_table(&ds("DS_1")));
}
