//! Studygate Core - Foundation types for the studygate data-restriction gate.
//!
//! This crate provides:
//! - The closed set of gated user actions and the capability categories they map to
//! - Per-dataset permission records as the study-access service serializes them
//! - The approval-status workflow table for access requests
//! - Study records, restriction levels, and dataset identifiers
//! - The validated study catalog with invalid-record reporting
//! - Portal users as the gate sees them
//!
//! Everything here is pure and synchronous. Evaluation, caching, and the
//! data-source seam live in `studygate-access`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod action;
pub mod catalog;
pub mod error;
pub mod permission;
pub mod study;
pub mod user;

pub use action::{ActionCategory, StudyAction};
pub use catalog::{CatalogOptions, InvalidRecord, StudyCatalog, StudyRecord};
pub use error::{CatalogError, CatalogResult};
pub use permission::{
    ActionAuthorization, ApprovalStatus, DatasetPermissionEntry, PermissionsResponse,
};
pub use study::{RestrictionLevel, Study, StudyId};
pub use user::PortalUser;
