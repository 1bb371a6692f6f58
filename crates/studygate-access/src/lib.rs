//! Studygate Access - permission resolution and the restriction gate.
//!
//! The flow, end to end:
//!
//! 1. An embedder implements [`AccessDataSource`] over its portal services
//!    and constructs a [`RestrictionGate`] with an explicit [`GateConfig`].
//! 2. UI code calls [`RestrictionGate::attempt`] with a
//!    [`StudyAction`](studygate_core::StudyAction) and an [`ActionAttempt`]
//!    carrying the study id and optional allow/deny callbacks.
//! 3. The gate fetches the current user and the study catalog in parallel,
//!    resolves [`UserPermissions`] through the navigation-scoped cache,
//!    decides, and invokes exactly one callback.
//! 4. The caller receives a [`RestrictionOutcome`]: unrestricted,
//!    restricted (with a composed [`RestrictionNotice`]), or cleared
//!    (unknown study, deliberately fail-open).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod cache;
pub mod config;
pub mod error;
pub mod gate;
pub mod notice;
pub mod outcome;
pub mod permissions;
pub mod requirement;
pub mod source;

pub use cache::ScopedCache;
pub use config::{ConfigError, GateConfig, INCLUDE_UNRELEASED_ENV, RESTRICTION_OVERRIDE_ENV};
pub use error::{AccessError, AccessResult};
pub use gate::{ActionAttempt, OutcomeCallback, RestrictionGate};
pub use notice::{AccessPrompt, RestrictionNotice};
pub use outcome::{ApprovalVerdict, RestrictionOutcome};
pub use permissions::{DatasetGrants, UserPermissions};
pub use requirement::AccessRequirement;
pub use source::{AccessDataSource, SourceError};
