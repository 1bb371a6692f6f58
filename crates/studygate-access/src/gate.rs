//! The restriction gate.
//!
//! [`RestrictionGate`] evaluates action attempts. Each evaluation fetches
//! the current user and the study catalog concurrently, resolves
//! permissions through the navigation-scoped cache, and produces exactly
//! one [`RestrictionOutcome`], firing at most one of the attempt's
//! callbacks.

use std::sync::Arc;

use studygate_core::{PortalUser, StudyAction, StudyCatalog, StudyId};
use tracing::{debug, warn};

use crate::cache::ScopedCache;
use crate::config::GateConfig;
use crate::error::AccessResult;
use crate::notice::RestrictionNotice;
use crate::outcome::RestrictionOutcome;
use crate::permissions::UserPermissions;
use crate::source::{AccessDataSource, SourceError};

/// Hook invoked with the final outcome of an attempt.
pub type OutcomeCallback = Box<dyn FnOnce(&RestrictionOutcome) + Send>;

/// One attempted action: the target study plus optional outcome hooks.
///
/// `on_allow` fires for outcomes that let the action proceed, including
/// unknown studies; `on_deny` fires for restricted outcomes. Evaluation
/// fires at most one of them, exactly once.
pub struct ActionAttempt {
    study_id: StudyId,
    on_allow: Option<OutcomeCallback>,
    on_deny: Option<OutcomeCallback>,
}

impl ActionAttempt {
    /// An attempt against `study_id` with no hooks.
    pub fn new(study_id: impl Into<StudyId>) -> Self {
        Self {
            study_id: study_id.into(),
            on_allow: None,
            on_deny: None,
        }
    }

    /// Set the hook fired when the action is allowed.
    #[must_use]
    pub fn on_allow(mut self, hook: impl FnOnce(&RestrictionOutcome) + Send + 'static) -> Self {
        self.on_allow = Some(Box::new(hook));
        self
    }

    /// Set the hook fired when the action is denied.
    #[must_use]
    pub fn on_deny(mut self, hook: impl FnOnce(&RestrictionOutcome) + Send + 'static) -> Self {
        self.on_deny = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for ActionAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionAttempt")
            .field("study_id", &self.study_id)
            .field("has_on_allow", &self.on_allow.is_some())
            .field("has_on_deny", &self.on_deny.is_some())
            .finish()
    }
}

/// Evaluates action attempts against the catalog and the user's
/// permissions.
pub struct RestrictionGate {
    source: Arc<dyn AccessDataSource>,
    config: GateConfig,
    permissions: ScopedCache<UserPermissions>,
}

impl RestrictionGate {
    /// Gate over `source` with explicit configuration.
    #[must_use]
    pub fn new(source: Arc<dyn AccessDataSource>, config: GateConfig) -> Self {
        if config.restriction_override {
            warn!("restriction override enabled; every action will be allowed");
        }
        Self {
            source,
            config,
            permissions: ScopedCache::new(),
        }
    }

    /// Gate over `source` with default configuration.
    #[must_use]
    pub fn with_defaults(source: Arc<dyn AccessDataSource>) -> Self {
        Self::new(source, GateConfig::default())
    }

    /// The configuration this gate runs under.
    #[must_use]
    pub const fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate `action` against the attempt's study.
    ///
    /// `navigation_key` scopes the permissions cache: attempts sharing a
    /// key reuse one permissions fetch, and a new key forces a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`](crate::AccessError) if a data-source
    /// fetch fails. Neither hook runs in that case.
    pub async fn attempt(
        &self,
        action: StudyAction,
        attempt: ActionAttempt,
        navigation_key: &str,
    ) -> AccessResult<RestrictionOutcome> {
        let ActionAttempt {
            study_id,
            on_allow,
            on_deny,
        } = attempt;

        let (user, catalog) =
            tokio::try_join!(self.source.current_user(), self.fetch_catalog())?;
        let permissions = self.resolve_permissions(&user, navigation_key).await?;

        let outcome = match catalog.find(&study_id) {
            None => {
                warn!(study = %study_id, %action, "allowing action for unknown study");
                RestrictionOutcome::Cleared { study_id, action }
            },
            Some(study) => {
                let allowed = self.config.restriction_override
                    || permissions.is_approved_for_action(&study.id, action);
                if allowed {
                    debug!(study = %study.id, %action, "action allowed");
                    RestrictionOutcome::Unrestricted {
                        study: study.clone(),
                        action,
                    }
                } else {
                    debug!(study = %study.id, %action, "action restricted");
                    let notice = RestrictionNotice::compose(study, action, &user, &permissions);
                    RestrictionOutcome::Restricted {
                        study: study.clone(),
                        action,
                        notice,
                    }
                }
            },
        };

        if outcome.allows() {
            if let Some(hook) = on_allow {
                hook(&outcome);
            }
        } else if let Some(hook) = on_deny {
            hook(&outcome);
        }
        Ok(outcome)
    }

    /// Drop any cached permissions, forcing the next attempt to re-fetch.
    pub async fn invalidate_permissions(&self) {
        self.permissions.clear().await;
    }

    async fn fetch_catalog(&self) -> Result<StudyCatalog, SourceError> {
        let records = self.source.study_records().await?;
        Ok(StudyCatalog::from_records(records, self.config.catalog))
    }

    async fn resolve_permissions(
        &self,
        user: &PortalUser,
        navigation_key: &str,
    ) -> Result<Arc<UserPermissions>, SourceError> {
        if !user.uses_study_approvals() {
            debug!(
                user = user.id,
                "portal tracks no study approvals; treating every dataset as granted"
            );
            return Ok(Arc::new(UserPermissions::unrestricted()));
        }
        let source = Arc::clone(&self.source);
        self.permissions
            .get_or_fetch(navigation_key, move || async move {
                source
                    .permissions()
                    .await
                    .map(UserPermissions::from_response)
            })
            .await
    }
}

impl std::fmt::Debug for RestrictionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestrictionGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
