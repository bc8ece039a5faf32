use std::sync::Arc;

use wishboard_core::{AppError, AppResult};
use wishboard_domain::{Permission, PermissionSet, Role, UserIdentity, defaults_for, mandatory_for};

use crate::RolePermissionRepository;

mod admin;

#[cfg(test)]
mod tests;

/// Outcome of an authorization check, returned as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The actor may perform the guarded action.
    Allowed,
    /// The actor must not perform the guarded action.
    Denied,
}

impl AccessDecision {
    /// Returns whether the decision permits the action.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Application service for role-based permission resolution and checks.
///
/// Resolution is request-scoped: no permission state is cached, each call
/// performs at most one store read and one store write.
#[derive(Clone)]
pub struct PermissionService {
    repository: Arc<dyn RolePermissionRepository>,
}

impl PermissionService {
    /// Creates a new service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn RolePermissionRepository>) -> Self {
        Self { repository }
    }

    /// Computes the effective permission set for a role, repairing stale
    /// records on the way.
    ///
    /// A record is stale when it carries tokens outside the canonical set or
    /// no longer covers the role's mandatory subset. Stale records are
    /// overwritten with registry defaults; if that write fails the defaults
    /// are still returned, since the caller's answer stays correct without
    /// the persisted repair.
    ///
    /// An absent record resolves to registry defaults without materializing
    /// anything.
    pub async fn resolve(&self, role: Role) -> AppResult<PermissionSet> {
        let Some(record) = self.repository.find(role).await? else {
            return Ok(defaults_for(role));
        };

        if record.is_canonical() && record.permissions.is_superset(&mandatory_for(role)) {
            return Ok(record.permissions);
        }

        let defaults = defaults_for(role);
        tracing::info!(
            role = role.as_str(),
            unknown_tokens = record.unknown_tokens.len(),
            "repairing stale permission record"
        );

        if let Err(error) = self.repository.upsert(role, &defaults).await {
            tracing::warn!(
                role = role.as_str(),
                %error,
                "could not persist permission record repair"
            );
        }

        Ok(defaults)
    }

    /// Decides whether the actor may perform an action guarded by
    /// `required`.
    ///
    /// Anonymous actors are denied without touching the store.
    /// Administrators are allowed unconditionally; the mandatory-subset
    /// invariant on the stored ADMIN record keeps that bypass meaningful.
    pub async fn authorize(
        &self,
        actor: Option<&UserIdentity>,
        required: Permission,
    ) -> AppResult<AccessDecision> {
        let Some(actor) = actor else {
            return Ok(AccessDecision::Denied);
        };

        if actor.is_admin() {
            return Ok(AccessDecision::Allowed);
        }

        let effective = self.resolve(actor.role()).await?;
        if effective.contains(required) {
            Ok(AccessDecision::Allowed)
        } else {
            Ok(AccessDecision::Denied)
        }
    }

    /// Ensures the actor may perform an action guarded by `required`.
    ///
    /// Convenience wrapper over [`Self::authorize`] for `?`-style call
    /// sites in guarded mutations.
    pub async fn require_permission(
        &self,
        actor: Option<&UserIdentity>,
        required: Permission,
    ) -> AppResult<()> {
        let Some(actor) = actor else {
            return Err(AppError::Unauthorized(
                "authentication required".to_owned(),
            ));
        };

        match self.authorize(Some(actor), required).await? {
            AccessDecision::Allowed => Ok(()),
            AccessDecision::Denied => Err(AppError::Forbidden(format!(
                "role '{}' is missing permission '{}'",
                actor.role(),
                required
            ))),
        }
    }

    /// Returns the acting user's effective permissions as an ordered list.
    ///
    /// Anonymous actors get an empty list without a store read.
    pub async fn my_permissions(
        &self,
        actor: Option<&UserIdentity>,
    ) -> AppResult<Vec<Permission>> {
        let Some(actor) = actor else {
            return Ok(Vec::new());
        };

        let effective = self.resolve(actor.role()).await?;
        Ok(effective.iter().collect())
    }

    /// Returns whether the actor currently holds the permission.
    pub async fn check_permission(
        &self,
        actor: Option<&UserIdentity>,
        required: Permission,
    ) -> AppResult<bool> {
        Ok(self.authorize(actor, required).await?.is_allowed())
    }
}
