use super::*;

use wishboard_domain::RolePermissions;

impl PermissionService {
    /// Seeds a default record for every role that has none yet.
    ///
    /// Idempotent: an existing record is never touched, so administrator
    /// customization survives repeated calls. Concurrent invocations are
    /// resolved by the store's atomic per-role upsert.
    pub async fn ensure_initialized(&self) -> AppResult<()> {
        for role in Role::all() {
            if self.repository.find(*role).await?.is_none() {
                self.repository
                    .upsert(*role, &defaults_for(*role))
                    .await?;
                tracing::info!(role = role.as_str(), "created default permission record");
            }
        }

        Ok(())
    }

    /// Force-writes registry defaults for every role.
    ///
    /// Unlike [`Self::ensure_initialized`] this replaces existing records.
    /// Intended for first-deploy seeding and reset tooling only.
    pub async fn seed_defaults(&self) -> AppResult<()> {
        for role in Role::all() {
            self.repository
                .upsert(*role, &defaults_for(*role))
                .await?;
            tracing::info!(role = role.as_str(), "seeded default permission record");
        }

        Ok(())
    }

    /// Returns every role's stored record for administrative display.
    ///
    /// Missing records are created with defaults first, so the listing is
    /// always complete.
    pub async fn role_permissions(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<Vec<RolePermissions>> {
        self.require_permission(Some(actor), Permission::ManageRoles)
            .await?;

        self.ensure_initialized().await?;
        self.repository.list_all().await
    }

    /// Replaces a role's permission set.
    ///
    /// An update that would strip role management from ADMIN is rejected
    /// before anything is written; the read-time repair in
    /// [`Self::resolve`] is a second, independent line of defense.
    pub async fn update_role_permissions(
        &self,
        actor: &UserIdentity,
        role: Role,
        permissions: PermissionSet,
    ) -> AppResult<()> {
        self.require_permission(Some(actor), Permission::ManageRoles)
            .await?;

        if role == Role::Admin && !permissions.contains(Permission::ManageRoles) {
            return Err(AppError::Validation(
                "cannot remove role management permission from the ADMIN role".to_owned(),
            ));
        }

        self.repository.upsert(role, &permissions).await
    }
}
