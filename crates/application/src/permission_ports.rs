use async_trait::async_trait;

use wishboard_core::AppResult;
use wishboard_domain::{PermissionSet, Role, RolePermissions};

/// Repository port for per-role permission records.
///
/// The store holds at most one record per role. `upsert` must be atomic per
/// role so two concurrent create-if-absent calls cannot produce duplicates.
#[async_trait]
pub trait RolePermissionRepository: Send + Sync {
    /// Returns the stored record for a role, if one exists.
    async fn find(&self, role: Role) -> AppResult<Option<RolePermissions>>;

    /// Lists all stored records ordered by role.
    async fn list_all(&self) -> AppResult<Vec<RolePermissions>>;

    /// Creates or fully replaces the record for a role.
    async fn upsert(&self, role: Role, permissions: &PermissionSet) -> AppResult<()>;
}
