use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use wishboard_application::RolePermissionRepository;
use wishboard_core::AppResult;
use wishboard_domain::{PermissionSet, Role, RolePermissions};

/// In-memory role permission repository implementation.
///
/// Records are kept as raw storage tokens, like the database column, so
/// legacy values can be seeded and observed in tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryRolePermissionRepository {
    records: RwLock<BTreeMap<Role, Vec<String>>>,
}

impl InMemoryRolePermissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Writes raw storage tokens for a role, bypassing canonical validation.
    ///
    /// Exists to simulate records written by older schema versions.
    pub async fn insert_raw_tokens(&self, role: Role, tokens: Vec<String>) {
        self.records.write().await.insert(role, tokens);
    }
}

#[async_trait]
impl RolePermissionRepository for InMemoryRolePermissionRepository {
    async fn find(&self, role: Role) -> AppResult<Option<RolePermissions>> {
        Ok(self
            .records
            .read()
            .await
            .get(&role)
            .map(|tokens| RolePermissions::from_stored_tokens(role, tokens)))
    }

    async fn list_all(&self) -> AppResult<Vec<RolePermissions>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .map(|(role, tokens)| RolePermissions::from_stored_tokens(*role, tokens))
            .collect())
    }

    async fn upsert(&self, role: Role, permissions: &PermissionSet) -> AppResult<()> {
        self.records
            .write()
            .await
            .insert(role, permissions.to_storage_tokens());
        Ok(())
    }
}
