use std::str::FromStr;

use async_trait::async_trait;

use wishboard_application::RolePermissionRepository;
use wishboard_core::{AppError, AppResult};
use wishboard_domain::{PermissionSet, Role, RolePermissions};

use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed repository for per-role permission records.
///
/// Backed by the `role_permissions` table with `role` as primary key; the
/// `ON CONFLICT` upsert makes concurrent create-if-absent calls collapse
/// into one record.
#[derive(Clone)]
pub struct PostgresRolePermissionRepository {
    pool: PgPool,
}

impl PostgresRolePermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RolePermissionRow {
    role: String,
    permissions: Json<Vec<String>>,
}

impl RolePermissionRow {
    fn decode(self) -> AppResult<RolePermissions> {
        let role = Role::from_str(self.role.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode role '{}' in role_permissions: {error}",
                self.role
            ))
        })?;

        // Unknown permission tokens are kept on the record, not rejected;
        // the resolver repairs them on read.
        Ok(RolePermissions::from_stored_tokens(role, self.permissions.0))
    }
}

#[async_trait]
impl RolePermissionRepository for PostgresRolePermissionRepository {
    async fn find(&self, role: Role) -> AppResult<Option<RolePermissions>> {
        let row = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT role, permissions
            FROM role_permissions
            WHERE role = $1
            "#,
        )
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to load permission record: {error}"))
        })?;

        row.map(RolePermissionRow::decode).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<RolePermissions>> {
        let rows = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT role, permissions
            FROM role_permissions
            ORDER BY role ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to list permission records: {error}"))
        })?;

        rows.into_iter().map(RolePermissionRow::decode).collect()
    }

    async fn upsert(&self, role: Role, permissions: &PermissionSet) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO role_permissions (role, permissions, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (role)
            DO UPDATE SET permissions = EXCLUDED.permissions, updated_at = now()
            "#,
        )
        .bind(role.as_str())
        .bind(Json(permissions.to_storage_tokens()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to upsert permission record: {error}"))
        })?;

        Ok(())
    }
}
