//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod database;
mod in_memory_role_permission_repository;
mod postgres_role_permission_repository;

pub use database::connect_and_migrate;
pub use in_memory_role_permission_repository::InMemoryRolePermissionRepository;
pub use postgres_role_permission_repository::PostgresRolePermissionRepository;
