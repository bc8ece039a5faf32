//! Domain entities and invariants for the authorization engine.

#![forbid(unsafe_code)]

mod identity;
mod menu;
mod permission_set;
mod registry;
mod security;

pub use identity::UserIdentity;
pub use menu::{MenuEntry, default_navigation, visible_entries};
pub use permission_set::{PermissionSet, RolePermissions};
pub use registry::{defaults_for, mandatory_for};
pub use security::{Permission, Role};
