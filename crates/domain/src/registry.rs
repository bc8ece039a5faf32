//! Default permission grants per role.
//!
//! The table is process-wide constant data. There is deliberately no way to
//! rebind it at runtime; schema changes ship as code changes and existing
//! records catch up through resolver healing.

use crate::permission_set::PermissionSet;
use crate::security::{Permission, Role};

const MEMBER_DEFAULTS: &[Permission] = &[
    Permission::SubmitWishes,
    Permission::ViewCalendar,
    Permission::ViewReports,
    Permission::ManageReports,
];

const USER_DEFAULTS: &[Permission] = &[Permission::SubmitWishes];

/// Permissions every ADMIN record must contain. Losing these would lock
/// administrators out of role management itself.
const ADMIN_MANDATORY: &[Permission] = &[Permission::ManageRoles, Permission::ManageWishes];

/// Returns the default permission set for a role.
///
/// Pure and total: every role maps to a non-empty canonical set.
#[must_use]
pub fn defaults_for(role: Role) -> PermissionSet {
    match role {
        Role::Admin => Permission::all().iter().copied().collect(),
        Role::Member => MEMBER_DEFAULTS.iter().copied().collect(),
        Role::User => USER_DEFAULTS.iter().copied().collect(),
    }
}

/// Returns the permissions a stored record for `role` must always contain.
///
/// Only ADMIN carries a mandatory subset today. MEMBER and USER records are
/// not protected against an administrator stripping their defaults.
#[must_use]
pub fn mandatory_for(role: Role) -> PermissionSet {
    match role {
        Role::Admin => ADMIN_MANDATORY.iter().copied().collect(),
        Role::Member | Role::User => PermissionSet::new(),
    }
}
