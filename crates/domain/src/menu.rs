//! Declarative navigation entries filtered by effective permissions.
//!
//! Navigation used to splice role-specific links into an array at render
//! time; entries now carry an optional permission tag and a single pure
//! filter decides visibility.

use serde::{Deserialize, Serialize};

use crate::permission_set::PermissionSet;
use crate::security::Permission;

/// One navigation or action entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Stable entry identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Target path.
    pub path: String,
    /// Permission required to see the entry; `None` means always visible.
    pub required_permission: Option<Permission>,
}

impl MenuEntry {
    /// Creates an entry visible to everyone.
    #[must_use]
    pub fn public(id: &str, label: &str, path: &str) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
            path: path.to_owned(),
            required_permission: None,
        }
    }

    /// Creates an entry gated by a permission.
    #[must_use]
    pub fn gated(id: &str, label: &str, path: &str, permission: Permission) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
            path: path.to_owned(),
            required_permission: Some(permission),
        }
    }
}

/// Filters entries down to what the effective set allows.
///
/// Input ordering is preserved. Untagged entries always pass.
#[must_use]
pub fn visible_entries(entries: &[MenuEntry], effective: &PermissionSet) -> Vec<MenuEntry> {
    entries
        .iter()
        .filter(|entry| {
            entry
                .required_permission
                .is_none_or(|permission| effective.contains(permission))
        })
        .cloned()
        .collect()
}

/// Returns the default site navigation with permission tags.
#[must_use]
pub fn default_navigation() -> Vec<MenuEntry> {
    vec![
        MenuEntry::public("home", "Home", "/"),
        MenuEntry::public("teams", "Teams", "/teams"),
        MenuEntry::public("events", "Events", "/events"),
        MenuEntry::gated("calendar", "Visit Calendar", "/calendar", Permission::ViewCalendar),
        MenuEntry::public("projects", "Projects", "/projects"),
        MenuEntry::gated("reports", "Reports", "/reports", Permission::ViewReports),
        MenuEntry::public("support", "Support", "/support"),
        MenuEntry::public("about", "About", "/about"),
        MenuEntry::public("contact", "Contact", "/contact"),
    ]
}
