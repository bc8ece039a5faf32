use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::security::{Permission, Role};

/// A set of canonical permissions with deterministic iteration order.
///
/// Stored permission lists historically allowed duplicates and free-form
/// strings; this type admits canonical tokens only, so garbage can exist in
/// storage but never in an effective set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns whether the set grants the permission.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Returns whether every permission in `other` is also in this set.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Adds a permission to the set.
    pub fn insert(&mut self, permission: Permission) {
        self.0.insert(permission);
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of granted permissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates permissions in stable order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// Returns the storage values for every permission, in stable order.
    #[must_use]
    pub fn to_storage_tokens(&self) -> Vec<String> {
        self.iter()
            .map(|permission| permission.as_str().to_owned())
            .collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::collections::btree_set::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The persisted permission record for one role.
///
/// `unknown_tokens` carries stored values that failed canonical decoding.
/// They never enter the effective set; the resolver treats their presence as
/// a stale record and repairs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissions {
    /// Role this record belongs to.
    pub role: Role,
    /// Decoded canonical permissions.
    pub permissions: PermissionSet,
    /// Stored tokens outside the canonical set, in storage order.
    pub unknown_tokens: Vec<String>,
}

impl RolePermissions {
    /// Creates a clean record from canonical permissions.
    #[must_use]
    pub fn new(role: Role, permissions: PermissionSet) -> Self {
        Self {
            role,
            permissions,
            unknown_tokens: Vec::new(),
        }
    }

    /// Decodes a record from raw storage tokens.
    ///
    /// Canonical tokens land in `permissions`, everything else in
    /// `unknown_tokens`. Duplicates collapse silently.
    #[must_use]
    pub fn from_stored_tokens<I>(role: Role, tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut permissions = PermissionSet::new();
        let mut unknown_tokens = Vec::new();

        for token in tokens {
            match token.as_ref().parse::<Permission>() {
                Ok(permission) => permissions.insert(permission),
                Err(_) => unknown_tokens.push(token.as_ref().to_owned()),
            }
        }

        Self {
            role,
            permissions,
            unknown_tokens,
        }
    }

    /// Returns whether the record holds canonical tokens only.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.unknown_tokens.is_empty()
    }
}
