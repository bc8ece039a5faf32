use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::security::Role;

/// User information persisted in the authenticated session.
///
/// The engine never authenticates; it only reads the role the identity
/// provider already established. Anonymous requests carry no identity at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: Uuid,
    display_name: String,
    role: Role,
}

impl UserIdentity {
    /// Creates a user identity from session data.
    #[must_use]
    pub fn new(user_id: Uuid, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role,
        }
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the role established at sign-in.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the identity carries the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
