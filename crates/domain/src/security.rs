use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wishboard_core::AppError;

/// Fixed actor categories. Exactly one permission record may exist per role.
///
/// Derive order doubles as the display order for administrative listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Approved volunteer team member.
    Member,
    /// Regular registered user.
    User,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
            Self::User => "USER",
        }
    }

    /// Returns all defined roles in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Admin, Role::Member, Role::User];

        ALL
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "MEMBER" => Ok(Self::Member),
            "USER" => Ok(Self::User),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

/// Capability tokens enforced by application policy checks.
///
/// The variants form the canonical token set. Storage values are
/// case-sensitive; anything else found in a stored record is treated as a
/// legacy token and repaired by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Allows moderating wish submissions.
    ManageWishes,
    /// Allows managing events.
    ManageEvents,
    /// Allows managing projects.
    ManageProjects,
    /// Allows managing volunteer teams.
    ManageTeams,
    /// Allows managing support packages.
    ManageSupport,
    /// Allows handling feedback entries.
    ManageFeedback,
    /// Allows handling contact messages.
    ManageMessages,
    /// Allows managing visit reports.
    ManageReports,
    /// Allows managing user accounts.
    ManageUsers,
    /// Allows editing role permission sets.
    ManageRoles,
    /// Allows editing site settings.
    ManageSettings,
    /// Allows opening the admin dashboard.
    ViewDashboard,
    /// Allows viewing the visit calendar.
    ViewCalendar,
    /// Allows reading visit reports.
    ViewReports,
    /// Allows submitting wishes.
    SubmitWishes,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageWishes => "MANAGE_WISHES",
            Self::ManageEvents => "MANAGE_EVENTS",
            Self::ManageProjects => "MANAGE_PROJECTS",
            Self::ManageTeams => "MANAGE_TEAMS",
            Self::ManageSupport => "MANAGE_SUPPORT",
            Self::ManageFeedback => "MANAGE_FEEDBACK",
            Self::ManageMessages => "MANAGE_MESSAGES",
            Self::ManageReports => "MANAGE_REPORTS",
            Self::ManageUsers => "MANAGE_USERS",
            Self::ManageRoles => "MANAGE_ROLES",
            Self::ManageSettings => "MANAGE_SETTINGS",
            Self::ViewDashboard => "VIEW_DASHBOARD",
            Self::ViewCalendar => "VIEW_CALENDAR",
            Self::ViewReports => "VIEW_REPORTS",
            Self::SubmitWishes => "SUBMIT_WISHES",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ManageWishes,
            Permission::ManageEvents,
            Permission::ManageProjects,
            Permission::ManageTeams,
            Permission::ManageSupport,
            Permission::ManageFeedback,
            Permission::ManageMessages,
            Permission::ManageReports,
            Permission::ManageUsers,
            Permission::ManageRoles,
            Permission::ManageSettings,
            Permission::ViewDashboard,
            Permission::ViewCalendar,
            Permission::ViewReports,
            Permission::SubmitWishes,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|permission| permission.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}
