//! User accounts and their roles.
//!
//! The store keeps users like any other record and never checks roles on its
//! own operations. [`Role`] is ordered by tier so an interface layer can gate
//! its commands with a plain comparison.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{EngineError, FieldRejection, UserId, collection::Record, util::Patcher};

/// Id of the administrator seeded at startup. It can never be deleted.
pub const SEEDED_ADMIN_ID: &str = "admin1";
/// Username of the seeded administrator.
pub const SEEDED_ADMIN_USERNAME: &str = "admin";
/// Password of the seeded administrator unless configured otherwise.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Role tiers, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Coordinator,
    Manager,
    Administrator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Coordinator, Role::Manager, Role::Administrator];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Coordinator => "coordinator",
            Role::Manager => "manager",
            Role::Administrator => "administrator",
        }
    }

    /// `true` when this role is at least `required`.
    pub fn allows(self, required: Role) -> bool {
        self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "coordinator" => Ok(Role::Coordinator),
            "manager" => Ok(Role::Manager),
            "administrator" => Ok(Role::Administrator),
            other => Err(EngineError::InvalidRole(format!(
                "{other} (expected coordinator, manager or administrator)"
            ))),
        }
    }
}

/// An account. The password is kept as plain text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub role: Role,
    pub username: String,
    pub password: String,
}

/// Partial update of a [`User`]. `None` leaves the field as it is.
#[derive(Clone, Debug, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl User {
    pub(crate) fn new(id: UserId, fields: NewUser) -> Self {
        Self {
            id,
            username: fields.username,
            password: fields.password,
            role: fields.role,
        }
    }

    pub(crate) fn seeded_admin(password: String) -> Self {
        Self {
            id: UserId::from(SEEDED_ADMIN_ID),
            username: SEEDED_ADMIN_USERNAME.to_string(),
            password,
            role: Role::Administrator,
        }
    }

    pub(crate) fn apply(&mut self, patch: UserPatch) -> Vec<FieldRejection> {
        let mut patcher = Patcher::default();
        patcher.text(&mut self.username, patch.username);
        patcher.text(&mut self.password, patch.password);
        patcher.parsed(&mut self.role, patch.role, |raw| {
            raw.parse::<Role>()
                .map_err(|err| FieldRejection::new("role", err.to_string()))
        });
        patcher.finish()
    }

    pub fn is_seeded_admin(&self) -> bool {
        self.id.as_str() == SEEDED_ADMIN_ID
    }
}

impl Record for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_ordered_by_tier() {
        assert!(Role::Administrator.allows(Role::Manager));
        assert!(Role::Manager.allows(Role::Coordinator));
        assert!(Role::Manager.allows(Role::Manager));
        assert!(!Role::Coordinator.allows(Role::Manager));
    }

    #[test]
    fn parse_role() {
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!(" Administrator ".parse::<Role>().unwrap(), Role::Administrator);
        assert!(matches!(
            "invalid_role".parse::<Role>(),
            Err(EngineError::InvalidRole(_))
        ));
    }

    #[test]
    fn password_is_not_serialized() {
        let user = User::seeded_admin(DEFAULT_ADMIN_PASSWORD.to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains(DEFAULT_ADMIN_PASSWORD));
        assert!(json.contains("\"role\":\"administrator\""));
    }

    #[test]
    fn invalid_role_update_keeps_role() {
        let mut user = User::new(
            UserId::from("u1"),
            NewUser {
                role: Role::Coordinator,
                username: String::from("testuser"),
                password: String::from("password123"),
            },
        );
        let rejected = user.apply(UserPatch {
            username: Some(String::from("renamed")),
            role: Some(String::from("boss")),
            ..Default::default()
        });
        assert_eq!(user.username, "renamed");
        assert_eq!(user.role, Role::Coordinator);
        assert_eq!(rejected[0].field, "role");
    }
}
