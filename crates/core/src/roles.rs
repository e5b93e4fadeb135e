//! The closed set of user roles.
//!
//! Role names are stored as lowercase text in the `users.role` column and
//! travel inside access tokens in the same form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CONSUMER: &str = "consumer";
pub const ROLE_ELECTRICIAN: &str = "electrician";
pub const ROLE_LINEMAN: &str = "lineman";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_CONSUMER, ROLE_ELECTRICIAN, ROLE_LINEMAN, ROLE_ADMIN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Consumer,
    Electrician,
    Lineman,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Consumer => ROLE_CONSUMER,
            Role::Electrician => ROLE_ELECTRICIAN,
            Role::Lineman => ROLE_LINEMAN,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Field staff: the roles that work the electrician surface.
    pub fn is_field_staff(self) -> bool {
        match self {
            Role::Electrician | Role::Lineman => true,
            Role::Consumer | Role::Admin => false,
        }
    }

    /// Roles a new account may pick for itself at signup.
    pub fn is_self_assignable(self) -> bool {
        match self {
            Role::Consumer | Role::Electrician | Role::Lineman => true,
            Role::Admin => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_CONSUMER => Ok(Role::Consumer),
            ROLE_ELECTRICIAN => Ok(Role::Electrician),
            ROLE_LINEMAN => Ok(Role::Lineman),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate the only self-service role change: a consumer becoming an electrician.
pub fn validate_self_promotion(current: Role) -> Result<Role, CoreError> {
    match current {
        Role::Consumer => Ok(Role::Electrician),
        Role::Electrician => Err(CoreError::Validation(
            "Account is already an electrician".into(),
        )),
        Role::Lineman | Role::Admin => Err(CoreError::Validation(format!(
            "Role '{current}' cannot switch to electrician"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_round_trips_through_its_name() {
        for name in VALID_ROLES {
            let role: Role = name.parse().expect("known role should parse");
            assert_eq!(role.as_str(), *name);
        }
    }

    #[test]
    fn unknown_and_miscased_roles_are_rejected() {
        assert!("".parse::<Role>().is_err());
        assert!("Electrician".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn field_staff_are_electricians_and_linemen() {
        assert!(Role::Electrician.is_field_staff());
        assert!(Role::Lineman.is_field_staff());
        assert!(!Role::Consumer.is_field_staff());
        assert!(!Role::Admin.is_field_staff());
    }

    #[test]
    fn admin_cannot_be_picked_at_signup() {
        assert!(!Role::Admin.is_self_assignable());
        assert!(Role::Lineman.is_self_assignable());
    }

    #[test]
    fn only_consumers_can_self_promote() {
        assert_eq!(validate_self_promotion(Role::Consumer).unwrap(), Role::Electrician);
        assert!(validate_self_promotion(Role::Electrician).is_err());
        assert!(validate_self_promotion(Role::Lineman).is_err());
        assert!(validate_self_promotion(Role::Admin).is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Lineman).unwrap(), "\"lineman\"");
        let parsed: Role = serde_json::from_str("\"consumer\"").unwrap();
        assert_eq!(parsed, Role::Consumer);
    }
}
