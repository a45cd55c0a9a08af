//! User roles.
//!
//! Stored and serialized with the labels used by the factory floor UI
//! (`Operador`, `Supervisor`, `Administrador`). English spellings are
//! accepted on input.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_OPERATOR: &str = "Operador";
pub const ROLE_SUPERVISOR: &str = "Supervisor";
pub const ROLE_ADMIN: &str = "Administrador";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "Operador", alias = "Operator", alias = "operador", alias = "operator")]
    Operator,
    #[serde(rename = "Supervisor", alias = "supervisor")]
    Supervisor,
    #[serde(
        rename = "Administrador",
        alias = "Admin",
        alias = "admin",
        alias = "administrador"
    )]
    Admin,
}

impl Role {
    /// Label stored in the `tipo` column and embedded in tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operator => ROLE_OPERATOR,
            Self::Supervisor => ROLE_SUPERVISOR,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a role label, case-insensitively, in either language.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "operador" | "operator" => Some(Self::Operator),
            "supervisor" => Some(Self::Supervisor),
            "administrador" | "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_operator() {
        assert_eq!(Role::default(), Role::Operator);
        assert_eq!(Role::default().as_str(), "Operador");
    }

    #[test]
    fn english_aliases_are_accepted() {
        let role: Role = serde_json::from_str("\"Operator\"").unwrap();
        assert_eq!(role, Role::Operator);
        let role: Role = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn serializes_with_floor_labels() {
        assert_eq!(
            serde_json::to_string(&Role::Admin).unwrap(),
            "\"Administrador\""
        );
        assert_eq!(Role::Supervisor.to_string(), "Supervisor");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse(" SUPERVISOR "), Some(Role::Supervisor));
        assert_eq!(Role::parse("administrador"), Some(Role::Admin));
        assert_eq!(Role::parse("Janitor"), None);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"Janitor\"").is_err());
    }
}
