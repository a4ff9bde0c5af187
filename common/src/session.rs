use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Employer,
    JobSeeker,
    Other(String),
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "Employer" => Role::Employer,
            "Job Seeker" => Role::JobSeeker,
            _ => Role::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Role::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employer => f.write_str("Employer"),
            Role::JobSeeker => f.write_str("Job Seeker"),
            Role::Other(role) => f.write_str(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub role: Role,
}

/// Session snapshot handed to the view when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authorized: bool,
    pub user: Option<User>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(role: impl Into<Role>) -> Self {
        Self {
            is_authorized: true,
            user: Some(User { role: role.into() }),
        }
    }

    /// Authorized and holding the Employer role.
    pub fn is_employer(&self) -> bool {
        self.is_authorized && self.user.as_ref().is_some_and(|u| u.role == Role::Employer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_wire_name() {
        assert_eq!(Role::from("Employer"), Role::Employer);
        assert_eq!(Role::from("Job Seeker"), Role::JobSeeker);
        assert_eq!(Role::from("Admin"), Role::Other("Admin".to_string()));
    }

    #[test]
    fn test_employer_requires_authorization() {
        let mut auth = AuthState::signed_in(Role::Employer);
        assert!(auth.is_employer());
        auth.is_authorized = false;
        assert!(!auth.is_employer());
        assert!(!AuthState::signed_in("Job Seeker").is_employer());
        assert!(
            !AuthState {
                is_authorized: true,
                user: None
            }
            .is_employer()
        );
    }
}
