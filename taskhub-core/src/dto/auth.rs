//! Authentication DTOs

use serde::{Deserialize, Serialize};

use super::validate;
use crate::domain::AuthUser;
use crate::error::ValidationError;

/// Credentials for `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::email("email", &self.email)?;
        validate::required("password", &self.password)
    }
}

/// Admin self-registration for `POST /auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("name", &self.name)?;
        validate::email("email", &self.email)?;
        validate::password("password", &self.password)
    }
}

/// Token and user returned by login and signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: "boss@corp.io".into(),
            password: "x".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "boss".into(),
            password: "secret".into(),
        };
        assert_eq!(bad.validate().unwrap_err().field, "email");
    }

    #[test]
    fn test_signup_requires_strong_enough_password() {
        let req = SignupRequest {
            name: "Ada".into(),
            email: "ada@corp.io".into(),
            password: "abc".into(),
            phone: None,
        };
        assert_eq!(req.validate().unwrap_err().field, "password");
    }

    #[test]
    fn test_auth_response_parsing() {
        let json = r#"{"token":"jwt","user":{"id":"u1","name":"Ada","email":"ada@corp.io","role":"manager","departmentId":"d1"}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.role, crate::domain::Role::Manager);
        assert_eq!(response.user.department_id.as_deref(), Some("d1"));
    }
}
