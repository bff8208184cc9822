//! Manager DTOs

use serde::{Deserialize, Serialize};

use super::validate;
use crate::error::ValidationError;

/// Request to create a manager account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateManager {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl CreateManager {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("name", &self.name)?;
        validate::email("email", &self.email)?;
        validate::password("password", &self.password)
    }
}

/// Partial update of a manager
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManager {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl UpdateManager {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::optional_required("name", self.name.as_deref())?;
        match &self.email {
            Some(email) => validate::email("email", email),
            None => Ok(()),
        }
    }
}
