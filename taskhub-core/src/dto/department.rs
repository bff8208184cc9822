//! Department DTOs

use serde::{Deserialize, Serialize};

use super::validate;
use crate::error::ValidationError;

/// Request to create a department
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

impl CreateDepartment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("name", &self.name)
    }
}

/// Partial update of a department; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

impl UpdateDepartment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::optional_required("name", self.name.as_deref())
    }
}
