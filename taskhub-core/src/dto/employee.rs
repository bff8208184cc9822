//! Employee DTOs

use serde::{Deserialize, Serialize};

use super::validate;
use crate::error::ValidationError;

/// Request to create an employee account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

impl CreateEmployee {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("name", &self.name)?;
        validate::email("email", &self.email)?;
        validate::password("password", &self.password)
    }
}

/// Partial update of an employee
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

impl UpdateEmployee {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::optional_required("name", self.name.as_deref())?;
        match &self.email {
            Some(email) => validate::email("email", email),
            None => Ok(()),
        }
    }
}

/// Filters accepted by `GET /employees`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFilter {
    pub department_id: Option<String>,
    pub manager_id: Option<String>,
}

impl EmployeeFilter {
    pub fn department(department_id: impl Into<String>) -> Self {
        Self {
            department_id: Some(department_id.into()),
            manager_id: None,
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.department_id {
            query.push(("departmentId", id.clone()));
        }
        if let Some(id) = &self.manager_id {
            query.push(("managerId", id.clone()));
        }
        query
    }
}
