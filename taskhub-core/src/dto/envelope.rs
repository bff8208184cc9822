//! Response envelopes
//!
//! The backend wraps every payload in `{ success, message, data }`; list
//! endpoints add a `pagination` object next to `data`.

use serde::{Deserialize, Serialize};

use super::pagination::{Page, PaginationMeta};

/// Envelope around a single payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Envelope around one page of a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> From<PagedResponse<T>> for Page<T> {
    fn from(response: PagedResponse<T>) -> Self {
        Page::new(response.data, response.pagination)
    }
}

/// Body of a failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(alias = "error")]
    pub message: String,
}

fn default_success() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;

    #[test]
    fn test_paged_response_into_page() {
        let json = r#"{
            "success": true,
            "data": [
                {"_id": "d1", "name": "Engineering"},
                {"_id": "d2", "name": "Sales", "employeeCount": 4}
            ],
            "pagination": {"page": 1, "limit": 2, "total": 3, "totalPages": 2, "hasNextPage": true, "hasPrevPage": false}
        }"#;

        let response: PagedResponse<Department> = serde_json::from_str(json).unwrap();
        let page: Page<Department> = response.into();
        assert_eq!(page.len(), 2);
        assert_eq!(page.items[1].employee_count, Some(4));
        assert!(page.meta.has_next_page);
    }

    #[test]
    fn test_error_body_accepts_error_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Email already registered"}"#).unwrap();
        assert_eq!(body.message, "Email already registered");
        assert!(!body.success);
    }

    #[test]
    fn test_success_defaults_to_true() {
        let response: ApiResponse<u32> = serde_json::from_str(r#"{"data": 7}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.data, 7);
    }
}
