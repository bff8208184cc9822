//! Department endpoints

use async_trait::async_trait;
use reqwest::Method;
use taskhub_core::domain::Department;
use taskhub_core::dto::department::{CreateDepartment, UpdateDepartment};
use taskhub_core::dto::{Page, PageRequest};

use crate::{TaskHubClient, segment};
use crate::api::DepartmentApi;
use crate::error::Result;

#[async_trait]
impl DepartmentApi for TaskHubClient {
    async fn list_departments(&self, page: &PageRequest) -> Result<Page<Department>> {
        let response = self
            .request(Method::GET, "/departments")
            .query(&page.to_query())
            .send()
            .await?;

        self.handle_paged(response).await
    }

    async fn get_department(&self, id: &str) -> Result<Department> {
        let response = self
            .request(Method::GET, &format!("/departments/{}", segment(id)))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_department(&self, req: &CreateDepartment) -> Result<Department> {
        let response = self
            .request(Method::POST, "/departments")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn update_department(&self, id: &str, req: &UpdateDepartment) -> Result<Department> {
        let response = self
            .request(Method::PUT, &format!("/departments/{}", segment(id)))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn delete_department(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/departments/{}", segment(id)))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
