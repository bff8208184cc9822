//! Employee endpoints

use async_trait::async_trait;
use reqwest::Method;
use taskhub_core::domain::Employee;
use taskhub_core::dto::employee::{CreateEmployee, EmployeeFilter, UpdateEmployee};
use taskhub_core::dto::{Page, PageRequest};

use crate::{TaskHubClient, segment};
use crate::api::EmployeeApi;
use crate::error::Result;

#[async_trait]
impl EmployeeApi for TaskHubClient {
    async fn list_employees(
        &self,
        page: &PageRequest,
        filter: &EmployeeFilter,
    ) -> Result<Page<Employee>> {
        let response = self
            .request(Method::GET, "/employees")
            .query(&page.to_query())
            .query(&filter.to_query())
            .send()
            .await?;

        self.handle_paged(response).await
    }

    async fn get_employee(&self, id: &str) -> Result<Employee> {
        let response = self
            .request(Method::GET, &format!("/employees/{}", segment(id)))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_employee(&self, req: &CreateEmployee) -> Result<Employee> {
        let response = self
            .request(Method::POST, "/employees")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn update_employee(&self, id: &str, req: &UpdateEmployee) -> Result<Employee> {
        let response = self
            .request(Method::PUT, &format!("/employees/{}", segment(id)))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn delete_employee(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/employees/{}", segment(id)))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::TestServer;

    #[tokio::test]
    async fn test_list_employees_sends_filter() {
        let server = TestServer::respond(
            200,
            r#"{"data":[],"pagination":{"page":1,"limit":10,"total":0,"totalPages":0,"hasNextPage":false,"hasPrevPage":false}}"#,
        )
        .await;
        let client = TaskHubClient::new(server.url());

        let page = client
            .list_employees(&PageRequest::default(), &EmployeeFilter::department("d7"))
            .await
            .unwrap();
        assert!(page.is_empty());

        let raw = server.request().await;
        let request_line = raw.lines().next().unwrap();
        assert!(request_line.contains("departmentId=d7"));
        assert!(request_line.contains("page=1"));
    }
}
