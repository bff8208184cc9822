//! Manager endpoints

use async_trait::async_trait;
use reqwest::Method;
use taskhub_core::domain::Manager;
use taskhub_core::dto::manager::{CreateManager, UpdateManager};
use taskhub_core::dto::{Page, PageRequest};

use crate::{TaskHubClient, segment};
use crate::api::ManagerApi;
use crate::error::Result;

#[async_trait]
impl ManagerApi for TaskHubClient {
    async fn list_managers(&self, page: &PageRequest) -> Result<Page<Manager>> {
        let response = self
            .request(Method::GET, "/managers")
            .query(&page.to_query())
            .send()
            .await?;

        self.handle_paged(response).await
    }

    async fn get_manager(&self, id: &str) -> Result<Manager> {
        let response = self
            .request(Method::GET, &format!("/managers/{}", segment(id)))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_manager(&self, req: &CreateManager) -> Result<Manager> {
        let response = self
            .request(Method::POST, "/managers")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn update_manager(&self, id: &str, req: &UpdateManager) -> Result<Manager> {
        let response = self
            .request(Method::PUT, &format!("/managers/{}", segment(id)))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn delete_manager(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/managers/{}", segment(id)))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
