//! Admin endpoints

use async_trait::async_trait;
use reqwest::Method;
use taskhub_core::domain::Admin;
use taskhub_core::dto::admin::DashboardStats;
use taskhub_core::dto::{Page, PageRequest};

use crate::{TaskHubClient, segment};
use crate::api::AdminApi;
use crate::error::Result;

#[async_trait]
impl AdminApi for TaskHubClient {
    async fn list_admins(&self, page: &PageRequest) -> Result<Page<Admin>> {
        let response = self
            .request(Method::GET, "/admin")
            .query(&page.to_query())
            .send()
            .await?;

        self.handle_paged(response).await
    }

    async fn get_admin(&self, id: &str) -> Result<Admin> {
        let response = self
            .request(Method::GET, &format!("/admin/{}", segment(id)))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let response = self.request(Method::GET, "/admin/stats").send().await?;

        self.handle_response(response).await
    }
}
