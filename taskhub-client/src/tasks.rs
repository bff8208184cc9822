//! Task endpoints

use async_trait::async_trait;
use reqwest::Method;
use taskhub_core::domain::{Task, TaskStatus};
use taskhub_core::dto::task::{CreateTask, TaskFilter, UpdateTask, UpdateTaskStatus};
use taskhub_core::dto::{Page, PageRequest};

use crate::{TaskHubClient, segment};
use crate::api::TaskApi;
use crate::error::Result;

#[async_trait]
impl TaskApi for TaskHubClient {
    async fn list_tasks(&self, page: &PageRequest, filter: &TaskFilter) -> Result<Page<Task>> {
        let response = self
            .request(Method::GET, "/tasks")
            .query(&page.to_query())
            .query(&filter.to_query())
            .send()
            .await?;

        self.handle_paged(response).await
    }

    async fn get_task(&self, id: &str) -> Result<Task> {
        let response = self
            .request(Method::GET, &format!("/tasks/{}", segment(id)))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_task(&self, req: &CreateTask) -> Result<Task> {
        let response = self.request(Method::POST, "/tasks").json(req).send().await?;

        self.handle_response(response).await
    }

    async fn update_task(&self, id: &str, req: &UpdateTask) -> Result<Task> {
        let response = self
            .request(Method::PUT, &format!("/tasks/{}", segment(id)))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<Task> {
        let response = self
            .request(Method::PATCH, &format!("/tasks/{}/status", segment(id)))
            .json(&UpdateTaskStatus { status })
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/tasks/{}", segment(id)))
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
    async fn test_update_status_patches() {
        let server = TestServer::respond(
            200,
            r#"{"success":true,"data":{"_id":"t1","title":"Audit","status":"completed","priority":"high"}}"#,
        )
        .await;
        let client = TaskHubClient::new(server.url());

        let task = client
            .update_task_status("t1", TaskStatus::Completed)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Completed);

        let raw = server.request().await;
        assert!(raw.starts_with("PATCH /tasks/t1/status "));
        assert!(raw.ends_with(r#"{"status":"completed"}"#));
    }
}
