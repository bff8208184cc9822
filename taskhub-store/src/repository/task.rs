//! Tasks: listing, CRUD for admins and managers, status changes for everyone

use futures::FutureExt;
use futures::stream::BoxStream;
use taskhub_client::TaskApi;
use taskhub_core::ValidationError;
use taskhub_core::domain::{Role, Task, TaskStatus};
use taskhub_core::dto::task::{CreateTask, TaskFilter, UpdateTask};
use taskhub_core::dto::{Page, PageRequest};
use tracing::debug;

use crate::context::SyncContext;
use crate::error::{Result, SyncError};
use crate::resource::{RefreshPolicy, Resource};
use crate::sync::{self, PageQuery, scope};

const TASK_MANAGERS: &[Role] = &[Role::Admin, Role::Manager];

#[derive(Clone)]
pub struct TaskRepository {
    ctx: SyncContext,
}

impl TaskRepository {
    pub fn new(ctx: SyncContext) -> Self {
        Self { ctx }
    }

    pub fn tasks(
        &self,
        filter: TaskFilter,
        request: PageRequest,
        policy: RefreshPolicy,
    ) -> BoxStream<'static, Resource<Page<Task>>> {
        let query = PageQuery::new(scope::TASKS, request.clone(), &filter.to_query());
        let api = self.ctx.api().clone();
        let fetch = async move { api.list_tasks(&request, &filter).await }.boxed();

        sync::paged(self.ctx.clone(), self.ctx.cache().tasks(), query, policy, fetch)
    }

    /// Tasks assigned to the logged-in user
    pub async fn my_tasks(
        &self,
        mut filter: TaskFilter,
        request: PageRequest,
        policy: RefreshPolicy,
    ) -> Result<BoxStream<'static, Resource<Page<Task>>>> {
        let session = self.ctx.require_session().await?;
        filter.assigned_to = Some(session.user.id);
        Ok(self.tasks(filter, request, policy))
    }

    pub fn task(&self, id: &str, policy: RefreshPolicy) -> BoxStream<'static, Resource<Task>> {
        let api = self.ctx.api().clone();
        let key = id.to_string();
        let fetch = async move { api.get_task(&key).await }.boxed();

        sync::single(self.ctx.clone(), self.ctx.cache().tasks(), id.to_string(), policy, fetch)
    }

    /// Create a task; a manager's task defaults to their own department
    pub async fn create_task(&self, mut req: CreateTask) -> Result<Task> {
        let session = self.ctx.require_role(TASK_MANAGERS).await?;
        req.validate()?;
        if session.role() == Role::Manager && req.department_id.is_none() {
            req.department_id = session.user.department_id.clone();
        }

        let table = self.ctx.cache().tasks();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::TASKS],
            self.ctx.api().create_task(&req),
        )
        .await
    }

    pub async fn update_task(&self, id: &str, req: UpdateTask) -> Result<Task> {
        self.ctx.require_role(TASK_MANAGERS).await?;
        req.validate()?;
        if req.is_empty() {
            return Err(ValidationError::new("task", "nothing to update").into());
        }

        let table = self.ctx.cache().tasks();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::TASKS],
            self.ctx.api().update_task(id, &req),
        )
        .await
    }

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.ctx.require_role(TASK_MANAGERS).await?;

        let table = self.ctx.cache().tasks();
        sync::delete_through(
            &self.ctx,
            table.as_ref(),
            id,
            &[scope::TASKS],
            self.ctx.api().delete_task(id),
        )
        .await
    }

    /// Move a task to `status`
    ///
    /// Any role may do this, but an employee only on a task assigned to them.
    pub async fn update_status(&self, id: &str, status: TaskStatus) -> Result<Task> {
        let session = self.ctx.require_session().await?;

        if session.role() == Role::Employee {
            let task = match self.ctx.cache().tasks().find_by_id(id).await? {
                Some(task) => task,
                None => sync::remote(&self.ctx, self.ctx.api().get_task(id)).await?,
            };
            if task.assigned_to.as_deref() != Some(session.user.id.as_str()) {
                debug!(task = id, "Status change refused: task assigned to someone else");
                return Err(SyncError::Forbidden(Role::Employee));
            }
        }

        let table = self.ctx.cache().tasks();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::TASKS],
            self.ctx.api().update_task_status(id, status),
        )
        .await
    }
}
