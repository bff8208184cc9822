//! Bulk refresh of everything the logged-in role can see

use futures::stream::BoxStream;
use taskhub_core::ErrorKind;
use taskhub_core::domain::Role;
use taskhub_core::dto::employee::EmployeeFilter;
use taskhub_core::dto::task::TaskFilter;
use taskhub_core::dto::{Page, PageRequest};
use tracing::{info, warn};

use super::{AdminRepository, ManagerRepository, SharedRepository, TaskRepository};
use crate::context::SyncContext;
use crate::error::{Result, SyncError};
use crate::resource::{RefreshPolicy, Resource, Settled};
use crate::sync::scope;

/// Outcome of refreshing one scope
#[derive(Debug)]
pub struct ScopeReport {
    pub scope: &'static str,
    /// Number of records refreshed
    pub outcome: std::result::Result<usize, SyncError>,
}

impl ScopeReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Clone)]
pub struct Synchronizer {
    ctx: SyncContext,
    shared: SharedRepository,
    admin: AdminRepository,
    manager: ManagerRepository,
    tasks: TaskRepository,
}

impl Synchronizer {
    pub fn new(ctx: SyncContext) -> Self {
        Self {
            shared: SharedRepository::new(ctx.clone()),
            admin: AdminRepository::new(ctx.clone()),
            manager: ManagerRepository::new(ctx.clone()),
            tasks: TaskRepository::new(ctx.clone()),
            ctx,
        }
    }

    /// Refresh the profile and the first page of every scope visible to the role
    ///
    /// A failing scope does not stop the others, except for an unauthorized
    /// answer, which ends the session.
    pub async fn refresh_all(&self, page_size: u32) -> Result<Vec<ScopeReport>> {
        let session = self.ctx.require_session().await?;
        self.ctx.require_online().await?;

        let request = PageRequest::new(1, page_size);
        request.validate()?;
        let policy = RefreshPolicy::NetworkFirst;
        let mut reports = Vec::new();

        let profile = settle("profile", self.shared.profile(policy), |_| 1).await;
        let expired = matches!(&profile.outcome, Err(e) if e.kind() == ErrorKind::Unauthorized);
        reports.push(profile);
        if expired {
            warn!("Session expired, stopping refresh");
            return Ok(reports);
        }

        reports.push(settle_page(scope::DEPARTMENTS, self.shared.departments(request.clone(), policy)).await);

        match session.role() {
            Role::Admin => {
                reports.push(settle_page(scope::ADMINS, self.admin.admins(request.clone(), policy)).await);
                reports.push(settle_page(scope::MANAGERS, self.admin.managers(request.clone(), policy)).await);
                reports.push(
                    settle_page(
                        scope::EMPLOYEES,
                        self.admin.employees(request.clone(), EmployeeFilter::default(), policy),
                    )
                    .await,
                );
                reports.push(
                    settle_page(scope::TASKS, self.tasks.tasks(TaskFilter::default(), request, policy)).await,
                );
                reports.push(settle("dashboard", self.admin.dashboard_stats(policy), |_| 1).await);
            }
            Role::Manager => {
                reports.push(match self.manager.team(request.clone(), policy).await {
                    Ok(stream) => settle_page(scope::EMPLOYEES, stream).await,
                    Err(e) => failed(scope::EMPLOYEES, e),
                });
                let filter = TaskFilter {
                    department_id: session.user.department_id.clone(),
                    ..Default::default()
                };
                reports.push(settle_page(scope::TASKS, self.tasks.tasks(filter, request, policy)).await);
            }
            Role::Employee => {
                reports.push(match self.tasks.my_tasks(TaskFilter::default(), request, policy).await {
                    Ok(stream) => settle_page(scope::TASKS, stream).await,
                    Err(e) => failed(scope::TASKS, e),
                });
            }
        }

        let ok = reports.iter().filter(|r| r.is_ok()).count();
        info!("Refreshed {}/{} scopes for {}", ok, reports.len(), session.user.email);
        Ok(reports)
    }
}

async fn settle<T>(
    scope: &'static str,
    stream: BoxStream<'static, Resource<T>>,
    count: impl Fn(&T) -> usize,
) -> ScopeReport {
    let settled = Settled::from_stream(stream).await;
    let outcome = match settled.error {
        Some(error) => Err(error),
        None => Ok(settled.data.as_ref().map_or(0, count)),
    };
    ScopeReport { scope, outcome }
}

async fn settle_page<T>(scope: &'static str, stream: BoxStream<'static, Resource<Page<T>>>) -> ScopeReport {
    settle(scope, stream, Page::len).await
}

fn failed(scope: &'static str, error: SyncError) -> ScopeReport {
    ScopeReport {
        scope,
        outcome: Err(error),
    }
}
