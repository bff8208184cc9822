//! Repositories
//!
//! Role-oriented entry points of the sync layer. Reads return
//! [`Resource`](crate::Resource) streams, mutations return `Result`s.
//!
//! Reads are not gated by role locally; the server answers 403 for
//! collections a role may not see. Mutations check the stored session first
//! so that a forbidden action never leaves the device.

mod admin;
mod manager;
mod shared;
mod synchronizer;
mod task;

pub use admin::AdminRepository;
pub use manager::ManagerRepository;
pub use shared::SharedRepository;
pub use synchronizer::{ScopeReport, Synchronizer};
pub use task::TaskRepository;

use futures::FutureExt;
use futures::stream::BoxStream;
use taskhub_client::{DepartmentApi, EmployeeApi};
use taskhub_core::domain::{Department, Employee};
use taskhub_core::dto::employee::EmployeeFilter;
use taskhub_core::dto::{Page, PageRequest};

use crate::context::SyncContext;
use crate::resource::{RefreshPolicy, Resource};
use crate::sync::{self, PageQuery, scope};

/// Every repository over one context
#[derive(Clone)]
pub struct Repositories {
    pub shared: SharedRepository,
    pub admin: AdminRepository,
    pub manager: ManagerRepository,
    pub tasks: TaskRepository,
    pub synchronizer: Synchronizer,
}

impl Repositories {
    pub fn new(ctx: SyncContext) -> Self {
        Self {
            shared: SharedRepository::new(ctx.clone()),
            admin: AdminRepository::new(ctx.clone()),
            manager: ManagerRepository::new(ctx.clone()),
            tasks: TaskRepository::new(ctx.clone()),
            synchronizer: Synchronizer::new(ctx),
        }
    }
}

pub(crate) fn department_page(
    ctx: &SyncContext,
    request: PageRequest,
    policy: RefreshPolicy,
) -> BoxStream<'static, Resource<Page<Department>>> {
    let api = ctx.api().clone();
    let req = request.clone();
    let fetch = async move { api.list_departments(&req).await }.boxed();

    sync::paged(
        ctx.clone(),
        ctx.cache().departments(),
        PageQuery::new(scope::DEPARTMENTS, request, &[]),
        policy,
        fetch,
    )
}

pub(crate) fn department(
    ctx: &SyncContext,
    id: &str,
    policy: RefreshPolicy,
) -> BoxStream<'static, Resource<Department>> {
    let api = ctx.api().clone();
    let key = id.to_string();
    let fetch = async move { api.get_department(&key).await }.boxed();

    sync::single(ctx.clone(), ctx.cache().departments(), id.to_string(), policy, fetch)
}

pub(crate) fn employee_page(
    ctx: &SyncContext,
    request: PageRequest,
    filter: EmployeeFilter,
    policy: RefreshPolicy,
) -> BoxStream<'static, Resource<Page<Employee>>> {
    let query = PageQuery::new(scope::EMPLOYEES, request.clone(), &filter.to_query());
    let api = ctx.api().clone();
    let fetch = async move { api.list_employees(&request, &filter).await }.boxed();

    sync::paged(ctx.clone(), ctx.cache().employees(), query, policy, fetch)
}

pub(crate) fn employee(
    ctx: &SyncContext,
    id: &str,
    policy: RefreshPolicy,
) -> BoxStream<'static, Resource<Employee>> {
    let api = ctx.api().clone();
    let key = id.to_string();
    let fetch = async move { api.get_employee(&key).await }.boxed();

    sync::single(ctx.clone(), ctx.cache().employees(), id.to_string(), policy, fetch)
}
