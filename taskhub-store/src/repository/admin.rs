//! Administration: admin accounts, organization statistics and the CRUD of
//! departments, managers and employees

use futures::FutureExt;
use futures::stream::BoxStream;
use taskhub_client::{AdminApi, DepartmentApi, EmployeeApi, ManagerApi};
use taskhub_core::domain::{Admin, Department, Employee, Manager, Role};
use taskhub_core::dto::admin::DashboardStats;
use taskhub_core::dto::department::{CreateDepartment, UpdateDepartment};
use taskhub_core::dto::employee::{CreateEmployee, EmployeeFilter, UpdateEmployee};
use taskhub_core::dto::manager::{CreateManager, UpdateManager};
use taskhub_core::dto::{Page, PageRequest};

use crate::context::SyncContext;
use crate::error::Result;
use crate::resource::{RefreshPolicy, Resource};
use crate::sync::{self, PageQuery, scope};

/// Snapshot key of the dashboard statistics
pub(crate) const DASHBOARD_STATS: &str = "dashboard_stats";

const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(Clone)]
pub struct AdminRepository {
    ctx: SyncContext,
}

impl AdminRepository {
    pub fn new(ctx: SyncContext) -> Self {
        Self { ctx }
    }

    // Admin accounts

    pub fn admins(
        &self,
        request: PageRequest,
        policy: RefreshPolicy,
    ) -> BoxStream<'static, Resource<Page<Admin>>> {
        let api = self.ctx.api().clone();
        let req = request.clone();
        let fetch = async move { api.list_admins(&req).await }.boxed();

        sync::paged(
            self.ctx.clone(),
            self.ctx.cache().admins(),
            PageQuery::new(scope::ADMINS, request, &[]),
            policy,
            fetch,
        )
    }

    pub fn admin(&self, id: &str, policy: RefreshPolicy) -> BoxStream<'static, Resource<Admin>> {
        let api = self.ctx.api().clone();
        let key = id.to_string();
        let fetch = async move { api.get_admin(&key).await }.boxed();

        sync::single(self.ctx.clone(), self.ctx.cache().admins(), id.to_string(), policy, fetch)
    }

    /// Organization counters; always fetched, the last answer is kept for offline use
    pub fn dashboard_stats(&self, policy: RefreshPolicy) -> BoxStream<'static, Resource<DashboardStats>> {
        let api = self.ctx.api().clone();
        let fetch = async move { api.dashboard_stats().await }.boxed();

        sync::snapshot(self.ctx.clone(), DASHBOARD_STATS, policy, fetch)
    }

    // Departments

    pub fn departments(
        &self,
        request: PageRequest,
        policy: RefreshPolicy,
    ) -> BoxStream<'static, Resource<Page<Department>>> {
        super::department_page(&self.ctx, request, policy)
    }

    pub fn department(&self, id: &str, policy: RefreshPolicy) -> BoxStream<'static, Resource<Department>> {
        super::department(&self.ctx, id, policy)
    }

    pub async fn create_department(&self, req: CreateDepartment) -> Result<Department> {
        self.ctx.require_role(ADMIN_ONLY).await?;
        req.validate()?;

        let table = self.ctx.cache().departments();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::DEPARTMENTS, scope::MANAGERS],
            self.ctx.api().create_department(&req),
        )
        .await
    }

    pub async fn update_department(&self, id: &str, req: UpdateDepartment) -> Result<Department> {
        self.ctx.require_role(ADMIN_ONLY).await?;
        req.validate()?;

        let table = self.ctx.cache().departments();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::DEPARTMENTS, scope::MANAGERS],
            self.ctx.api().update_department(id, &req),
        )
        .await
    }

    pub async fn delete_department(&self, id: &str) -> Result<()> {
        self.ctx.require_role(ADMIN_ONLY).await?;

        let table = self.ctx.cache().departments();
        sync::delete_through(
            &self.ctx,
            table.as_ref(),
            id,
            &[scope::DEPARTMENTS, scope::MANAGERS, scope::EMPLOYEES, scope::TASKS],
            self.ctx.api().delete_department(id),
        )
        .await
    }

    // Managers

    pub fn managers(
        &self,
        request: PageRequest,
        policy: RefreshPolicy,
    ) -> BoxStream<'static, Resource<Page<Manager>>> {
        let api = self.ctx.api().clone();
        let req = request.clone();
        let fetch = async move { api.list_managers(&req).await }.boxed();

        sync::paged(
            self.ctx.clone(),
            self.ctx.cache().managers(),
            PageQuery::new(scope::MANAGERS, request, &[]),
            policy,
            fetch,
        )
    }

    pub fn manager(&self, id: &str, policy: RefreshPolicy) -> BoxStream<'static, Resource<Manager>> {
        let api = self.ctx.api().clone();
        let key = id.to_string();
        let fetch = async move { api.get_manager(&key).await }.boxed();

        sync::single(self.ctx.clone(), self.ctx.cache().managers(), id.to_string(), policy, fetch)
    }

    pub async fn create_manager(&self, req: CreateManager) -> Result<Manager> {
        self.ctx.require_role(ADMIN_ONLY).await?;
        req.validate()?;

        let table = self.ctx.cache().managers();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::MANAGERS, scope::DEPARTMENTS],
            self.ctx.api().create_manager(&req),
        )
        .await
    }

    pub async fn update_manager(&self, id: &str, req: UpdateManager) -> Result<Manager> {
        self.ctx.require_role(ADMIN_ONLY).await?;
        req.validate()?;

        let table = self.ctx.cache().managers();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::MANAGERS, scope::DEPARTMENTS],
            self.ctx.api().update_manager(id, &req),
        )
        .await
    }

    pub async fn delete_manager(&self, id: &str) -> Result<()> {
        self.ctx.require_role(ADMIN_ONLY).await?;

        let table = self.ctx.cache().managers();
        sync::delete_through(
            &self.ctx,
            table.as_ref(),
            id,
            &[scope::MANAGERS, scope::DEPARTMENTS, scope::EMPLOYEES],
            self.ctx.api().delete_manager(id),
        )
        .await
    }

    // Employees

    pub fn employees(
        &self,
        request: PageRequest,
        filter: EmployeeFilter,
        policy: RefreshPolicy,
    ) -> BoxStream<'static, Resource<Page<Employee>>> {
        super::employee_page(&self.ctx, request, filter, policy)
    }

    pub fn employee(&self, id: &str, policy: RefreshPolicy) -> BoxStream<'static, Resource<Employee>> {
        super::employee(&self.ctx, id, policy)
    }

    pub async fn create_employee(&self, req: CreateEmployee) -> Result<Employee> {
        self.ctx.require_role(ADMIN_ONLY).await?;
        req.validate()?;

        let table = self.ctx.cache().employees();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::EMPLOYEES, scope::DEPARTMENTS],
            self.ctx.api().create_employee(&req),
        )
        .await
    }

    pub async fn update_employee(&self, id: &str, req: UpdateEmployee) -> Result<Employee> {
        self.ctx.require_role(ADMIN_ONLY).await?;
        req.validate()?;

        let table = self.ctx.cache().employees();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::EMPLOYEES, scope::DEPARTMENTS],
            self.ctx.api().update_employee(id, &req),
        )
        .await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<()> {
        self.ctx.require_role(ADMIN_ONLY).await?;

        let table = self.ctx.cache().employees();
        sync::delete_through(
            &self.ctx,
            table.as_ref(),
            id,
            &[scope::EMPLOYEES, scope::DEPARTMENTS, scope::TASKS],
            self.ctx.api().delete_employee(id),
        )
        .await
    }
}
