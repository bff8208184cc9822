//! A manager's view: their own department and its team

use futures::stream::BoxStream;
use taskhub_client::EmployeeApi;
use taskhub_core::ValidationError;
use taskhub_core::domain::{Department, Employee, Role, Session};
use taskhub_core::dto::employee::{CreateEmployee, EmployeeFilter, UpdateEmployee};
use taskhub_core::dto::{Page, PageRequest};

use crate::context::SyncContext;
use crate::error::{Result, SyncError};
use crate::resource::{RefreshPolicy, Resource};
use crate::sync::{self, scope};

const MANAGER_ONLY: &[Role] = &[Role::Manager];

#[derive(Clone)]
pub struct ManagerRepository {
    ctx: SyncContext,
}

impl ManagerRepository {
    pub fn new(ctx: SyncContext) -> Self {
        Self { ctx }
    }

    /// The logged-in manager's session and department id
    async fn own_department(&self) -> Result<(Session, String)> {
        let session = self.ctx.require_role(MANAGER_ONLY).await?;
        let department_id = session.user.department_id.clone().ok_or_else(|| {
            SyncError::Validation(ValidationError::new(
                "departmentId",
                "manager is not assigned to a department",
            ))
        })?;
        Ok((session, department_id))
    }

    /// Employees of the manager's department
    pub async fn team(
        &self,
        request: PageRequest,
        policy: RefreshPolicy,
    ) -> Result<BoxStream<'static, Resource<Page<Employee>>>> {
        let (_, department_id) = self.own_department().await?;
        Ok(super::employee_page(
            &self.ctx,
            request,
            EmployeeFilter::department(department_id),
            policy,
        ))
    }

    pub fn employee(&self, id: &str, policy: RefreshPolicy) -> BoxStream<'static, Resource<Employee>> {
        super::employee(&self.ctx, id, policy)
    }

    pub async fn my_department(
        &self,
        policy: RefreshPolicy,
    ) -> Result<BoxStream<'static, Resource<Department>>> {
        let (_, department_id) = self.own_department().await?;
        Ok(super::department(&self.ctx, &department_id, policy))
    }

    /// Hire into the manager's own department, reporting to the manager
    pub async fn create_employee(&self, mut req: CreateEmployee) -> Result<Employee> {
        let (session, department_id) = self.own_department().await?;
        req.validate()?;
        req.department_id = Some(department_id);
        req.manager_id = Some(session.user.id);

        let table = self.ctx.cache().employees();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::EMPLOYEES, scope::DEPARTMENTS],
            self.ctx.api().create_employee(&req),
        )
        .await
    }

    /// Update a team member; moving them out of the department is not possible
    pub async fn update_employee(&self, id: &str, mut req: UpdateEmployee) -> Result<Employee> {
        let (_, department_id) = self.own_department().await?;
        req.validate()?;
        req.department_id = Some(department_id);

        let table = self.ctx.cache().employees();
        sync::save_through(
            &self.ctx,
            table.as_ref(),
            &[scope::EMPLOYEES],
            self.ctx.api().update_employee(id, &req),
        )
        .await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<()> {
        self.own_department().await?;

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
