//! Endpoint groups of the TaskHub API
//!
//! One trait per group so callers can depend on exactly what they use and
//! tests can substitute in-process fakes for the HTTP client.

use async_trait::async_trait;
use taskhub_core::domain::{Admin, AuthUser, Department, Employee, Manager, Task, TaskStatus};
use taskhub_core::dto::admin::DashboardStats;
use taskhub_core::dto::auth::{AuthResponse, LoginRequest, SignupRequest};
use taskhub_core::dto::department::{CreateDepartment, UpdateDepartment};
use taskhub_core::dto::employee::{CreateEmployee, EmployeeFilter, UpdateEmployee};
use taskhub_core::dto::manager::{CreateManager, UpdateManager};
use taskhub_core::dto::task::{CreateTask, TaskFilter, UpdateTask};
use taskhub_core::dto::{Page, PageRequest};

use crate::error::Result;

/// Login, signup and the current user
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token
    ///
    /// On success the token is installed for subsequent requests.
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse>;

    /// Register a new admin account and log it in
    async fn signup(&self, req: &SignupRequest) -> Result<AuthResponse>;

    /// The user the current token belongs to
    async fn profile(&self) -> Result<AuthUser>;

    /// Install a previously issued token (e.g. restored from the session store)
    fn use_token(&self, token: Option<String>);
}

/// Admin accounts and organization statistics
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_admins(&self, page: &PageRequest) -> Result<Page<Admin>>;
    async fn get_admin(&self, id: &str) -> Result<Admin>;
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
}

/// Department CRUD
#[async_trait]
pub trait DepartmentApi: Send + Sync {
    async fn list_departments(&self, page: &PageRequest) -> Result<Page<Department>>;
    async fn get_department(&self, id: &str) -> Result<Department>;
    async fn create_department(&self, req: &CreateDepartment) -> Result<Department>;
    async fn update_department(&self, id: &str, req: &UpdateDepartment) -> Result<Department>;
    async fn delete_department(&self, id: &str) -> Result<()>;
}

/// Manager CRUD
#[async_trait]
pub trait ManagerApi: Send + Sync {
    async fn list_managers(&self, page: &PageRequest) -> Result<Page<Manager>>;
    async fn get_manager(&self, id: &str) -> Result<Manager>;
    async fn create_manager(&self, req: &CreateManager) -> Result<Manager>;
    async fn update_manager(&self, id: &str, req: &UpdateManager) -> Result<Manager>;
    async fn delete_manager(&self, id: &str) -> Result<()>;
}

/// Employee CRUD
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list_employees(
        &self,
        page: &PageRequest,
        filter: &EmployeeFilter,
    ) -> Result<Page<Employee>>;
    async fn get_employee(&self, id: &str) -> Result<Employee>;
    async fn create_employee(&self, req: &CreateEmployee) -> Result<Employee>;
    async fn update_employee(&self, id: &str, req: &UpdateEmployee) -> Result<Employee>;
    async fn delete_employee(&self, id: &str) -> Result<()>;
}

/// Task CRUD and status transitions
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, page: &PageRequest, filter: &TaskFilter) -> Result<Page<Task>>;
    async fn get_task(&self, id: &str) -> Result<Task>;
    async fn create_task(&self, req: &CreateTask) -> Result<Task>;
    async fn update_task(&self, id: &str, req: &UpdateTask) -> Result<Task>;
    async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<Task>;
    async fn delete_task(&self, id: &str) -> Result<()>;
}

/// The whole API surface
pub trait TaskHubApi:
    AuthApi + AdminApi + DepartmentApi + ManagerApi + EmployeeApi + TaskApi
{
}

impl<T> TaskHubApi for T where
    T: AuthApi + AdminApi + DepartmentApi + ManagerApi + EmployeeApi + TaskApi
{
}
