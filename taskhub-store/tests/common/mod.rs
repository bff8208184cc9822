//! In-process stand-in for the TaskHub backend

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskhub_client::{
    AdminApi, AuthApi, ClientError, DepartmentApi, EmployeeApi, ManagerApi, Result, TaskApi,
};
use taskhub_core::domain::{
    Admin, AuthUser, Department, Employee, Manager, Role, Task, TaskPriority, TaskStatus,
};
use taskhub_core::dto::admin::DashboardStats;
use taskhub_core::dto::auth::{AuthResponse, LoginRequest, SignupRequest};
use taskhub_core::dto::department::{CreateDepartment, UpdateDepartment};
use taskhub_core::dto::employee::{CreateEmployee, EmployeeFilter, UpdateEmployee};
use taskhub_core::dto::manager::{CreateManager, UpdateManager};
use taskhub_core::dto::task::{CreateTask, TaskFilter, UpdateTask};
use taskhub_core::dto::{Page, PageRequest, PaginationMeta};
use taskhub_store::network::ManualNetwork;
use taskhub_store::repository::Repositories;
use taskhub_store::{LocalCache, SyncContext};

/// Fake backend holding its data in memory and counting every request
#[derive(Default)]
pub struct FakeApi {
    calls: AtomicUsize,
    /// When set, every request fails with this HTTP status
    fail_with: Mutex<Option<u16>>,
    pub user: Mutex<Option<AuthUser>>,
    pub token: Mutex<Option<String>>,
    pub departments: Mutex<Vec<Department>>,
    pub managers: Mutex<Vec<Manager>>,
    pub employees: Mutex<Vec<Employee>>,
    pub tasks: Mutex<Vec<Task>>,
    pub last_employee: Mutex<Option<CreateEmployee>>,
}

impl FakeApi {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, status: Option<u16>) {
        *self.fail_with.lock().unwrap() = status;
    }

    pub fn sign_in_as(&self, user: AuthUser) {
        *self.user.lock().unwrap() = Some(user);
    }

    fn hit(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match *self.fail_with.lock().unwrap() {
            Some(status) => Err(ClientError::api_error(status, format!("HTTP {}", status))),
            None => Ok(()),
        }
    }

    fn auth(&self) -> Result<AuthResponse> {
        self.hit()?;
        let user = self
            .user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::api_error(401, "Invalid credentials"))?;
        let token = format!("token-{}", user.id);
        *self.token.lock().unwrap() = Some(token.clone());
        Ok(AuthResponse { token, user })
    }
}

fn paginate<T: Clone>(items: &[T], req: &PageRequest) -> Page<T> {
    let start = ((req.page - 1) * req.limit) as usize;
    let slice: Vec<T> = items.iter().skip(start).take(req.limit as usize).cloned().collect();
    Page::new(slice, PaginationMeta::new(req.page, req.limit, items.len() as u64))
}

fn find<T: Clone>(items: &[T], id: &str, key: impl Fn(&T) -> &str) -> Result<T> {
    items
        .iter()
        .find(|item| key(item) == id)
        .cloned()
        .ok_or_else(|| ClientError::api_error(404, "Not found"))
}

fn remove<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &str) -> Result<()> {
    let before = items.len();
    items.retain(|item| key(item) != id);
    if items.len() == before {
        Err(ClientError::api_error(404, "Not found"))
    } else {
        Ok(())
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, _req: &LoginRequest) -> Result<AuthResponse> {
        self.auth()
    }

    async fn signup(&self, _req: &SignupRequest) -> Result<AuthResponse> {
        self.auth()
    }

    async fn profile(&self) -> Result<AuthUser> {
        self.hit()?;
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::api_error(401, "Not authenticated"))
    }

    fn use_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn list_admins(&self, req: &PageRequest) -> Result<Page<Admin>> {
        self.hit()?;
        Ok(Page::empty(req))
    }

    async fn get_admin(&self, _id: &str) -> Result<Admin> {
        self.hit()?;
        Err(ClientError::api_error(404, "Admin not found"))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.hit()?;
        let tasks = self.tasks.lock().unwrap();
        Ok(DashboardStats {
            total_departments: self.departments.lock().unwrap().len() as u64,
            total_tasks: tasks.len() as u64,
            completed_tasks: tasks.iter().filter(|t| t.status == TaskStatus::Completed).count() as u64,
            ..Default::default()
        })
    }
}

#[async_trait]
impl DepartmentApi for FakeApi {
    async fn list_departments(&self, req: &PageRequest) -> Result<Page<Department>> {
        self.hit()?;
        Ok(paginate(&self.departments.lock().unwrap(), req))
    }

    async fn get_department(&self, id: &str) -> Result<Department> {
        self.hit()?;
        find(&self.departments.lock().unwrap(), id, |d| &d.id)
    }

    async fn create_department(&self, req: &CreateDepartment) -> Result<Department> {
        self.hit()?;
        let mut departments = self.departments.lock().unwrap();
        let created = department(&format!("d{}", departments.len() + 1), &req.name);
        departments.push(created.clone());
        Ok(created)
    }

    async fn update_department(&self, id: &str, req: &UpdateDepartment) -> Result<Department> {
        self.hit()?;
        let mut departments = self.departments.lock().unwrap();
        let found = departments
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ClientError::api_error(404, "Department not found"))?;
        if let Some(name) = &req.name {
            found.name = name.clone();
        }
        Ok(found.clone())
    }

    async fn delete_department(&self, id: &str) -> Result<()> {
        self.hit()?;
        remove(&mut self.departments.lock().unwrap(), id, |d| &d.id)
    }
}

#[async_trait]
impl ManagerApi for FakeApi {
    async fn list_managers(&self, req: &PageRequest) -> Result<Page<Manager>> {
        self.hit()?;
        Ok(paginate(&self.managers.lock().unwrap(), req))
    }

    async fn get_manager(&self, id: &str) -> Result<Manager> {
        self.hit()?;
        find(&self.managers.lock().unwrap(), id, |m| &m.id)
    }

    async fn create_manager(&self, req: &CreateManager) -> Result<Manager> {
        self.hit()?;
        let mut managers = self.managers.lock().unwrap();
        let created = Manager {
            id: format!("m{}", managers.len() + 1),
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            department_id: req.department_id.clone(),
            created_at: Some(Utc::now()),
            last_synced_at: None,
        };
        managers.push(created.clone());
        Ok(created)
    }

    async fn update_manager(&self, id: &str, _req: &UpdateManager) -> Result<Manager> {
        self.hit()?;
        find(&self.managers.lock().unwrap(), id, |m| &m.id)
    }

    async fn delete_manager(&self, id: &str) -> Result<()> {
        self.hit()?;
        remove(&mut self.managers.lock().unwrap(), id, |m| &m.id)
    }
}

#[async_trait]
impl EmployeeApi for FakeApi {
    async fn list_employees(
        &self,
        req: &PageRequest,
        filter: &EmployeeFilter,
    ) -> Result<Page<Employee>> {
        self.hit()?;
        let matching: Vec<Employee> = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.department_id.is_none() || e.department_id == filter.department_id)
            .cloned()
            .collect();
        Ok(paginate(&matching, req))
    }

    async fn get_employee(&self, id: &str) -> Result<Employee> {
        self.hit()?;
        find(&self.employees.lock().unwrap(), id, |e| &e.id)
    }

    async fn create_employee(&self, req: &CreateEmployee) -> Result<Employee> {
        self.hit()?;
        *self.last_employee.lock().unwrap() = Some(req.clone());
        let mut employees = self.employees.lock().unwrap();
        let created = Employee {
            id: format!("e{}", employees.len() + 1),
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            position: req.position.clone(),
            department_id: req.department_id.clone(),
            manager_id: req.manager_id.clone(),
            created_at: Some(Utc::now()),
            last_synced_at: None,
        };
        employees.push(created.clone());
        Ok(created)
    }

    async fn update_employee(&self, id: &str, req: &UpdateEmployee) -> Result<Employee> {
        self.hit()?;
        let mut employees = self.employees.lock().unwrap();
        let found = employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ClientError::api_error(404, "Employee not found"))?;
        if let Some(position) = &req.position {
            found.position = Some(position.clone());
        }
        if req.department_id.is_some() {
            found.department_id = req.department_id.clone();
        }
        Ok(found.clone())
    }

    async fn delete_employee(&self, id: &str) -> Result<()> {
        self.hit()?;
        remove(&mut self.employees.lock().unwrap(), id, |e| &e.id)
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list_tasks(&self, req: &PageRequest, filter: &TaskFilter) -> Result<Page<Task>> {
        self.hit()?;
        let matching: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter.assigned_to.is_none() || t.assigned_to == filter.assigned_to)
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        Ok(paginate(&matching, req))
    }

    async fn get_task(&self, id: &str) -> Result<Task> {
        self.hit()?;
        find(&self.tasks.lock().unwrap(), id, |t| &t.id)
    }

    async fn create_task(&self, req: &CreateTask) -> Result<Task> {
        self.hit()?;
        let mut tasks = self.tasks.lock().unwrap();
        let mut created = task(&format!("t{}", tasks.len() + 1), &req.title, req.assigned_to.as_deref());
        created.priority = req.priority;
        created.department_id = req.department_id.clone();
        tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: &str, req: &UpdateTask) -> Result<Task> {
        self.hit()?;
        let mut tasks = self.tasks.lock().unwrap();
        let found = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::api_error(404, "Task not found"))?;
        if let Some(title) = &req.title {
            found.title = title.clone();
        }
        if let Some(priority) = req.priority {
            found.priority = priority;
        }
        Ok(found.clone())
    }

    async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<Task> {
        self.hit()?;
        let mut tasks = self.tasks.lock().unwrap();
        let found = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::api_error(404, "Task not found"))?;
        found.status = status;
        Ok(found.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.hit()?;
        remove(&mut self.tasks.lock().unwrap(), id, |t| &t.id)
    }
}

pub fn user(id: &str, role: Role, department_id: Option<&str>) -> AuthUser {
    AuthUser {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@corp.io", id),
        role,
        department_id: department_id.map(str::to_string),
    }
}

pub fn department(id: &str, name: &str) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        manager_id: None,
        employee_count: None,
        created_at: Some(Utc::now()),
        updated_at: None,
        last_synced_at: None,
    }
}

pub fn employee(id: &str, department_id: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {}", id),
        email: format!("{}@corp.io", id),
        phone: None,
        position: Some("Engineer".to_string()),
        department_id: Some(department_id.to_string()),
        manager_id: None,
        created_at: Some(Utc::now()),
        last_synced_at: None,
    }
}

pub fn task(id: &str, title: &str, assigned_to: Option<&str>) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        department_id: None,
        assigned_to: assigned_to.map(str::to_string),
        created_by: None,
        due_date: None,
        created_at: Some(Utc::now()),
        updated_at: None,
        last_synced_at: None,
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub network: Arc<ManualNetwork>,
    pub cache: LocalCache,
    pub repos: Repositories,
}

pub async fn harness() -> Harness {
    harness_at("sqlite::memory:").await
}

pub async fn harness_at(database_url: &str) -> Harness {
    let api = Arc::new(FakeApi::default());
    let network = Arc::new(ManualNetwork::new(true));
    let cache = LocalCache::open(database_url).await.unwrap();
    let ctx = SyncContext::new(api.clone(), cache.clone(), network.clone(), Duration::from_secs(300));

    Harness {
        api,
        network,
        cache,
        repos: Repositories::new(ctx),
    }
}

/// Log in through the repository as a fresh user with `role`
pub async fn logged_in(role: Role) -> Harness {
    let h = harness().await;
    h.api.sign_in_as(user("u1", role, Some("d1")));
    h.repos
        .shared
        .login(LoginRequest {
            email: "u1@corp.io".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    h
}
