//! Core domain types
//!
//! Records served by the backend and cached locally. Every entity carries a
//! `last_synced_at` stamp that only exists on the device: it is filled in when
//! the record is written to the cache and never sent back to the server.

pub mod admin;
pub mod auth;
pub mod department;
pub mod employee;
pub mod manager;
pub mod task;

pub use admin::Admin;
pub use auth::{AuthUser, Role, Session};
pub use department::Department;
pub use employee::Employee;
pub use manager::Manager;
pub use task::{Task, TaskPriority, TaskStatus};
