//! TaskHub Core
//!
//! Core types shared by the TaskHub client crates.
//!
//! This crate contains:
//! - Domain types: the records the backend serves (Admin, Department, Task, ...)
//! - DTOs: request bodies, response envelopes and pagination bookkeeping
//! - Error categories used to turn failures into user-facing messages

pub mod domain;
pub mod dto;
pub mod error;

pub use error::{ErrorKind, ValidationError};
