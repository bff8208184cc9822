//! Data Transfer Objects
//!
//! Request bodies, response envelopes and pagination types exchanged with the
//! TaskHub REST backend. JSON field names are camelCase on the wire.

pub mod admin;
pub mod auth;
pub mod department;
pub mod employee;
pub mod envelope;
pub mod manager;
pub mod pagination;
pub mod task;

mod validate;

pub use envelope::{ApiResponse, ErrorBody, PagedResponse};
pub use pagination::{Page, PageRequest, PaginationMeta, SortOrder};
