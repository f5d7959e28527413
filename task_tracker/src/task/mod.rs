//! Per-user task records and the operations over them.
//!
//! Ownership is enforced at the query level: every statement filters
//! by the authenticated user's id, so cross-user access fails as
//! [`TaskError::NotFound`] rather than revealing that the record
//! exists.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{TaskError, TaskResult};
pub use manager::TaskManager;
pub use models::{Task, TaskId, TaskUpdate};
