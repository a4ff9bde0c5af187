//! Shared types for the MyJobs client and the reference backend.
//!
//! Everything that crosses the wire lives here so both sides agree on
//! field names and payload shapes.

pub mod job;
pub mod session;
pub mod wire;

pub use job::{CATEGORIES, JobField, JobId, JobRecord, SalaryInput, UnknownField, is_truthy};
pub use session::{AuthState, Role, User};
pub use wire::{MessageResponse, MyJobsResponse, paths};
