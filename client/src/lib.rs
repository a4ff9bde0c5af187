//! Employer "My Jobs" view-model.
//!
//! Loads the signed-in employer's jobs from the job-board API, tracks which
//! card is being edited, and pushes edits and deletions back to the server.
//! Rendering is left to the caller: [`MyJobsView::page`] returns a plain
//! [`render::PageView`] and [`render::render_page`] turns it into text.

pub mod api;
pub mod collab;
pub mod config;
pub mod edit;
pub mod error;
pub mod ops;
pub mod render;
pub mod store;
pub mod view;

pub use api::{HttpJobsApi, JobsApi};
pub use collab::{MemoryNavigator, MemoryNotifier, Navigator, Notice, Notifier};
pub use config::ClientConfig;
pub use edit::CancelPolicy;
pub use error::{ApiError, Operation, ViewError};
pub use ops::{OpKind, OpState};
pub use view::{LoadPhase, MyJobsView};
