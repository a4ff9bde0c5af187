use common::JobId;
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

use crate::ops::OpKind;

/// Failure talking to the jobs API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server rejected request with {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API URL: {0}")]
    Url(String),
}

impl ApiError {
    /// Message the server put in the error body, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

/// The three network operations the view performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Update,
    Delete,
}

impl Operation {
    /// Notification text used when the server gives no message.
    pub fn default_error(self) -> &'static str {
        match self {
            Operation::Fetch => "Error fetching jobs",
            Operation::Update => "Error updating job",
            Operation::Delete => "Error deleting job",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Fetch => "fetch",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

/// Why a view operation did not take effect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no job with id {0}")]
    UnknownJob(JobId),

    #[error("job {0} is not in edit mode")]
    NotEditing(JobId),

    #[error("a {kind} for job {id} is already in flight")]
    InFlight { id: JobId, kind: OpKind },

    #[error("view is not mounted")]
    Detached,

    /// The request failed; the user has already been notified.
    #[error("{op} failed: {message}")]
    Request { op: Operation, message: String },

    /// The view was unmounted or remounted while the request ran.
    #[error("{0} result discarded")]
    Discarded(Operation),
}
