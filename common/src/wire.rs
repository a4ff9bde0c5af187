use crate::job::JobRecord;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/jobs/myJobs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyJobsResponse {
    pub my_jobs: Vec<JobRecord>,
}

/// `{ "message": ... }` body used by update/delete and by error responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Endpoint paths, relative to the API base URL.
pub mod paths {
    pub const MY_JOBS: &str = "/api/jobs/myJobs";
    pub const UPDATE_PREFIX: &str = "/api/jobs/update/";
    pub const DELETE_PREFIX: &str = "/api/jobs/delete/";

    pub fn update(id: &str) -> String {
        format!("{UPDATE_PREFIX}{id}")
    }

    pub fn delete(id: &str) -> String {
        format!("{DELETE_PREFIX}{id}")
    }
}
