//! Reference backend for the MyJobs view.
//!
//! Serves the three job endpoints over an in-memory list so the client
//! can be run and tested without the production API.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
};
use common::{JobId, JobRecord, MessageResponse, MyJobsResponse, paths};
use std::fs;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Name of the session cookie checked on every request.
pub const SESSION_COOKIE: &str = "token";

pub const NOT_AUTHORIZED: &str = "User not authorized";
pub const NOT_FOUND: &str = "OOPS! Job not found.";
pub const BOTH_SALARIES: &str = "Cannot enter fixed and ranged salary together.";
pub const NO_SALARY: &str = "Please either provide fixed salary or ranged salary.";
pub const UPDATED: &str = "Job Updated!";
pub const DELETED: &str = "Job Deleted!";

/// Shared application state
pub struct AppState {
    jobs: RwLock<Vec<JobRecord>>,
    token: Option<String>,
}

impl AppState {
    /// `token: None` disables the session check.
    pub fn new(jobs: Vec<JobRecord>, token: Option<String>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
            token,
        }
    }

    pub async fn jobs(&self) -> Vec<JobRecord> {
        self.jobs.read().await.clone()
    }
}

/// Error reply carrying a `{ "message": ... }` body.
#[derive(Debug)]
struct Rejection {
    status: StatusCode,
    message: &'static str,
}

impl Rejection {
    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}

/// Loads seed jobs from a JSON array file. A missing file yields no jobs.
pub fn load_jobs(path: &std::path::Path) -> anyhow::Result<Vec<JobRecord>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no seed file found, starting empty");
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    let jobs: Vec<JobRecord> = serde_json::from_str(&content)?;
    tracing::info!(count = jobs.len(), path = %path.display(), "loaded seed jobs");
    Ok(jobs)
}

/// Checks the salary representation of an updated job.
pub fn validate_salary(job: &JobRecord) -> Result<(), &'static str> {
    match (job.has_fixed_salary(), job.has_ranged_salary()) {
        (true, true) => Err(BOTH_SALARIES),
        (false, false) => Err(NO_SALARY),
        _ => Ok(()),
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Rejection> {
    let Some(expected) = &state.token else {
        return Ok(());
    };
    let presented = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == SESSION_COOKIE && value == expected);
    if presented {
        Ok(())
    } else {
        Err(Rejection::new(StatusCode::UNAUTHORIZED, NOT_AUTHORIZED))
    }
}

/// Handler for GET /api/jobs/myJobs
async fn my_jobs_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MyJobsResponse>, Rejection> {
    authorize(&state, &headers)?;
    let my_jobs = state.jobs().await;
    tracing::debug!(count = my_jobs.len(), "listing jobs");
    Ok(Json(MyJobsResponse { my_jobs }))
}

/// Handler for PUT /api/jobs/update/{id}
async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(mut job): Json<JobRecord>,
) -> Result<Json<MessageResponse>, Rejection> {
    authorize(&state, &headers)?;
    let id = JobId::from(id);
    let mut jobs = state.jobs.write().await;
    let slot = jobs
        .iter_mut()
        .find(|j| j.id == id)
        .ok_or_else(|| Rejection::new(StatusCode::NOT_FOUND, NOT_FOUND))?;
    validate_salary(&job).map_err(|m| Rejection::new(StatusCode::BAD_REQUEST, m))?;
    job.id = id;
    tracing::info!(id = %job.id, "job updated");
    *slot = job;
    Ok(Json(MessageResponse::new(UPDATED)))
}

/// Handler for DELETE /api/jobs/delete/{id}
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, Rejection> {
    authorize(&state, &headers)?;
    let id = JobId::from(id);
    let mut jobs = state.jobs.write().await;
    let pos = jobs
        .iter()
        .position(|j| j.id == id)
        .ok_or_else(|| Rejection::new(StatusCode::NOT_FOUND, NOT_FOUND))?;
    jobs.remove(pos);
    tracing::info!(%id, "job deleted");
    Ok(Json(MessageResponse::new(DELETED)))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(paths::MY_JOBS, get(my_jobs_handler))
        .route(&format!("{}{{id}}", paths::UPDATE_PREFIX), put(update_handler))
        .route(&format!("{}{{id}}", paths::DELETE_PREFIX), delete(delete_handler))
        .with_state(state)
}

/// Serves the API on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
