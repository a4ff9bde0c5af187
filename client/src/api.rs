//! HTTP access to the job-board API.

use async_trait::async_trait;
use common::{paths, JobId, JobRecord, MessageResponse, MyJobsResponse};
use reqwest::cookie::Jar;
use reqwest::{Response, Url};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// The three calls the view makes. Update and delete resolve to the
/// server's `message`, which may be absent.
#[async_trait]
pub trait JobsApi: Send + Sync {
    async fn fetch_my_jobs(&self) -> Result<Vec<JobRecord>, ApiError>;
    async fn update_job(&self, job: &JobRecord) -> Result<Option<String>, ApiError>;
    async fn delete_job(&self, id: &JobId) -> Result<Option<String>, ApiError>;
}

/// [`JobsApi`] over reqwest. Every request carries the session cookie.
#[derive(Clone)]
pub struct HttpJobsApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpJobsApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let url = Url::parse(&base_url).map_err(|e| ApiError::Url(format!("{base_url}: {e}")))?;

        let jar = Jar::default();
        if let Some(token) = &config.token {
            jar.add_cookie_str(&format!("{}={}", config.cookie_name, token), &url);
        }

        let mut builder = reqwest::Client::builder().cookie_provider(Arc::new(jar));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Reads the body of `resp`, turning non-2xx statuses into
/// [`ApiError::Rejected`] with the body's `message` when it has one.
async fn body_of(resp: Response) -> Result<Vec<u8>, ApiError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if !status.is_success() {
        let message = serde_json::from_slice::<MessageResponse>(&body)
            .ok()
            .and_then(|m| m.message);
        return Err(ApiError::Rejected { status, message });
    }
    Ok(body.to_vec())
}

#[async_trait]
impl JobsApi for HttpJobsApi {
    async fn fetch_my_jobs(&self) -> Result<Vec<JobRecord>, ApiError> {
        let url = self.url(paths::MY_JOBS);
        tracing::debug!(%url, "GET");
        let resp = self.http.get(&url).send().await?;
        let body = body_of(resp).await?;
        let parsed: MyJobsResponse = serde_json::from_slice(&body)?;
        Ok(parsed.my_jobs)
    }

    async fn update_job(&self, job: &JobRecord) -> Result<Option<String>, ApiError> {
        let url = self.url(&paths::update(job.id.as_str()));
        tracing::debug!(%url, "PUT");
        let resp = self.http.put(&url).json(job).send().await?;
        let body = body_of(resp).await?;
        Ok(message_of(&body))
    }

    async fn delete_job(&self, id: &JobId) -> Result<Option<String>, ApiError> {
        let url = self.url(&paths::delete(id.as_str()));
        tracing::debug!(%url, "DELETE");
        let resp = self.http.delete(&url).send().await?;
        let body = body_of(resp).await?;
        Ok(message_of(&body))
    }
}

/// A success body that is not `{ "message": ... }` still counts as success.
fn message_of(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<MessageResponse>(body)
        .ok()
        .and_then(|m| m.message)
}
