//! GitHub Checks REST client.
//!
//! - `POST  /repos/{owner}/{repo}/check-runs`
//! - `PATCH /repos/{owner}/{repo}/check-runs/{check_run_id}`

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checks::{ApiResult, CheckCompletion, ChecksApi, NewCheckRun};
use crate::domain::check::{CheckHandle, CheckStatus, Conclusion, RepoCoordinates};
use crate::domain::error::RemoteApiError;
use crate::report::CheckOutput;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("dockcheck/", env!("CARGO_PKG_VERSION"));
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    head_sha: &'a str,
    status: CheckStatus,
    started_at: String,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    status: CheckStatus,
    conclusion: Conclusion,
    completed_at: String,
    output: &'a CheckOutput,
}

#[derive(Deserialize)]
struct CheckRunResponse {
    id: u64,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Checks API client backed by `reqwest`.
pub struct GitHubChecksClient {
    api_url: String,
    token: String,
    http_client: reqwest::Client,
}

impl GitHubChecksClient {
    /// Create a client for `api_url` authenticating with `token`.
    pub fn new(api_url: &str, token: &str) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(GitHubChecksClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http_client,
        })
    }

    fn check_runs_url(&self, repo: &RepoCoordinates) -> String {
        format!(
            "{}/repos/{}/{}/check-runs",
            self.api_url, repo.owner, repo.repo
        )
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_for_response(response).await)
        }
    }
}

#[async_trait]
impl ChecksApi for GitHubChecksClient {
    async fn create_check_run(&self, check: &NewCheckRun) -> ApiResult<CheckHandle> {
        let url = self.check_runs_url(&check.repo);
        let body = CreateBody {
            name: &check.name,
            head_sha: check.head_sha.as_str(),
            status: CheckStatus::InProgress,
            started_at: timestamp(&check.started_at),
        };

        debug!(url = %url, name = %check.name, head_sha = %check.head_sha, "creating check run");

        let response = self.send(self.http_client.post(&url).json(&body)).await?;
        let created: CheckRunResponse = response.json().await?;
        Ok(CheckHandle(created.id))
    }

    async fn complete_check_run(
        &self,
        repo: &RepoCoordinates,
        handle: CheckHandle,
        completion: &CheckCompletion,
    ) -> ApiResult<()> {
        let url = format!("{}/{}", self.check_runs_url(repo), handle);
        let body = UpdateBody {
            status: CheckStatus::Completed,
            conclusion: completion.conclusion,
            completed_at: timestamp(&completion.completed_at),
            output: &completion.output,
        };

        debug!(url = %url, conclusion = %completion.conclusion, "completing check run");

        self.send(self.http_client.patch(&url).json(&body)).await?;
        Ok(())
    }
}

/// ISO 8601 `YYYY-MM-DDTHH:MM:SSZ`, the format the Checks API documents.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Seconds to wait before retrying: `Retry-After` if sent, else the time left
/// until the `X-RateLimit-Reset` epoch, else a fixed default.
fn retry_after_secs(
    retry_after: Option<&str>,
    reset_epoch: Option<&str>,
    now: DateTime<Utc>,
) -> u64 {
    if let Some(secs) = retry_after.and_then(|s| s.trim().parse().ok()) {
        return secs;
    }
    reset_epoch
        .and_then(|s| s.trim().parse::<i64>().ok())
        .map(|reset| reset.saturating_sub(now.timestamp()).max(0) as u64)
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

async fn error_for_response(response: Response) -> RemoteApiError {
    let status = response.status();
    let headers = response.headers().clone();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && header("x-ratelimit-remaining").as_deref() == Some("0"));
    if rate_limited {
        let retry_after_secs = retry_after_secs(
            header("retry-after").as_deref(),
            header("x-ratelimit-reset").as_deref(),
            Utc::now(),
        );
        return RemoteApiError::RateLimited { retry_after_secs };
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message)
        .ok()
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| format!("HTTP {status}"));

    if status == StatusCode::UNAUTHORIZED {
        RemoteApiError::Unauthorized { message }
    } else {
        RemoteApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}
