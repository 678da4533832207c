//! HTTP client for the task board.
//!
//! Two endpoints, both POST-JSON: `gettasks.php` hands out a task payload
//! (or the task listing for the `"all"` selector), `answer.php` takes the
//! verdicts back. Board-level rejections arrive as 200s with a non-success
//! `status` field, so every body is checked for that before it is decoded
//! into its real shape.

use roadcheck_protocol::wire::{
    AnswerSubmission, ApiStatus, GetTasksRequest, TaskEnvelope, TaskListEnvelope, TaskSummary,
};

use crate::error::{ClientError, Result};

/// Selector that makes `gettasks.php` return the task listing instead of a
/// single task.
pub const ALL_TASKS: &str = "all";

/// Client for one task board, bound to one team credential.
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
    teamcode: String,
}

impl TaskClient {
    pub fn new(base_url: impl Into<String>, teamcode: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            teamcode: teamcode.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one task by selector id.
    pub async fn fetch_task(&self, task_id: &str) -> Result<TaskEnvelope> {
        let body = self.post_gettasks(task_id).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches the task listing.
    pub async fn fetch_task_list(&self) -> Result<Vec<TaskSummary>> {
        let body = self.post_gettasks(ALL_TASKS).await?;
        let envelope: TaskListEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.data.task_list)
    }

    /// Posts the verdicts for a task back to the board.
    pub async fn submit_answers(&self, submission: &AnswerSubmission) -> Result<()> {
        let url = format!("{}/answer.php", self.base_url);
        log::debug!(
            "POST {url} ({} answer entries)",
            submission.answer_data.len()
        );
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(submission)?)
            .send()
            .await?;
        checked_body(response, &url).await?;
        log::info!("answers for task {} accepted", submission.id);
        Ok(())
    }

    async fn post_gettasks(&self, task_id: &str) -> Result<String> {
        let url = format!("{}/gettasks.php", self.base_url);
        log::debug!("POST {url} (id={task_id})");
        let request = GetTasksRequest {
            id: task_id.to_string(),
            teamcode: self.teamcode.clone(),
        };
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&request)?)
            .send()
            .await?;
        checked_body(response, &url).await
    }
}

/// Reads the body, surfacing non-2xx statuses and board-level rejections
/// as errors before the caller decodes the real shape.
async fn checked_body(response: reqwest::Response, url: &str) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::HttpStatus {
            status,
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    let api: ApiStatus = serde_json::from_str(&body)?;
    if !api.is_success() {
        return Err(ClientError::Rejected(
            api.message.unwrap_or_else(|| "no message given".to_string()),
        ));
    }
    Ok(body)
}
