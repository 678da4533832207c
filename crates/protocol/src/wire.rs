//! Request and response envelopes for the task board's HTTP API.
//!
//! The board speaks a small POST-JSON protocol: `gettasks.php` hands out
//! either a task payload (selector = task id or `"all"` for the listing) and
//! `answer.php` takes the verdicts back together with an echo of the exact
//! payload and hash the answers were computed from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Answer, TaskPayload};

/// Body POSTed to `gettasks.php`.
#[derive(Debug, Clone, Serialize)]
pub struct GetTasksRequest {
    /// Task selector: a task id, or `"all"` for the task listing.
    pub id: String,
    pub teamcode: String,
}

/// Status fields the board may attach to any response.
///
/// Successful responses usually carry `"status": "success"`; some omit the
/// field entirely. Anything else is a board-side rejection and `message`
/// says why.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn is_success(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s == "success")
    }
}

/// A single task response: the payload plus the hash that must be echoed
/// back alongside the answers.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskEnvelope {
    pub data: TaskPayload,
    pub hash: String,
}

/// Listing response for the `"all"` selector.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskListEnvelope {
    pub data: TaskList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskList {
    pub task_list: Vec<TaskSummary>,
}

/// One row of the task listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSummary {
    #[serde(rename = "ID")]
    pub id: Value,
    #[serde(default)]
    pub points: Option<Value>,
    #[serde(default)]
    pub state: Option<TaskState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Open,
    Completed,
    Locked,
    #[serde(other)]
    Unknown,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Open => "OPEN",
            TaskState::Completed => "COMPLETED",
            TaskState::Locked => "LOCKED",
            TaskState::Unknown => "UNKNOWN",
        }
    }
}

/// One verdict inside an answer submission.
///
/// `answer` is the `[from, to]` pair of the worst road, or `[]` for a
/// question where every claimed distance held up.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerEntry {
    pub id: Value,
    pub answer: Vec<String>,
}

/// Body POSTed to `answer.php`.
///
/// The board validates submissions against the exact payload it handed out,
/// so `id`, `original_data` and `original_hash` all echo the fetched task
/// verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerSubmission {
    pub id: Value,
    pub teamcode: String,
    pub original_data: TaskPayload,
    pub original_hash: String,
    pub answer_data: Vec<AnswerEntry>,
}

impl AnswerSubmission {
    /// Pairs each question of `payload` with its verdict, in payload order.
    pub fn assemble(
        payload: &TaskPayload,
        hash: &str,
        teamcode: &str,
        answers: &[Answer],
    ) -> Self {
        debug_assert_eq!(payload.questions.len(), answers.len());
        let answer_data = payload
            .questions
            .iter()
            .zip(answers)
            .map(|(question, answer)| AnswerEntry {
                id: question.id.clone(),
                answer: answer
                    .as_ref()
                    .map(|(from, to)| vec![from.clone(), to.clone()])
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            id: payload.id.clone(),
            teamcode: teamcode.to_string(),
            original_data: payload.clone(),
            original_hash: hash.to_string(),
            answer_data,
        }
    }
}
