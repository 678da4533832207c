use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Task board returned HTTP {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Task board rejected the request: {0}")]
    Rejected(String),

    #[error("Malformed task board payload: {0}")]
    Decode(#[from] serde_json::Error),
}
