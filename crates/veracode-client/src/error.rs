use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid timestamp {value:?}: {reason}")]
    Timestamp { value: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
