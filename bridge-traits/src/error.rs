use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Connection to {url} failed: {reason}")]
    ConnectionFailed { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
