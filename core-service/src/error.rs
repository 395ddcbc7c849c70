use bridge_traits::error::BridgeError;
use provider_onedrive::OneDriveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Drive(#[from] OneDriveError),

    #[error("Item at {0} has no download URL")]
    NotDownloadable(String),

    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),

    #[error("Initialization failed: {0}")]
    InitializationFailed(#[from] BridgeError),
}

impl ServiceError {
    /// HTTP status a front-end should answer with: 404 for paths Graph
    /// reports as missing, 500 for everything else.
    pub fn status_hint(&self) -> u16 {
        match self {
            ServiceError::Drive(error) if error.is_item_not_found() => 404,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
