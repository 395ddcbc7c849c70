use core_service::DriveIndex;

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub index: DriveIndex,
}

impl AppState {
    pub fn new(index: DriveIndex) -> Self {
        Self { index }
    }
}
