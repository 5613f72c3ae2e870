use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Login rejected by backend: {status}")]
    LoginRejected { status: StatusCode },

    #[error("Session rejected by backend: {status}")]
    SessionExpired { status: StatusCode },

    #[error("No file selected")]
    NoFileSelected,

    #[error("An upload is already in flight")]
    UploadInFlight,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Backend returned {status} during {operation}")]
    Backend {
        operation: &'static str,
        status: StatusCode,
    },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
