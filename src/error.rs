//! Error type shared by the scanner, the backend client and the location prefill.

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Camera permission denied. Enter the serial number manually.")]
    CameraPermissionDenied,

    #[error("Location permission denied.")]
    LocationPermissionDenied,

    /// Connect failures and timeouts.
    #[error("Check your internet connection and try again.")]
    Offline,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired or not authorized. Log in again.")]
    Unauthorized,

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Validation(String),

    #[error("Location unavailable: {0}")]
    Location(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ScanError::Offline
        } else if e.is_decode() {
            ScanError::InvalidResponse(e.to_string())
        } else {
            ScanError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(e: serde_json::Error) -> Self {
        ScanError::InvalidResponse(e.to_string())
    }
}
