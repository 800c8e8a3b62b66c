use thiserror::Error;

/// Errors raised while binding to or driving the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("Missing element: #{0}")]
    MissingElement(String),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Failure reported by a [`Transport`](crate::transport::Transport) when the
/// request itself could not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Terminal failure of a single form submission.
///
/// The `Display` text is exactly what the user sees in the notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    #[error("Could not save file: {0}")]
    Download(String),
}

/// Configuration parsing and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
