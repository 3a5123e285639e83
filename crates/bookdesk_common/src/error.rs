use thiserror::Error;

/// The base error type shared by the bookdesk crates.
///
/// Crate-specific errors (`ScheduleError`, `ConsoleError`) convert into or
/// out of this one; the HTTP layer turns it into a `{error:{message,code}}` body.
#[derive(Error, Debug)]
pub enum BookdeskError {
    /// The request never produced a response (connect, DNS, body read)
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The remote side answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// A response body did not have the expected shape
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The target exists but is not in a state that allows the change
    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error onto the HTTP status it is served with.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookdeskError {
    fn status_code(&self) -> u16 {
        match self {
            BookdeskError::HttpError(_) => 500,
            BookdeskError::HttpStatus { status, .. } => *status,
            BookdeskError::ParseError(_) => 400,
            BookdeskError::ConfigError(_) => 500,
            BookdeskError::ValidationError(_) => 400,
            BookdeskError::NotFoundError(_) => 404,
            BookdeskError::ConflictError(_) => 409,
            BookdeskError::TimeoutError(_) => 504,
            BookdeskError::InternalError(_) => 500,
        }
    }
}

// Sorts client failures so callers can tell a slow server from a refusal.
impl From<reqwest::Error> for BookdeskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return BookdeskError::TimeoutError(err.to_string());
        }
        if let Some(status) = err.status() {
            return BookdeskError::HttpStatus {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return BookdeskError::ParseError(err.to_string());
        }
        BookdeskError::HttpError(err.to_string())
    }
}
