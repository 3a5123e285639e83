// --- File: crates/bookdesk_console/src/error.rs ---

use bookdesk_common::BookdeskError;
use thiserror::Error;

/// Boxed error from whichever [`AdminApiService`](bookdesk_common::services::AdminApiService)
/// implementation the console is driving.
pub type ApiError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of a console operation.
///
/// `Validation` and `NotFound` have already been shown to the operator as an
/// alert; `Api` and `PartialDelete` are surfaced through the view's notice.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("API request failed: {0}")]
    Api(#[source] ApiError),

    #[error("{} of {attempted} deletions failed", .failed.len())]
    PartialDelete {
        attempted: usize,
        /// Ids whose delete request failed
        failed: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    pub fn api<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        ConsoleError::Api(Box::new(error))
    }
}

impl From<BookdeskError> for ConsoleError {
    fn from(err: BookdeskError) -> Self {
        match err {
            BookdeskError::ConfigError(msg) => ConsoleError::Config(msg),
            other => ConsoleError::api(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_delete_message() {
        let err = ConsoleError::PartialDelete {
            attempted: 3,
            failed: vec!["a".to_string()],
        };
        assert_eq!(err.to_string(), "1 of 3 deletions failed");
    }

    #[test]
    fn test_from_bookdesk_error() {
        let err: ConsoleError = BookdeskError::ConfigError("bad zone".to_string()).into();
        assert!(matches!(err, ConsoleError::Config(_)));

        let err: ConsoleError = BookdeskError::TimeoutError("slow".to_string()).into();
        assert!(matches!(err, ConsoleError::Api(_)));
        assert!(err.to_string().contains("slow"));
    }
}
