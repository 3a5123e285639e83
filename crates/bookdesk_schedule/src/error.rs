// --- File: crates/bookdesk_schedule/src/error.rs ---
use axum::response::{IntoResponse, Response};
use bookdesk_common::{BookdeskError, HttpStatusCode, IntoHttpResponse};
use thiserror::Error;

/// Schedule-specific error types.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Custom date was empty
    #[error("Date is required")]
    DateRequired,

    /// Custom date was not `YYYY-MM-DD`
    #[error("Invalid date format")]
    InvalidDate(String),

    /// Start or end time was not `HH:MM`
    #[error("Invalid time format")]
    InvalidTime(String),

    /// Date id was not a well-formed identifier
    #[error("Invalid ID")]
    InvalidId(String),

    /// No date with this id
    #[error("Date not found: {0}")]
    DateNotFound(String),

    /// A required questionnaire field was empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// No request with this id
    #[error("Request not found: {0}")]
    RequestNotFound(String),

    /// The request is already completed or cancelled
    #[error("Request {0} is already {1}")]
    RequestClosed(String, String),

    /// The date has no slot at this time
    #[error("No slot at {0}")]
    SlotNotFound(String),

    /// The slot is already booked
    #[error("Slot {0} is already booked")]
    SlotTaken(String),

    /// Seed data could not be read or parsed
    #[error("Failed to load seed data: {0}")]
    SeedError(String),

    /// Storage failure
    #[error("Storage error: {0}")]
    StoreError(String),
}

/// Convert ScheduleError to BookdeskError
impl From<ScheduleError> for BookdeskError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::DateRequired => BookdeskError::ValidationError(err.to_string()),
            ScheduleError::InvalidDate(_) => BookdeskError::ValidationError(err.to_string()),
            ScheduleError::InvalidTime(_) => BookdeskError::ValidationError(err.to_string()),
            ScheduleError::InvalidId(_) => BookdeskError::ValidationError(err.to_string()),
            ScheduleError::DateNotFound(id) => BookdeskError::NotFoundError(format!("date {}", id)),
            ScheduleError::MissingField(_) => BookdeskError::ValidationError(err.to_string()),
            ScheduleError::RequestNotFound(id) => {
                BookdeskError::NotFoundError(format!("request {}", id))
            }
            ScheduleError::SlotNotFound(time) => BookdeskError::NotFoundError(format!("slot {}", time)),
            ScheduleError::RequestClosed(..) => BookdeskError::ConflictError(err.to_string()),
            ScheduleError::SlotTaken(_) => BookdeskError::ConflictError(err.to_string()),
            ScheduleError::SeedError(msg) => BookdeskError::ConfigError(msg),
            ScheduleError::StoreError(msg) => BookdeskError::InternalError(msg),
        }
    }
}

impl HttpStatusCode for ScheduleError {
    fn status_code(&self) -> u16 {
        match self {
            ScheduleError::DateRequired => 400,
            ScheduleError::InvalidDate(_) => 400,
            ScheduleError::InvalidTime(_) => 400,
            ScheduleError::InvalidId(_) => 400,
            ScheduleError::DateNotFound(_) => 404,
            ScheduleError::MissingField(_) => 400,
            ScheduleError::RequestNotFound(_) => 404,
            ScheduleError::SlotNotFound(_) => 404,
            ScheduleError::RequestClosed(..) => 409,
            ScheduleError::SlotTaken(_) => 409,
            ScheduleError::SeedError(_) => 500,
            ScheduleError::StoreError(_) => 500,
        }
    }
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        BookdeskError::from(self).into_http_response()
    }
}
