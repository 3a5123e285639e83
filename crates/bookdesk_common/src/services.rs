// --- File: crates/bookdesk_common/src/services.rs ---
//! Service abstractions for the admin API.
//!
//! The console talks to the schedule service only through [`AdminApiService`],
//! so it can be driven by the reqwest-backed client in production and by an
//! in-memory recorder in tests.

use std::future::Future;
use std::pin::Pin;

use crate::models::{AddDateRequest, DateEntry, ServiceRequest, SlotUpdate};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations of the admin REST API (`/api/dates`, `/api/add-date`,
/// `/api/delete-date`, `/api/update-slots`, `/api/requests`).
pub trait AdminApiService: Send + Sync {
    /// Error type returned by API operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// `GET /api/dates`
    fn list_dates(&self) -> BoxFuture<'_, Vec<DateEntry>, Self::Error>;

    /// `POST /api/add-date`. The response body is ignored.
    fn add_date(&self, request: AddDateRequest) -> BoxFuture<'_, (), Self::Error>;

    /// `POST /api/delete-date`. The response body is ignored.
    fn delete_date(&self, id: &str) -> BoxFuture<'_, (), Self::Error>;

    /// `POST /api/update-slots`. The response body is ignored.
    fn update_slots(&self, date_id: &str, slots: Vec<SlotUpdate>) -> BoxFuture<'_, (), Self::Error>;

    /// `GET /api/requests`
    fn list_requests(&self) -> BoxFuture<'_, Vec<ServiceRequest>, Self::Error>;
}
