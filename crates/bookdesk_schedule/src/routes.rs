// --- File: crates/bookdesk_schedule/src/routes.rs ---

use crate::handlers::{
    add_date_handler, book_slot_handler, cancel_request_handler, delete_date_handler,
    get_dates_handler, get_requests_handler, submit_request_handler, update_slots_handler,
    ScheduleState,
};
use crate::store::ScheduleStore;
use axum::{
    routing::{get, post},
    Router,
};
use bookdesk_config::AppConfig;
use std::sync::Arc;

/// Creates a router with the admin API and the customer booking routes
/// (mounted under `/api`).
pub fn routes(config: Arc<AppConfig>, store: Arc<dyn ScheduleStore>) -> Router {
    let schedule_state = Arc::new(ScheduleState { config, store });

    Router::new()
        .route("/dates", get(get_dates_handler))
        .route("/add-date", post(add_date_handler))
        .route("/delete-date", post(delete_date_handler))
        .route("/update-slots", post(update_slots_handler))
        .route("/requests", get(get_requests_handler).post(submit_request_handler))
        .route("/book", post(book_slot_handler))
        .route("/cancel-request", post(cancel_request_handler))
        .with_state(schedule_state)
}
