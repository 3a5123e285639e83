// File: crates/bookdesk_schedule/src/handlers.rs
use crate::error::ScheduleError;
use crate::logic::{
    add_dates, book_slot, cancel_request, deactivate_date, list_available_dates, list_requests,
    submit_request, update_slots,
};
use crate::store::ScheduleStore;
use axum::{extract::State, http::StatusCode, response::Json};
use bookdesk_common::models::{
    AddDateRequest, BookSlotRequest, CancelRequestBody, DateEntry, DeleteDateRequest,
    NewServiceRequest, ServiceRequest, UpdateSlotsRequest,
};
use bookdesk_config::AppConfig;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

// Shared state for the schedule handlers
#[derive(Clone)]
pub struct ScheduleState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ScheduleStore>,
}

/// Active dates from today on, earliest first.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/dates",
    responses(
        (status = 200, description = "Active dates with their slots", body = [DateEntry]),
        (status = 500, description = "Internal error")
    ),
    tag = "Schedule"
))]
pub async fn get_dates_handler(
    State(state): State<Arc<ScheduleState>>,
) -> Result<Json<Vec<DateEntry>>, ScheduleError> {
    let dates = list_available_dates(state.store.as_ref(), Utc::now()).await?;
    debug!("Listing {} available date(s)", dates.len());
    Ok(Json(dates))
}

/// Adds the next week, the next month, or one custom date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/add-date",
    request_body = AddDateRequest,
    responses(
        (status = 200, description = "Dates added"),
        (status = 400, description = "Missing or malformed date/time")
    ),
    tag = "Schedule"
))]
pub async fn add_date_handler(
    State(state): State<Arc<ScheduleState>>,
    Json(payload): Json<AddDateRequest>,
) -> Result<StatusCode, ScheduleError> {
    let created = add_dates(
        state.store.as_ref(),
        &state.config.schedule,
        &payload,
        Utc::now(),
    )
    .await?;
    info!("add-date: {} date(s) created", created.len());
    Ok(StatusCode::OK)
}

/// Deactivates a date; it stays stored but is no longer listed.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/delete-date",
    request_body = DeleteDateRequest,
    responses(
        (status = 200, description = "Date deactivated"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Date not found")
    ),
    tag = "Schedule"
))]
pub async fn delete_date_handler(
    State(state): State<Arc<ScheduleState>>,
    Json(payload): Json<DeleteDateRequest>,
) -> Result<StatusCode, ScheduleError> {
    deactivate_date(state.store.as_ref(), &payload.id).await?;
    Ok(StatusCode::OK)
}

/// Sets booking state of slots by position.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/update-slots",
    request_body = UpdateSlotsRequest,
    responses(
        (status = 200, description = "Slots updated"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Date not found")
    ),
    tag = "Schedule"
))]
pub async fn update_slots_handler(
    State(state): State<Arc<ScheduleState>>,
    Json(payload): Json<UpdateSlotsRequest>,
) -> Result<StatusCode, ScheduleError> {
    update_slots(state.store.as_ref(), &payload.date_id, &payload.slots).await?;
    Ok(StatusCode::OK)
}

/// All submitted service requests.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/requests",
    responses(
        (status = 200, description = "Service requests", body = [ServiceRequest])
    ),
    tag = "Schedule"
))]
pub async fn get_requests_handler(
    State(state): State<Arc<ScheduleState>>,
) -> Result<Json<Vec<ServiceRequest>>, ScheduleError> {
    Ok(Json(list_requests(state.store.as_ref()).await?))
}

/// Accepts a customer questionnaire; the request then waits for a booking.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/requests",
    request_body = NewServiceRequest,
    responses(
        (status = 201, description = "Request stored", body = ServiceRequest),
        (status = 400, description = "Name or contact missing")
    ),
    tag = "Bookings"
))]
pub async fn submit_request_handler(
    State(state): State<Arc<ScheduleState>>,
    Json(payload): Json<NewServiceRequest>,
) -> Result<(StatusCode, Json<ServiceRequest>), ScheduleError> {
    let request = submit_request(state.store.as_ref(), payload, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Books one free slot for an open request.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/book",
    request_body = BookSlotRequest,
    responses(
        (status = 200, description = "Slot booked, request completed", body = ServiceRequest),
        (status = 400, description = "Invalid ID or time"),
        (status = 404, description = "Request, date or slot not found"),
        (status = 409, description = "Slot already booked or request closed")
    ),
    tag = "Bookings"
))]
pub async fn book_slot_handler(
    State(state): State<Arc<ScheduleState>>,
    Json(payload): Json<BookSlotRequest>,
) -> Result<Json<ServiceRequest>, ScheduleError> {
    let request = book_slot(
        state.store.as_ref(),
        &payload.request_id,
        &payload.date_id,
        &payload.time,
    )
    .await?;
    Ok(Json(request))
}

/// Cancels an open request.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/cancel-request",
    request_body = CancelRequestBody,
    responses(
        (status = 200, description = "Request cancelled", body = ServiceRequest),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already closed")
    ),
    tag = "Bookings"
))]
pub async fn cancel_request_handler(
    State(state): State<Arc<ScheduleState>>,
    Json(payload): Json<CancelRequestBody>,
) -> Result<Json<ServiceRequest>, ScheduleError> {
    Ok(Json(cancel_request(state.store.as_ref(), &payload.id).await?))
}
