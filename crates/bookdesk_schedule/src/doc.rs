// File: crates/bookdesk_schedule/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use bookdesk_common::models::{
    AddDateRequest, BookSlotRequest, CancelRequestBody, DateEntry, DeleteDateRequest,
    NewServiceRequest, ServiceRequest, SlotUpdate, TimeSlot, UpdateSlotsRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_dates_handler,
        crate::handlers::add_date_handler,
        crate::handlers::delete_date_handler,
        crate::handlers::update_slots_handler,
        crate::handlers::get_requests_handler,
        crate::handlers::submit_request_handler,
        crate::handlers::book_slot_handler,
        crate::handlers::cancel_request_handler
    ),
    components(
        schemas(
            DateEntry,
            TimeSlot,
            AddDateRequest,
            DeleteDateRequest,
            SlotUpdate,
            UpdateSlotsRequest,
            ServiceRequest,
            NewServiceRequest,
            BookSlotRequest,
            CancelRequestBody
        )
    ),
    tags(
        (name = "Schedule", description = "Appointment dates, slots and service requests"),
        (name = "Bookings", description = "Customer requests and slot booking")
    ),
    servers(
        (url = "/api", description = "Admin API")
    )
)]
pub struct ScheduleApiDoc;
