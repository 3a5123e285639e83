// --- File: crates/bookdesk_common/src/lib.rs ---

// Declare modules within this crate
pub mod models;    // Wire models shared by the console and the schedule service
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod services;  // Service abstractions
pub mod logging;   // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{BookdeskError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{
    IntoHttpResponse,
    client::{
        HTTP_CLIENT,
        create_client,
    },
};

// Re-export logging utilities for easier access
pub use logging::{init_from_name, init_with_level, log_error};

// This crate provides functionality shared by the console and the schedule service:
// the wire models, the error taxonomy, HTTP helpers and logging setup.
