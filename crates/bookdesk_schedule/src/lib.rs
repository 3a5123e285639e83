// --- File: crates/bookdesk_schedule/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
pub mod page;
pub mod routes;
pub mod store;

pub use error::ScheduleError;
pub use routes::routes;
pub use store::{InMemoryScheduleStore, ScheduleStore};
