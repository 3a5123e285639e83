// --- File: crates/bookdesk_console/src/api.rs ---
//! Admin API client.
//!
//! [`HttpAdminApi`] implements [`AdminApiService`] over reqwest. Any non-2xx
//! answer is a failure; success bodies of the POST endpoints are ignored.

use bookdesk_common::models::{
    AddDateRequest, DateEntry, DeleteDateRequest, ServiceRequest, SlotUpdate, UpdateSlotsRequest,
};
use bookdesk_common::services::{AdminApiService, BoxFuture};
use bookdesk_common::{create_client, BookdeskError};
use bookdesk_config::ConsoleConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// reqwest-backed client for the `/api` endpoints of the schedule service.
#[derive(Clone)]
pub struct HttpAdminApi {
    client: Client,
    base_url: String,
}

impl HttpAdminApi {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, BookdeskError> {
        let client = create_client(config.request_timeout_secs, true)?;
        Ok(Self::new(client, config.api_base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BookdeskError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), BookdeskError> {
        let url = self.url(path);
        debug!("POST {}", url);
        self.client
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl AdminApiService for HttpAdminApi {
    type Error = BookdeskError;

    fn list_dates(&self) -> BoxFuture<'_, Vec<DateEntry>, Self::Error> {
        Box::pin(async move { self.get_json("dates").await })
    }

    fn add_date(&self, request: AddDateRequest) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move { self.post_json("add-date", &request).await })
    }

    fn delete_date(&self, id: &str) -> BoxFuture<'_, (), Self::Error> {
        let body = DeleteDateRequest { id: id.to_string() };
        Box::pin(async move { self.post_json("delete-date", &body).await })
    }

    fn update_slots(&self, date_id: &str, slots: Vec<SlotUpdate>) -> BoxFuture<'_, (), Self::Error> {
        let body = UpdateSlotsRequest {
            date_id: date_id.to_string(),
            slots,
        };
        Box::pin(async move { self.post_json("update-slots", &body).await })
    }

    fn list_requests(&self) -> BoxFuture<'_, Vec<ServiceRequest>, Self::Error> {
        Box::pin(async move { self.get_json("requests").await })
    }
}

/// In-memory admin API for tests: scripted data, a call log, and per-id or
/// global failure injection.
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Mutex, MutexGuard};

    /// One recorded call against [`MockAdminApi`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ApiCall {
        ListDates,
        AddDate(AddDateRequest),
        DeleteDate(String),
        UpdateSlots { date_id: String, slots: Vec<SlotUpdate> },
        ListRequests,
    }

    #[derive(Default)]
    pub struct MockAdminApi {
        dates: Mutex<Vec<DateEntry>>,
        requests: Mutex<Vec<ServiceRequest>>,
        calls: Mutex<Vec<ApiCall>>,
        failing_deletes: Mutex<HashSet<String>>,
        offline: Mutex<bool>,
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    impl MockAdminApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dates(dates: Vec<DateEntry>) -> Self {
            let api = Self::default();
            *lock(&api.dates) = dates;
            api
        }

        pub fn set_dates(&self, dates: Vec<DateEntry>) {
            *lock(&self.dates) = dates;
        }

        pub fn set_requests(&self, requests: Vec<ServiceRequest>) {
            *lock(&self.requests) = requests;
        }

        /// Deleting `id` will answer with a 500.
        pub fn fail_delete(&self, id: &str) {
            lock(&self.failing_deletes).insert(id.to_string());
        }

        /// Every call fails as if the server were unreachable.
        pub fn set_offline(&self, offline: bool) {
            *lock(&self.offline) = offline;
        }

        pub fn dates(&self) -> Vec<DateEntry> {
            lock(&self.dates).clone()
        }

        pub fn calls(&self) -> Vec<ApiCall> {
            lock(&self.calls).clone()
        }

        pub fn clear_calls(&self) {
            lock(&self.calls).clear();
        }

        fn record(&self, call: ApiCall) -> Result<(), BookdeskError> {
            lock(&self.calls).push(call);
            if *lock(&self.offline) {
                return Err(BookdeskError::HttpError("connection refused".to_string()));
            }
            Ok(())
        }
    }

    impl AdminApiService for MockAdminApi {
        type Error = BookdeskError;

        fn list_dates(&self) -> BoxFuture<'_, Vec<DateEntry>, Self::Error> {
            Box::pin(async move {
                self.record(ApiCall::ListDates)?;
                Ok(self.dates())
            })
        }

        fn add_date(&self, request: AddDateRequest) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move { self.record(ApiCall::AddDate(request)) })
        }

        fn delete_date(&self, id: &str) -> BoxFuture<'_, (), Self::Error> {
            let id = id.to_string();
            Box::pin(async move {
                self.record(ApiCall::DeleteDate(id.clone()))?;
                if lock(&self.failing_deletes).contains(&id) {
                    return Err(BookdeskError::HttpStatus {
                        status: 500,
                        message: format!("delete of {} failed", id),
                    });
                }
                lock(&self.dates).retain(|entry| entry.id != id);
                Ok(())
            })
        }

        fn update_slots(&self, date_id: &str, slots: Vec<SlotUpdate>) -> BoxFuture<'_, (), Self::Error> {
            let date_id = date_id.to_string();
            Box::pin(async move {
                self.record(ApiCall::UpdateSlots {
                    date_id: date_id.clone(),
                    slots: slots.clone(),
                })?;
                let mut dates = lock(&self.dates);
                if let Some(entry) = dates.iter_mut().find(|entry| entry.id == date_id) {
                    for update in &slots {
                        if let Some(slot) = entry.time_slots.get_mut(update.index) {
                            slot.is_booked = update.is_booked;
                        }
                    }
                }
                Ok(())
            })
        }

        fn list_requests(&self) -> BoxFuture<'_, Vec<ServiceRequest>, Self::Error> {
            Box::pin(async move {
                self.record(ApiCall::ListRequests)?;
                Ok(lock(&self.requests).clone())
            })
        }
    }
}
