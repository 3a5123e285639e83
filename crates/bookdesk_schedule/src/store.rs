// --- File: crates/bookdesk_schedule/src/store.rs ---
//! Storage abstraction for appointment dates and service requests.
//!
//! Handlers only see [`ScheduleStore`]; the in-memory implementation keeps
//! everything behind `RwLock`s and is what the backend runs with.

use bookdesk_common::models::{DateEntry, ServiceRequest};
use bookdesk_common::services::BoxFuture;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::ScheduleError;

/// Persistence operations the schedule service needs.
pub trait ScheduleStore: Send + Sync {
    /// Insert or replace a date. A blank id gets a fresh one; `created_at` is
    /// set on first save and `updated_at` on every save. Returns the stored entry.
    fn save_date(&self, entry: DateEntry) -> BoxFuture<'_, DateEntry, ScheduleError>;

    /// Look up one date by id.
    fn get_date(&self, id: &str) -> BoxFuture<'_, Option<DateEntry>, ScheduleError>;

    /// Every stored date, active or not, in insertion order.
    fn all_dates(&self) -> BoxFuture<'_, Vec<DateEntry>, ScheduleError>;

    /// Every stored request, in insertion order.
    fn all_requests(&self) -> BoxFuture<'_, Vec<ServiceRequest>, ScheduleError>;

    /// Look up one request by id.
    fn get_request(&self, id: &str) -> BoxFuture<'_, Option<ServiceRequest>, ScheduleError>;

    /// Insert or replace a request by id.
    fn save_request(&self, request: ServiceRequest) -> BoxFuture<'_, ServiceRequest, ScheduleError>;

    /// Replaces a request that is still in progress. Fails with
    /// [`ScheduleError::RequestClosed`] if the stored one has been completed or
    /// cancelled meanwhile. Check and write happen as one step.
    fn close_request(&self, request: ServiceRequest) -> BoxFuture<'_, ServiceRequest, ScheduleError>;

    /// Marks the slot at `time` of an active date booked, failing with
    /// [`ScheduleError::SlotTaken`] if it already is. Check and write happen
    /// as one step, so two callers cannot claim the same slot.
    fn claim_slot(&self, date_id: &str, time: &str) -> BoxFuture<'_, DateEntry, ScheduleError>;

    /// Frees the slot at `time` again. Missing dates or slots are ignored.
    fn release_slot(&self, date_id: &str, time: &str) -> BoxFuture<'_, (), ScheduleError>;
}

struct Table<T> {
    rows: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn upsert(&mut self, id: String, row: T) {
        if self.rows.insert(id.clone(), row).is_none() {
            self.order.push(id);
        }
    }

    fn ordered(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.rows.get(id).cloned())
            .collect()
    }
}

/// In-memory [`ScheduleStore`].
#[derive(Default)]
pub struct InMemoryScheduleStore {
    dates: RwLock<Table<DateEntry>>,
    requests: RwLock<Table<ServiceRequest>>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with service requests.
    pub fn with_requests(requests: Vec<ServiceRequest>) -> Self {
        let store = Self::new();
        if let Ok(mut table) = store.requests.write() {
            for mut request in requests {
                if request.id.is_empty() {
                    request.id = new_id();
                }
                table.upsert(request.id.clone(), request);
            }
        }
        store
    }
}

/// Fresh identifier for a stored row.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn poisoned<E>(_: E) -> ScheduleError {
    ScheduleError::StoreError("store lock poisoned".to_string())
}

impl ScheduleStore for InMemoryScheduleStore {
    fn save_date(&self, mut entry: DateEntry) -> BoxFuture<'_, DateEntry, ScheduleError> {
        Box::pin(async move {
            let now = Utc::now();
            let mut table = self.dates.write().map_err(poisoned)?;
            if entry.id.is_empty() {
                entry.id = new_id();
            }
            let created_at = table
                .rows
                .get(&entry.id)
                .and_then(|existing| existing.created_at)
                .or(entry.created_at)
                .unwrap_or(now);
            entry.created_at = Some(created_at);
            entry.updated_at = Some(now);
            table.upsert(entry.id.clone(), entry.clone());
            Ok(entry)
        })
    }

    fn get_date(&self, id: &str) -> BoxFuture<'_, Option<DateEntry>, ScheduleError> {
        let id = id.to_string();
        Box::pin(async move {
            let table = self.dates.read().map_err(poisoned)?;
            Ok(table.rows.get(&id).cloned())
        })
    }

    fn all_dates(&self) -> BoxFuture<'_, Vec<DateEntry>, ScheduleError> {
        Box::pin(async move {
            let table = self.dates.read().map_err(poisoned)?;
            Ok(table.ordered())
        })
    }

    fn all_requests(&self) -> BoxFuture<'_, Vec<ServiceRequest>, ScheduleError> {
        Box::pin(async move {
            let table = self.requests.read().map_err(poisoned)?;
            Ok(table.ordered())
        })
    }

    fn get_request(&self, id: &str) -> BoxFuture<'_, Option<ServiceRequest>, ScheduleError> {
        let id = id.to_string();
        Box::pin(async move {
            let table = self.requests.read().map_err(poisoned)?;
            Ok(table.rows.get(&id).cloned())
        })
    }

    fn save_request(&self, mut request: ServiceRequest) -> BoxFuture<'_, ServiceRequest, ScheduleError> {
        Box::pin(async move {
            let mut table = self.requests.write().map_err(poisoned)?;
            if request.id.is_empty() {
                request.id = new_id();
            }
            request.updated_at = Some(Utc::now());
            table.upsert(request.id.clone(), request.clone());
            Ok(request)
        })
    }

    fn close_request(&self, mut request: ServiceRequest) -> BoxFuture<'_, ServiceRequest, ScheduleError> {
        Box::pin(async move {
            let mut table = self.requests.write().map_err(poisoned)?;
            let stored = table
                .rows
                .get(&request.id)
                .ok_or_else(|| ScheduleError::RequestNotFound(request.id.clone()))?;
            if !stored.is_in_progress() {
                return Err(ScheduleError::RequestClosed(request.id.clone(), stored.status.clone()));
            }
            request.updated_at = Some(Utc::now());
            table.upsert(request.id.clone(), request.clone());
            Ok(request)
        })
    }

    fn claim_slot(&self, date_id: &str, time: &str) -> BoxFuture<'_, DateEntry, ScheduleError> {
        let date_id = date_id.to_string();
        let time = time.to_string();
        Box::pin(async move {
            let mut table = self.dates.write().map_err(poisoned)?;
            let entry = table
                .rows
                .get_mut(&date_id)
                .filter(|entry| entry.is_active)
                .ok_or_else(|| ScheduleError::DateNotFound(date_id.clone()))?;
            let slot = entry
                .time_slots
                .iter_mut()
                .find(|slot| slot.time == time)
                .ok_or_else(|| ScheduleError::SlotNotFound(time.clone()))?;
            if slot.is_booked {
                return Err(ScheduleError::SlotTaken(time));
            }
            slot.is_booked = true;
            entry.updated_at = Some(Utc::now());
            Ok(entry.clone())
        })
    }

    fn release_slot(&self, date_id: &str, time: &str) -> BoxFuture<'_, (), ScheduleError> {
        let date_id = date_id.to_string();
        let time = time.to_string();
        Box::pin(async move {
            let mut table = self.dates.write().map_err(poisoned)?;
            if let Some(entry) = table.rows.get_mut(&date_id) {
                if let Some(slot) = entry.time_slots.iter_mut().find(|slot| slot.time == time) {
                    slot.is_booked = false;
                    entry.updated_at = Some(Utc::now());
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookdesk_common::models::TimeSlot;
    use chrono::TimeZone;

    fn entry(id: &str) -> DateEntry {
        DateEntry {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap(),
            is_active: true,
            time_slots: vec![TimeSlot::open("09:00")],
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_timestamps() {
        let store = InMemoryScheduleStore::new();
        let saved = store.save_date(entry("")).await.unwrap();
        assert_eq!(saved.id.len(), 32);
        assert!(saved.created_at.is_some());
        assert!(saved.updated_at.is_some());

        let fetched = store.get_date(&saved.id).await.unwrap();
        assert_eq!(fetched, Some(saved));
    }

    #[tokio::test]
    async fn test_resave_keeps_created_at_and_order() {
        let store = InMemoryScheduleStore::new();
        let first = store.save_date(entry("a")).await.unwrap();
        store.save_date(entry("b")).await.unwrap();

        let mut changed = first.clone();
        changed.is_active = false;
        changed.created_at = None;
        let resaved = store.save_date(changed).await.unwrap();
        assert_eq!(resaved.created_at, first.created_at);

        let ids: Vec<String> = store
            .all_dates()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_date_is_none() {
        let store = InMemoryScheduleStore::new();
        assert_eq!(store.get_date("nope").await.unwrap(), None);
        assert_eq!(store.get_request("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_claim_slot_once() {
        let store = InMemoryScheduleStore::new();
        store.save_date(entry("a")).await.unwrap();

        let claimed = store.claim_slot("a", "09:00").await.unwrap();
        assert!(claimed.time_slots[0].is_booked);
        assert!(store.get_date("a").await.unwrap().unwrap().time_slots[0].is_booked);

        assert!(matches!(
            store.claim_slot("a", "09:00").await,
            Err(ScheduleError::SlotTaken(_))
        ));
        assert!(matches!(
            store.claim_slot("a", "10:00").await,
            Err(ScheduleError::SlotNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_close_request_only_once() {
        let store = InMemoryScheduleStore::new();
        let open: ServiceRequest = serde_json::from_value(serde_json::json!({
            "name": "Анна",
            "created_at": "2025-01-15T10:30:00Z",
            "status": "in_progress"
        }))
        .unwrap();
        let open = store.save_request(open).await.unwrap();

        let mut done = open.clone();
        done.status = "completed".to_string();
        store.close_request(done).await.unwrap();

        let mut again = open.clone();
        again.status = "cancelled".to_string();
        assert!(matches!(
            store.close_request(again).await,
            Err(ScheduleError::RequestClosed(..))
        ));
        let stored = store.get_request(&open.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "completed");
    }

    #[tokio::test]
    async fn test_claim_slot_skips_inactive_dates() {
        let store = InMemoryScheduleStore::new();
        let mut inactive = entry("a");
        inactive.is_active = false;
        store.save_date(inactive).await.unwrap();

        assert!(matches!(
            store.claim_slot("a", "09:00").await,
            Err(ScheduleError::DateNotFound(_))
        ));
    }
}
