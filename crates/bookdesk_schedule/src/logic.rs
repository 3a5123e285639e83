// --- File: crates/bookdesk_schedule/src/logic.rs ---
use bookdesk_common::models::{
    AddDateRequest, DateEntry, NewServiceRequest, RequestStage, ServiceRequest, SlotUpdate,
    TimeSlot, STATUS_CANCELLED, STATUS_COMPLETED, STATUS_IN_PROGRESS,
};
use bookdesk_config::ScheduleConfig;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use std::path::Path;
use tracing::{error, info, warn};

use crate::error::ScheduleError;
use crate::store::ScheduleStore;

/// Slot length used when neither the request nor the config gives a usable one.
pub const FALLBACK_INTERVAL_MINUTES: i64 = 60;

// --- Slot generation ---

/// Parses `HH:MM` into minutes after midnight.
pub fn parse_time(value: &str) -> Result<i64, ScheduleError> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(value.to_string()))?;
    Ok(i64::from(time.hour()) * 60 + i64::from(time.minute()))
}

fn format_minutes(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// One open slot per full hour from `day_start_hour` to `day_end_hour`, both inclusive.
pub fn default_slots(config: &ScheduleConfig) -> Vec<TimeSlot> {
    (config.day_start_hour..=config.day_end_hour)
        .map(|hour| TimeSlot::open(format!("{:02}:00", hour)))
        .collect()
}

/// Open slots starting at `start` and stepping by `interval` while before `end`
/// (all in minutes after midnight). An empty list when `end <= start`.
pub fn range_slots(start: i64, end: i64, interval: i64) -> Vec<TimeSlot> {
    let step = if interval > 0 { interval } else { FALLBACK_INTERVAL_MINUTES };
    let mut slots = Vec::new();
    let mut minutes = start;
    while minutes < end {
        slots.push(TimeSlot::open(format_minutes(minutes)));
        minutes = match minutes.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    slots
}

/// Slots a new date gets for this request.
///
/// Custom requests with both times set get a generated range; everything else
/// gets [`default_slots`].
pub fn slots_for_request(
    request: &AddDateRequest,
    config: &ScheduleConfig,
) -> Result<Vec<TimeSlot>, ScheduleError> {
    match request {
        AddDateRequest::Custom {
            start_time,
            end_time,
            interval,
            ..
        } if !start_time.is_empty() && !end_time.is_empty() => {
            let start = parse_time(start_time)?;
            let end = parse_time(end_time)?;
            let interval = if *interval > 0 {
                *interval
            } else {
                config.default_interval_minutes
            };
            Ok(range_slots(start, end, interval))
        }
        _ => Ok(default_slots(config)),
    }
}

/// Calendar timestamps a request adds, relative to `now`.
pub fn dates_for_request(
    request: &AddDateRequest,
    config: &ScheduleConfig,
    now: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, ScheduleError> {
    let following_days = |count: u32| {
        (1..=i64::from(count))
            .map(|offset| now + Duration::days(offset))
            .collect::<Vec<_>>()
    };

    match request {
        AddDateRequest::Week => Ok(following_days(config.week_days)),
        AddDateRequest::Month => Ok(following_days(config.month_days)),
        AddDateRequest::Custom { date, .. } => {
            if date.trim().is_empty() {
                return Err(ScheduleError::DateRequired);
            }
            let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .map_err(|_| ScheduleError::InvalidDate(date.clone()))?;
            Ok(vec![day.and_time(NaiveTime::MIN).and_utc()])
        }
    }
}

// --- Operations ---

/// Active dates from the start of today (UTC) on, earliest first.
pub async fn list_available_dates(
    store: &dyn ScheduleStore,
    now: DateTime<Utc>,
) -> Result<Vec<DateEntry>, ScheduleError> {
    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let mut dates: Vec<DateEntry> = store
        .all_dates()
        .await?
        .into_iter()
        .filter(|entry| entry.is_active && entry.date >= today)
        .collect();
    dates.sort_by_key(|entry| entry.date);
    Ok(dates)
}

/// Creates the dates a request describes. A date that fails to save is logged
/// and skipped; the rest are still stored.
pub async fn add_dates(
    store: &dyn ScheduleStore,
    config: &ScheduleConfig,
    request: &AddDateRequest,
    now: DateTime<Utc>,
) -> Result<Vec<DateEntry>, ScheduleError> {
    let dates = dates_for_request(request, config, now)?;
    let time_slots = slots_for_request(request, config)?;

    let mut created = Vec::with_capacity(dates.len());
    for date in dates {
        let entry = DateEntry {
            id: String::new(),
            date,
            is_active: true,
            time_slots: time_slots.clone(),
            created_at: None,
            updated_at: None,
        };
        match store.save_date(entry).await {
            Ok(saved) => {
                info!("Added date: {}", date.format("%d.%m.%Y"));
                created.push(saved);
            }
            Err(e) => error!("Failed to save date {}: {}", date.format("%d.%m.%Y"), e),
        }
    }
    Ok(created)
}

/// Checks that `id` is a well-formed date identifier.
pub fn validate_id(id: &str) -> Result<(), ScheduleError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ScheduleError::InvalidId(id.to_string()))
}

async fn find_date(store: &dyn ScheduleStore, id: &str) -> Result<DateEntry, ScheduleError> {
    validate_id(id)?;
    store
        .get_date(id)
        .await?
        .ok_or_else(|| ScheduleError::DateNotFound(id.to_string()))
}

/// Soft delete: the date stays stored but is no longer listed.
pub async fn deactivate_date(store: &dyn ScheduleStore, id: &str) -> Result<DateEntry, ScheduleError> {
    let mut entry = find_date(store, id).await?;
    entry.is_active = false;
    let saved = store.save_date(entry).await?;
    info!("Deactivated date {} ({})", saved.id, saved.date.format("%d.%m.%Y"));
    Ok(saved)
}

/// Applies positional booking changes. Indexes past the end of the slot list
/// are ignored.
pub fn apply_slot_updates(entry: &mut DateEntry, updates: &[SlotUpdate]) -> usize {
    let mut applied = 0;
    for update in updates {
        match entry.time_slots.get_mut(update.index) {
            Some(slot) => {
                slot.is_booked = update.is_booked;
                applied += 1;
            }
            None => warn!(
                "Ignoring slot index {} for date {} ({} slots)",
                update.index,
                entry.id,
                entry.time_slots.len()
            ),
        }
    }
    applied
}

pub async fn update_slots(
    store: &dyn ScheduleStore,
    date_id: &str,
    updates: &[SlotUpdate],
) -> Result<DateEntry, ScheduleError> {
    let mut entry = find_date(store, date_id).await?;
    let applied = apply_slot_updates(&mut entry, updates);
    let saved = store.save_date(entry).await?;
    info!("Updated {} slot(s) of date {}", applied, saved.id);
    Ok(saved)
}

pub async fn list_requests(store: &dyn ScheduleStore) -> Result<Vec<ServiceRequest>, ScheduleError> {
    store.all_requests().await
}

// --- Customer bookings ---

/// Stores a filled-in questionnaire as an open request waiting for a date.
pub async fn submit_request(
    store: &dyn ScheduleStore,
    answers: NewServiceRequest,
    now: DateTime<Utc>,
) -> Result<ServiceRequest, ScheduleError> {
    if answers.name.trim().is_empty() {
        return Err(ScheduleError::MissingField("name"));
    }
    if answers.contact.trim().is_empty() {
        return Err(ScheduleError::MissingField("contact"));
    }

    let request = ServiceRequest {
        id: String::new(),
        user_id: answers.user_id,
        chat_id: answers.chat_id,
        name: answers.name.trim().to_string(),
        contact: answers.contact.trim().to_string(),
        volvo_model: answers.volvo_model,
        year: answers.year,
        engine_type: answers.engine_type,
        engine_volume: answers.engine_volume,
        mileage: answers.mileage,
        problem: answers.problem,
        problem_first_appeared: answers.problem_first_appeared,
        problem_frequency: answers.problem_frequency,
        safety_impact: answers.safety_impact,
        previous_repairs: answers.previous_repairs,
        recent_changes: answers.recent_changes,
        appointment_date: None,
        stage: RequestStage::DateSelection.into(),
        created_at: now,
        updated_at: None,
        status: STATUS_IN_PROGRESS.to_string(),
    };
    let saved = store.save_request(request).await?;
    info!("Received service request {} from {}", saved.id, saved.name);
    Ok(saved)
}

async fn find_open_request(
    store: &dyn ScheduleStore,
    id: &str,
) -> Result<ServiceRequest, ScheduleError> {
    let request = store
        .get_request(id)
        .await?
        .ok_or_else(|| ScheduleError::RequestNotFound(id.to_string()))?;
    if !request.is_in_progress() {
        return Err(ScheduleError::RequestClosed(id.to_string(), request.status));
    }
    Ok(request)
}

/// Books the slot at `time` on `date_id` for an open request.
///
/// The slot is marked booked and the request completed with its
/// `appointment_date` set to that day and time (UTC).
pub async fn book_slot(
    store: &dyn ScheduleStore,
    request_id: &str,
    date_id: &str,
    time: &str,
) -> Result<ServiceRequest, ScheduleError> {
    let mut request = find_open_request(store, request_id).await?;
    validate_id(date_id)?;
    let minutes = parse_time(time)?;

    let entry = store.claim_slot(date_id, time.trim()).await?;
    let appointment =
        entry.date.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::minutes(minutes);

    request.appointment_date = Some(appointment);
    request.stage = RequestStage::Completed.into();
    request.status = STATUS_COMPLETED.to_string();
    let saved = match store.close_request(request).await {
        Ok(saved) => saved,
        Err(e) => {
            // another booking or a cancellation got there first
            if let Err(undo) = store.release_slot(&entry.id, time.trim()).await {
                error!("Failed to release slot {} of date {}: {}", time, entry.id, undo);
            }
            return Err(e);
        }
    };
    info!(
        "Booked {} for request {}",
        appointment.format("%d.%m.%Y %H:%M"),
        saved.id
    );
    Ok(saved)
}

/// Withdraws an open request. Completed or cancelled ones are left alone.
pub async fn cancel_request(
    store: &dyn ScheduleStore,
    request_id: &str,
) -> Result<ServiceRequest, ScheduleError> {
    let mut request = find_open_request(store, request_id).await?;
    request.status = STATUS_CANCELLED.to_string();
    let saved = store.close_request(request).await?;
    info!("Cancelled service request {}", saved.id);
    Ok(saved)
}

/// Reads a JSON array of service requests used to seed the store.
pub async fn load_seed_requests(path: &Path) -> Result<Vec<ServiceRequest>, ScheduleError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ScheduleError::SeedError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ScheduleError::SeedError(format!("{}: {}", path.display(), e)))
}
