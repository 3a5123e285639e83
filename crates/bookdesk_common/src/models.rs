// --- File: crates/bookdesk_common/src/models.rs ---

// Wire models shared by the admin console and the schedule service.
// Field names follow the JSON the admin API has always spoken, including the
// two camelCase request fields (`startTime`, `endTime`, `dateId`).

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A single bookable time of day within a [`DateEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimeSlot {
    /// Display time, `HH:MM`
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub time: String,
    pub is_booked: bool,
}

impl TimeSlot {
    pub fn open(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            is_booked: false,
        }
    }
}

/// A bookable calendar day with its ordered slot list.
///
/// Slots are addressed by their position in `time_slots`; the order served by
/// `GET /api/dates` is the order `POST /api/update-slots` indexes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DateEntry {
    pub id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DateEntry {
    /// Number of slots not yet booked.
    pub fn free_slots(&self) -> usize {
        self.time_slots.iter().filter(|slot| !slot.is_booked).count()
    }

    pub fn total_slots(&self) -> usize {
        self.time_slots.len()
    }
}

/// A customer-submitted service inquiry, optionally linked to an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServiceRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub chat_id: i64,

    // contact
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,

    // car
    #[serde(default)]
    pub volvo_model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub engine_type: String,
    #[serde(default)]
    pub engine_volume: String,
    #[serde(default)]
    pub mileage: String,

    // problem
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub problem_first_appeared: String,
    #[serde(default)]
    pub problem_frequency: String,
    #[serde(default)]
    pub safety_impact: String,
    #[serde(default)]
    pub previous_repairs: String,
    #[serde(default)]
    pub recent_changes: String,

    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub appointment_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub stage: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// "in_progress", "completed" or "cancelled"
    #[serde(default)]
    pub status: String,
}

/// Questionnaire position of a [`ServiceRequest`], stored as its integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum RequestStage {
    Start = 0,
    PersonalInfo = 1,
    CarInfo = 2,
    ProblemInfo = 3,
    DateSelection = 4,
    Completed = 5,
}

impl From<RequestStage> for i32 {
    fn from(stage: RequestStage) -> Self {
        stage as i32
    }
}

pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

impl ServiceRequest {
    /// Still open for a booking or a cancellation.
    pub fn is_in_progress(&self) -> bool {
        self.status == STATUS_IN_PROGRESS
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` day (midnight UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

/// Accepts `null`, a missing field, or the zero timestamp `0001-01-01T00:00:00Z`
/// (what a never-set time serializes to upstream) as "no appointment".
fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|ts| ts.year() > 1))
}

/// Body of `POST /api/add-date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AddDateRequest {
    /// Server adds the following week of dates with default slots.
    Week,
    /// Server adds the following month of dates with default slots.
    Month,
    /// One specific date with a generated slot range.
    Custom {
        /// `YYYY-MM-DD`
        #[serde(default)]
        date: String,
        /// `HH:MM`
        #[serde(rename = "startTime", default)]
        start_time: String,
        /// `HH:MM`
        #[serde(rename = "endTime", default)]
        end_time: String,
        /// Slot length in minutes
        #[serde(default)]
        interval: i64,
    },
}

/// Body of `POST /api/delete-date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteDateRequest {
    pub id: String,
}

/// One positional booking-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotUpdate {
    pub index: usize,
    pub is_booked: bool,
}

/// Body of `POST /api/update-slots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateSlotsRequest {
    #[serde(rename = "dateId")]
    pub date_id: String,
    pub slots: Vec<SlotUpdate>,
}

/// Body of `POST /api/requests`: the answers of the customer questionnaire.
///
/// `name` and `contact` are required; everything else may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(default)]
pub struct NewServiceRequest {
    pub user_id: i64,
    pub chat_id: i64,
    pub name: String,
    pub contact: String,
    pub volvo_model: String,
    pub year: String,
    pub engine_type: String,
    pub engine_volume: String,
    pub mileage: String,
    pub problem: String,
    pub problem_first_appeared: String,
    pub problem_frequency: String,
    pub safety_impact: String,
    pub previous_repairs: String,
    pub recent_changes: String,
}

/// Body of `POST /api/book`: claims one free slot for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookSlotRequest {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "dateId")]
    pub date_id: String,
    /// `HH:MM`, one of the date's slot times
    pub time: String,
}

/// Body of `POST /api/cancel-request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancelRequestBody {
    pub id: String,
}
