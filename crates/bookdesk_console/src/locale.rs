// --- File: crates/bookdesk_console/src/locale.rs ---
//! ru-RU display formatting in the operator's time zone.

use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::ConsoleError;

const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Moscow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuLocale {
    tz: Tz,
}

impl Default for RuLocale {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_ZONE)
    }
}

impl RuLocale {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Builds a locale from an IANA zone name such as `Europe/Moscow`.
    pub fn from_zone_name(name: &str) -> Result<Self, ConsoleError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ConsoleError::Config(format!("unknown time zone: {}", name)))
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// `dd.mm.yyyy`
    pub fn format_date(&self, ts: &DateTime<Utc>) -> String {
        ts.with_timezone(&self.tz).format("%d.%m.%Y").to_string()
    }

    /// `HH:MM`
    pub fn format_time(&self, ts: &DateTime<Utc>) -> String {
        ts.with_timezone(&self.tz).format("%H:%M").to_string()
    }

    /// `dd.mm.yyyy HH:MM`
    pub fn format_date_time(&self, ts: &DateTime<Utc>) -> String {
        format!("{} {}", self.format_date(ts), self.format_time(ts))
    }

    /// Full lowercase weekday name, e.g. `понедельник`.
    pub fn weekday(&self, ts: &DateTime<Utc>) -> &'static str {
        match ts.with_timezone(&self.tz).weekday() {
            Weekday::Mon => "понедельник",
            Weekday::Tue => "вторник",
            Weekday::Wed => "среда",
            Weekday::Thu => "четверг",
            Weekday::Fri => "пятница",
            Weekday::Sat => "суббота",
            Weekday::Sun => "воскресенье",
        }
    }
}
