use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use time::macros::format_description;
use time::{Date, Weekday};

pub const DEFAULT_HORIZON_DAYS: u32 = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableDate {
    pub date: Date,
    pub label: String,
}

/// Bookable days strictly after `today`, up to `horizon_days` ahead, Sundays excluded.
///
/// Derived from the calendar alone; nothing here knows about technician capacity.
pub fn next_available_dates(today: Date, horizon_days: u32) -> Vec<AvailableDate> {
    let mut dates = Vec::new();
    let mut cursor = today;

    for _ in 0..horizon_days {
        let Some(next) = cursor.next_day() else {
            break;
        };
        cursor = next;

        if cursor.weekday() != Weekday::Sunday {
            dates.push(AvailableDate {
                date: cursor,
                label: date_label(cursor),
            });
        }
    }

    dates
}

pub fn is_bookable(date: Date, today: Date, horizon_days: u32) -> bool {
    if date <= today || date.weekday() == Weekday::Sunday {
        return false;
    }

    let days_ahead = (date - today).whole_days();
    days_ahead <= i64::from(horizon_days)
}

/// `Mon, Mar 2` style label.
pub fn date_label(date: Date) -> String {
    date.format(format_description!(
        "[weekday repr:short], [month repr:short] [day padding:none]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeSlot {
    EightToTen,
    TenToNoon,
    NoonToTwo,
    TwoToFour,
    FourToSix,
    SixToEight,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 6] = [
        Self::EightToTen,
        Self::TenToNoon,
        Self::NoonToTwo,
        Self::TwoToFour,
        Self::FourToSix,
        Self::SixToEight,
    ];

    pub fn start_hour(self) -> u8 {
        match self {
            Self::EightToTen => 8,
            Self::TenToNoon => 10,
            Self::NoonToTwo => 12,
            Self::TwoToFour => 14,
            Self::FourToSix => 16,
            Self::SixToEight => 18,
        }
    }

    pub fn end_hour(self) -> u8 {
        self.start_hour() + 2
    }

    pub fn label(self) -> String {
        format!(
            "{} - {}",
            twelve_hour(self.start_hour()),
            twelve_hour(self.end_hour())
        )
    }
}

pub fn time_slots() -> &'static [TimeSlot] {
    &TimeSlot::ALL
}

fn twelve_hour(hour: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        value => value,
    };
    format!("{display}:00 {suffix}")
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a published time slot; use a label such as '8:00 AM - 10:00 AM' or a start time such as '14:00'")]
pub struct ParseTimeSlotError {
    pub value: String,
}

impl FromStr for TimeSlot {
    type Err = ParseTimeSlotError;

    /// Accepts the published label or the 24-hour start time (`8:00`, `14:00`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();

        TimeSlot::ALL
            .into_iter()
            .find(|slot| {
                slot.label().eq_ignore_ascii_case(wanted)
                    || format!("{}:00", slot.start_hour()) == wanted
                    || format!("{:02}:00", slot.start_hour()) == wanted
            })
            .ok_or_else(|| ParseTimeSlotError {
                value: value.to_string(),
            })
    }
}
