use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub trait Clock {
    fn today(&self) -> Date;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: Date,
}

impl FixedClock {
    pub fn new(today: Date) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.today
    }
}

pub fn parse_iso_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
}

pub fn format_iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}
