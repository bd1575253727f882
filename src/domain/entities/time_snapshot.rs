use chrono::{DateTime, FixedOffset};

/// Every field is a projection of the same `date` instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSnapshot {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
    pub date: DateTime<FixedOffset>,
    pub day_of_week: &'static str,
    pub day_of_month: u32,
    pub month: &'static str,
    pub year: i32,
    pub week_number: u32,
    /// ISO year owning `week_number`; differs from `year` around new year
    pub iso_week_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    pub time: String,
    pub period: Option<&'static str>,
}

/// Time-of-day reading in a named timezone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedTime {
    pub timezone: String,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub date: DateTime<FixedOffset>,
}
