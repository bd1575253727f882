use chrono::{Month, Weekday};

pub trait WeekdayName {
    fn to_long_en(&self) -> &'static str;
}

pub trait MonthName {
    fn to_long_en(&self) -> &'static str;
}

impl WeekdayName for Weekday {
    /// Converts weekday to its full english name
    fn to_long_en(&self) -> &'static str {
        match self {
            Weekday::Sun => "Sunday",
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
        }
    }
}

impl MonthName for Month {
    fn to_long_en(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

/// Month from a 1-based month number, January when out of range
pub fn month_from_number(month: u32) -> Month {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .unwrap_or(Month::January)
}
