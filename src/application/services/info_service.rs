use chrono::{Datelike, FixedOffset, NaiveDate};

const SYNODIC_MONTH_DAYS: f64 = 29.530588853;
/// Julian day of the reference new moon (2000-01-06)
const REFERENCE_NEW_MOON_JD: f64 = 2451550.1;
/// Julian day at midnight of 0000-12-31, the day before `num_days_from_ce` == 1
const CE_EPOCH_JD: f64 = 1721424.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Greeting::Morning,
            12..=16 => Greeting::Afternoon,
            17..=20 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good Morning",
            Greeting::Afternoon => "Good Afternoon",
            Greeting::Evening => "Good Evening",
            Greeting::Night => "Good Night",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Greeting::Morning => "🌅",
            Greeting::Afternoon => "☀️",
            Greeting::Evening => "🌆",
            Greeting::Night => "🌙",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Phase at midnight of `date`, in eighths of the synodic month
    pub fn for_date(date: NaiveDate) -> Self {
        let julian_day = f64::from(date.num_days_from_ce()) + CE_EPOCH_JD;
        let age = ((julian_day - REFERENCE_NEW_MOON_JD) / SYNODIC_MONTH_DAYS).rem_euclid(1.0);
        let index = ((age * 8.0) as usize).min(7);
        Self::ALL[index]
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOfYear {
    pub day: u32,
    pub days_in_year: u32,
}

impl DayOfYear {
    pub fn for_date(date: NaiveDate) -> Self {
        let days_in_year = NaiveDate::from_ymd_opt(date.year(), 12, 31).map_or(365, |last| last.ordinal());
        Self {
            day: date.ordinal(),
            days_in_year,
        }
    }
}

/// Host zone name when known, otherwise the current UTC offset
pub fn timezone_label(zone_name: Option<&str>, offset: FixedOffset) -> String {
    match zone_name {
        Some(name) => name.to_string(),
        None => format!("UTC{offset}"),
    }
}
