use chrono_tz::{TZ_VARIANTS, Tz};
use fuzzy_matcher::FuzzyMatcher;
use std::collections::HashMap;

const MAX_SEARCH_RESULTS: usize = 10;

/// Catalog entry for a timezone offered when adding a world clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneInfo {
    pub tz: Tz,
    pub city: Option<&'static str>,
}

impl TimezoneInfo {
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }
}

pub struct TimezoneManager {
    timezones: HashMap<&'static str, TimezoneInfo>,
    city_to_timezone: HashMap<String, Vec<&'static str>>, // city -> timezone list
    fuzzy_matcher: fuzzy_matcher::skim::SkimMatcherV2,
}

impl TimezoneManager {
    pub fn new() -> Self {
        let mut timezones = HashMap::new();
        let mut city_to_timezone = HashMap::new();

        for tz in TZ_VARIANTS.iter().copied() {
            let city = Self::extract_city_name(tz.name());

            if let Some(city_name) = city {
                city_to_timezone
                    .entry(city_name.replace('_', " ").to_lowercase())
                    .or_insert_with(Vec::new)
                    .push(tz.name());
            }

            timezones.insert(tz.name(), TimezoneInfo { tz, city });
        }

        Self {
            timezones,
            city_to_timezone,
            fuzzy_matcher: fuzzy_matcher::skim::SkimMatcherV2::default(),
        }
    }

    /// Extracts the city part of a timezone name (ex: "America/New_York" => "New_York")
    fn extract_city_name(tz_name: &'static str) -> Option<&'static str> {
        match tz_name.rsplit_once('/') {
            Some((_, city)) if !city.is_empty() => Some(city),
            _ => None,
        }
    }

    /// Parse an IANA identifier into a timezone
    pub fn resolve(&self, timezone: &str) -> Option<Tz> {
        self.timezones
            .get(timezone)
            .map(|info| info.tz)
            .or_else(|| Tz::from_str_insensitive(timezone).ok())
    }

    pub fn validate_timezone(&self, timezone: &str) -> bool {
        self.resolve(timezone).is_some()
    }

    /// Search timezones by city or zone name, exact city matches first then fuzzy
    pub fn search_timezones(&self, query: &str) -> Vec<TimezoneInfo> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<TimezoneInfo> = Vec::new();

        if let Some(names) = self.city_to_timezone.get(&query_lower) {
            results.extend(names.iter().filter_map(|name| self.timezones.get(name).copied()));
        }

        if !results.is_empty() {
            results.sort_by_key(|info| info.name());
            return results;
        }

        let mut fuzzy_results: Vec<(i64, TimezoneInfo)> = Vec::new();

        for info in self.timezones.values() {
            let name_score = self
                .fuzzy_matcher
                .fuzzy_match(&info.name().to_lowercase(), &query_lower);

            let city_score = info.city.and_then(|city| {
                self.fuzzy_matcher
                    .fuzzy_match(&city.replace('_', " ").to_lowercase(), &query_lower)
            });

            if let Some(score) = name_score.max(city_score) {
                fuzzy_results.push((score, *info));
            }
        }

        // highest score first, name as tie-breaker so results are stable
        fuzzy_results.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.name().cmp(b.1.name())));

        results.extend(
            fuzzy_results
                .into_iter()
                .map(|(_, info)| info)
                .take(MAX_SEARCH_RESULTS),
        );
        results
    }
}

impl Default for TimezoneManager {
    fn default() -> Self {
        Self::new()
    }
}
