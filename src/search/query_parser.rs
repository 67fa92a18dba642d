use clap::ValueEnum;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::mood_table::{mood_terms, MOOD_KEYWORDS};

pub const MIN_TIME_MINUTES: u32 = 5;
pub const MAX_TIME_MINUTES: u32 = 60;
/// Target used when a time query names no recognisable duration.
pub const DEFAULT_TIME_MINUTES: u32 = 60;

lazy_static! {
    static ref EXPLICIT_DURATION: Regex =
        Regex::new(r"(\d+)\s*(min|minute|hour|hr)").expect("duration pattern is valid");
    static ref BARE_MINUTES: Regex = Regex::new(r"^\d{1,3}$").expect("bare minutes pattern is valid");
}

/// Which parsing and resolution path a query takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Ingredients,
    Mood,
    Time,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterMode::Ingredients => "ingredients",
            FilterMode::Mood => "mood",
            FilterMode::Time => "time",
        };
        f.write_str(name)
    }
}

/// Splits on commas, trims, drops empties. Order and duplicates are kept.
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Expands a mood or craving into name-search terms.
///
/// Exact key first, then the first declared key that contains or is contained
/// in the input, and finally the input itself, untouched.
pub fn mood_search_terms(mood: &str) -> Vec<String> {
    let normalized = mood.trim().to_lowercase();

    if let Some(terms) = mood_terms(&normalized) {
        return terms.iter().map(|t| t.to_string()).collect();
    }

    MOOD_KEYWORDS
        .iter()
        .find(|(key, _)| normalized.contains(key) || key.contains(normalized.as_str()))
        .map(|(_, terms)| terms.iter().map(|t| t.to_string()).collect())
        .unwrap_or_else(|| vec![mood.to_string()])
}

/// Reads a duration in minutes out of free text. `None` when nothing is recognised.
pub fn parse_time_input(input: &str) -> Option<u32> {
    let normalized = input.trim().to_lowercase();

    if let Some(caps) = EXPLICIT_DURATION.captures(&normalized) {
        // digits only, so a failed parse can only mean overflow
        let value: u32 = caps[1].parse().unwrap_or(u32::MAX);
        let unit = &caps[2];
        if unit.starts_with("hour") || unit == "hr" {
            return Some(value.saturating_mul(60));
        }
        return Some(value);
    }

    if BARE_MINUTES.is_match(&normalized) {
        return normalized.parse().ok();
    }

    if ["quick", "fast", "speed"].iter().any(|w| normalized.contains(w)) {
        return Some(30);
    }
    if normalized.contains("under 30") || normalized.contains("30 minutes") {
        return Some(30);
    }
    if normalized.contains("under 1 hour") || normalized.contains("1 hour") {
        return Some(60);
    }
    if normalized.contains("under 2 hours") || normalized.contains("2 hours") {
        return Some(120);
    }
    if normalized.len() < 10 && (normalized.contains("quick") || normalized.contains("fast")) {
        return Some(30);
    }

    None
}

/// Clamps a duration into the range the time buckets support.
pub fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_TIME_MINUTES, MAX_TIME_MINUTES)
}

/// Parsed time target for the time-bucket search: defaulted, then clamped.
pub fn time_target(input: &str) -> u32 {
    clamp_minutes(parse_time_input(input).unwrap_or(DEFAULT_TIME_MINUTES))
}
