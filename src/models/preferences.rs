use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIBE: &str = "cultural";
pub const DEFAULT_ACTIVITY_DAYS: u32 = 3;
/// Longest trip that gets planned; longer date ranges are cut to this.
pub const MAX_ACTIVITY_DAYS: u32 = 30;
/// Arrival and departure days are not planned as activity days.
const TRAVEL_DAYS: i64 = 2;

/// Incoming trip request, as submitted by the client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TripRequest {
    #[serde(default)]
    pub trip_description: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub departure_city: String,
}

/// Preferences pulled out of free text. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractedPreferences {
    #[serde(default)]
    pub music: String,
    #[serde(default)]
    pub movie: String,
    #[serde(default)]
    pub food: String,
    #[serde(default)]
    pub vibe: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPreferences {
    pub music: String,
    pub movie: String,
    pub food: String,
    pub vibe: String,
    pub days: u32,
    pub departure_city: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UserPreferences {
    pub fn from_request(extracted: ExtractedPreferences, request: &TripRequest) -> Self {
        let start_date = parse_date(&request.start_date);
        let end_date = parse_date(&request.end_date);

        Self {
            music: extracted.music,
            movie: extracted.movie,
            food: extracted.food,
            vibe: extracted.vibe,
            days: activity_days(start_date, end_date),
            departure_city: request.departure_city.clone(),
            start_date,
            end_date,
        }
    }

    /// The vibe to plan around; an unspecified vibe means a cultural trip.
    pub fn effective_vibe(&self) -> &str {
        let vibe = self.vibe.trim();
        if vibe.is_empty() {
            DEFAULT_VIBE
        } else {
            vibe
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Trip length in days (inclusive) minus the two travel days, kept within
/// `1..=MAX_ACTIVITY_DAYS`.
pub fn activity_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
    match (start, end) {
        (Some(start), Some(end)) => {
            let total_days = (end - start).num_days() + 1;
            (total_days - TRAVEL_DAYS).clamp(1, MAX_ACTIVITY_DAYS as i64) as u32
        }
        _ => DEFAULT_ACTIVITY_DAYS,
    }
}
