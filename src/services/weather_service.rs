use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::models::weather::DailyForecast;

/// Forecast days requested from the API for a trip.
const FORECAST_DAYS: usize = 7;
/// Trips starting further out than this get no weather.
const MAX_DAYS_AHEAD: i64 = 7;
/// Entries shown, one per day from the start date.
pub const WINDOW_DAYS: usize = 6;
const MIDDAY_HOUR: i64 = 12;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

/// OpenWeatherMap 5-day forecast client.
#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openweather_api_key.clone(),
            base_url: config.openweather_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// One midday forecast per date for up to `days` dates. Empty on any failure.
    pub async fn forecast(&self, city: &str, days: usize) -> Vec<DailyForecast> {
        match self.fetch(city).await {
            Ok(response) => daily_forecasts(response.list, days),
            Err(e) => {
                warn!("Weather API error for {}: {}", city, e);
                Vec::new()
            }
        }
    }

    /// Forecasts for the first days of a trip, or nothing when the trip
    /// starts too far from `today` or has no start date.
    pub async fn trip_weather(
        &self,
        city: &str,
        start_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Vec<DailyForecast> {
        let Some(start) = start_date else {
            return Vec::new();
        };
        if !within_forecast_range(start, today) {
            debug!("Trip to {} starts {} beyond forecast range", city, start);
            return Vec::new();
        }

        let forecast = self.forecast(city, FORECAST_DAYS).await;
        trip_window(start, &forecast)
    }

    async fn fetch(&self, city: &str) -> Result<ForecastResponse, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::MissingApiKey("OpenWeatherMap"))?;

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[("q", city), ("units", "metric"), ("appid", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::from_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

pub fn within_forecast_range(start: NaiveDate, today: NaiveDate) -> bool {
    (start - today).num_days() <= MAX_DAYS_AHEAD
}

/// Exactly `WINDOW_DAYS` entries from `start`, with `N/A` for dates the
/// forecast does not cover.
pub fn trip_window(start: NaiveDate, forecast: &[DailyForecast]) -> Vec<DailyForecast> {
    (0..WINDOW_DAYS as i64)
        .map(|offset| start + Duration::days(offset))
        .map(|date| {
            forecast
                .iter()
                .find(|day| day.date == date)
                .cloned()
                .unwrap_or_else(|| DailyForecast::unavailable(date))
        })
        .collect()
}

/// Group entries by date in the order they appear and keep, for each of the
/// first `days` dates, the entry nearest midday.
fn daily_forecasts(entries: Vec<ForecastEntry>, days: usize) -> Vec<DailyForecast> {
    let mut by_date: IndexMap<NaiveDate, Vec<(NaiveDateTime, ForecastEntry)>> = IndexMap::new();
    for entry in entries {
        match NaiveDateTime::parse_from_str(&entry.dt_txt, "%Y-%m-%d %H:%M:%S") {
            Ok(timestamp) => by_date
                .entry(timestamp.date())
                .or_default()
                .push((timestamp, entry)),
            Err(e) => debug!("Skipping forecast entry '{}': {}", entry.dt_txt, e),
        }
    }

    by_date
        .into_iter()
        .take(days)
        .filter_map(|(date, entries)| {
            let (_, midday) = entries
                .into_iter()
                .min_by_key(|(timestamp, _)| (timestamp.hour() as i64 - MIDDAY_HOUR).abs())?;
            Some(DailyForecast {
                date,
                desc: midday
                    .weather
                    .first()
                    .map(|w| w.main.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                temp: Some(midday.main.temp.round() as i32),
            })
        })
        .collect()
}
