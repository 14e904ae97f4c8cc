use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecast per trip day, taken from the entry closest to midday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub desc: String,
    /// Rounded °C; `None` when the forecast does not reach this date.
    pub temp: Option<i32>,
}

impl DailyForecast {
    pub fn unavailable(date: NaiveDate) -> Self {
        Self {
            date,
            desc: "N/A".to_string(),
            temp: None,
        }
    }

    pub fn temp_label(&self) -> String {
        match self.temp {
            Some(temp) => temp.to_string(),
            None => "N/A".to_string(),
        }
    }
}
