use log::{info, warn};
use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::trip::FlightEstimate;
use crate::services::completion::{CompletionRequest, TextCompletion};

pub const BOOKING_SITES: [&str; 3] = ["Skyscanner", "Kayak", "Expedia"];
pub const UNAVAILABLE_PRICE: &str = "Contact travel agent for pricing";

const ESTIMATE_MAX_TOKENS: u32 = 20;
const ESTIMATE_TEMPERATURE: f32 = 0.3;

/// Round-trip economy fare estimates from the completion model.
pub struct FlightEstimator {
    completion: Arc<dyn TextCompletion>,
}

impl FlightEstimator {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self { completion }
    }

    pub async fn estimate(&self, origin: &str, destination: &str, month: &str) -> FlightEstimate {
        let price = match self.estimate_price(origin, destination, month).await {
            Ok(price) if price > 0.0 => {
                info!(
                    "Estimated round-trip flight from {} to {} in {}: ${} USD",
                    origin, destination, month, price as i64
                );
                format!("${} USD", price as i64)
            }
            Ok(_) => UNAVAILABLE_PRICE.to_string(),
            Err(e) => {
                warn!("Flight estimate unavailable: {}", e);
                UNAVAILABLE_PRICE.to_string()
            }
        };

        FlightEstimate {
            price,
            sites: BOOKING_SITES.iter().map(|s| s.to_string()).collect(),
        }
    }

    async fn estimate_price(
        &self,
        origin: &str,
        destination: &str,
        month: &str,
    ) -> Result<f64, ServiceError> {
        let prompt = format!(
            "Estimate the average round-trip economy flight price in USD from {} to {} for travel in {}. Respond with just a number (no currency sign, no explanation).",
            origin, destination, month
        );
        let reply = self
            .completion
            .complete(CompletionRequest {
                prompt,
                max_tokens: ESTIMATE_MAX_TOKENS,
                temperature: ESTIMATE_TEMPERATURE,
            })
            .await?;
        parse_price(&reply)
    }
}

/// Keep only digits and dots, then parse.
pub fn parse_price(reply: &str) -> Result<f64, ServiceError> {
    let digits: String = reply
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits
        .parse()
        .map_err(|_| ServiceError::Parse(format!("No price in reply '{}'", reply)))
}
