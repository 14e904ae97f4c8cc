//! Itinerary, budget, packing and tips generation.
//!
//! The completion model is asked for one JSON document holding every section.
//! Its reply is rescued with `json_repair`, trimmed to size, normalized and
//! then typed section by section; a section whose JSON has the wrong shape
//! degrades to raw text without affecting the others.

use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{debug, info, warn};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::{Arc, LazyLock};

use crate::models::itinerary::{ItinerarySections, Section};
use crate::models::recommendation::Recommendation;
use crate::models::weather::DailyForecast;
use crate::services::completion::{CompletionRequest, TextCompletion};
use crate::services::json_repair::repair_json;
use crate::services::keyword_rules::{KeywordRule, RuleTable};

const BASE_TOKENS: u32 = 1200;
const TOKENS_PER_VENUE: u32 = 20;
const TOKENS_PER_DAY: u32 = 60;
const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.6;

const PROMPT_VENUE_LIMIT: usize = 15;
const WEEKLY_SKELETON_THRESHOLD: u32 = 14;

const PACKING_ITEMS_PER_CATEGORY: usize = 8;
const PACKING_ITEM_MAX_CHARS: usize = 30;
const BUDGET_CATEGORIES: [&str; 3] = ["accommodation", "food", "activities"];
const BUDGET_MAX_LINES: usize = 12;
const CLOSING_MAX_CHARS: usize = 500;
const DAY_PERIODS: [&str; 3] = ["morning", "afternoon", "evening"];
const EMPTY_DAY: &str = "No activities planned";
/// Sections are sometimes JSON encoded a second time inside a string.
const MAX_NESTED_DECODES: usize = 3;

static BUDGET_LINE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n;]").expect("valid budget split pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Misspellings the model produces often enough to fix by hand.
const TEXT_FIXES: &[(&str, &str)] = &[
    ("rncoat", "raincoat"),
    ("ecnomy", "economy"),
    ("ecnomic", "economic"),
    ("trvl", "travel"),
    ("trvel", "travel"),
    ("accomodation", "accommodation"),
    ("restarant", "restaurant"),
    ("resturant", "restaurant"),
    ("transprt", "transport"),
];
const PACKING_FIXES: &[(&str, &str)] = &[
    ("rncoat", "raincoat"),
    ("rn jacket", "rain jacket"),
    ("chrgr", "charger"),
];

static PACKING_CATEGORIES: RuleTable<&str> = RuleTable::new(&[
    KeywordRule {
        keywords: &[
            "shirt", "pants", "dress", "jacket", "coat", "shoes", "socks", "underwear", "hat",
            "scarf",
        ],
        value: "Clothing",
    },
    KeywordRule {
        keywords: &["phone", "charger", "camera", "laptop", "tablet", "headphones", "adapter"],
        value: "Electronics",
    },
    KeywordRule {
        keywords: &["passport", "visa", "ticket", "id", "license", "insurance"],
        value: "Documents",
    },
    KeywordRule {
        keywords: &["toothbrush", "shampoo", "soap", "medicine", "sunscreen", "lotion"],
        value: "Personal Care",
    },
]);
const PACKING_BUCKET_ORDER: [&str; 5] =
    ["Clothing", "Electronics", "Documents", "Personal Care", "Other"];

/// What the generator needs to know about the trip.
#[derive(Debug, Clone, Copy)]
pub struct ContentInput<'a> {
    pub recommendation: &'a Recommendation,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub weather: &'a [DailyForecast],
}

pub struct ItineraryContentGenerator {
    completion: Arc<dyn TextCompletion>,
}

impl ItineraryContentGenerator {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self { completion }
    }

    /// Never fails. A failed call yields `Error: ...` in every section and an
    /// unrepairable reply yields the reply text in every section.
    pub async fn generate(&self, input: &ContentInput<'_>) -> ItinerarySections {
        let rec = input.recommendation;
        let request = CompletionRequest {
            prompt: build_prompt(input),
            max_tokens: token_budget(rec.venues.len(), rec.days),
            temperature: TEMPERATURE,
        };
        debug!(
            "Generating {}-day itinerary for {} with {} max tokens",
            rec.days, rec.city, request.max_tokens
        );

        let content = match self.completion.complete(request).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Itinerary generation failed: {}", e);
                return ItinerarySections::degraded(format!("Error: {}", e));
            }
        };

        match repair_json(&content) {
            Ok(Value::Object(sections)) => parse_sections(sections),
            Ok(other) => {
                warn!("Itinerary reply was JSON but not an object: {}", other);
                ItinerarySections::degraded(content.trim())
            }
            Err(e) => {
                warn!("JSON parsing error: {}", e);
                info!("Returning raw itinerary text in every section");
                ItinerarySections::degraded(content.trim())
            }
        }
    }
}

pub fn token_budget(venue_count: usize, days: u32) -> u32 {
    let venue_tokens = (venue_count as u32).saturating_mul(TOKENS_PER_VENUE);
    let day_tokens = days.saturating_mul(TOKENS_PER_DAY);
    BASE_TOKENS
        .saturating_add(venue_tokens)
        .saturating_add(day_tokens)
        .min(MAX_TOKENS)
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

fn weather_summary(weather: &[DailyForecast]) -> String {
    if weather.is_empty() {
        return String::new();
    }
    let descs: Vec<&str> = weather.iter().map(|day| day.desc.as_str()).collect();
    let temps: Vec<String> = weather.iter().map(DailyForecast::temp_label).collect();
    format!(
        "Weather forecast: {}. Temperatures: {}°C.",
        descs.join(", "),
        temps.join(", ")
    )
}

fn venue_guidance(venues: &[String]) -> String {
    if venues.is_empty() {
        return String::new();
    }
    let listed: Vec<&str> = venues
        .iter()
        .take(PROMPT_VENUE_LIMIT)
        .map(String::as_str)
        .collect();
    format!(
        "\nIMPORTANT: Include these specific venues in your itinerary: {}. Each venue should connect to the user's cultural preferences.",
        listed.join(", ")
    )
}

fn taste_guidance(recommendation: &Recommendation) -> String {
    let Some(mapping) = &recommendation.taste_mapping else {
        return String::new();
    };

    let groups = [
        ("Music", &mapping.music_experiences),
        ("Film", &mapping.film_experiences),
        ("Cuisine", &mapping.cuisine_experiences),
    ];
    let details: Vec<String> = groups
        .iter()
        .flat_map(|(label, experiences)| {
            experiences
                .iter()
                .map(move |exp| format!("{} preference connects to {}", label, exp.venue))
        })
        .collect();

    if details.is_empty() {
        return String::new();
    }
    format!(
        "\nTASTE CONNECTIONS: {}. Ensure each day's activities reflect these personal taste connections.",
        details.join("; ")
    )
}

/// `"Day N": {...}` entries for every activity day. Long trips are built a
/// week at a time with generic placeholders.
pub fn day_skeleton(days: u32, city: &str) -> String {
    let day_numbers: Vec<u32> = (1..=days).collect();

    if days > WEEKLY_SKELETON_THRESHOLD {
        day_numbers
            .chunks(7)
            .flat_map(|week| week.iter())
            .map(|day| {
                format!(
                    r#""Day {day}": {{"morning": "morning activity", "afternoon": "afternoon activity", "evening": "evening activity"}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        day_numbers
            .iter()
            .map(|day| {
                format!(
                    r#""Day {day}": {{"morning": "morning activity in {city}", "afternoon": "afternoon activity in {city}", "evening": "evening activity in {city}"}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn build_prompt(input: &ContentInput<'_>) -> String {
    let rec = input.recommendation;
    let city = &rec.city;
    let country = rec.country.as_deref().unwrap_or("");
    let days = rec.days;
    let vibe = &rec.vibe;
    let date_str = match (input.start_date, input.end_date) {
        (Some(start), Some(end)) => format!("from {} to {}", start, end),
        _ => "(no dates provided)".to_string(),
    };
    let weather = weather_summary(input.weather);
    let venues = venue_guidance(&rec.venues);
    let tastes = taste_guidance(rec);
    let skeleton = day_skeleton(days, city);

    format!(
        r#"
    Create a {days}-day travel plan for {city}, {country} {date_str} with {vibe} theme.
    {weather}{venues}{tastes}

    CRITICAL: Generate exactly {days} days. Count carefully: Day 1, Day 2, ... Day {days}.
    CRITICAL: Each activity must clearly connect to the user's stated preferences. Explain WHY each venue/activity was chosen based on their tastes.

    For the BUDGET section:
    - Provide detailed, line-separated budget estimates for each of the following categories: accommodation, food, and activities.
    - For each category, provide as many relevant lines as possible (up to 12 lines per category) as a list of strings, each with a clear cost value and a short description, e.g.:
        ["Hotel XYZ: $120/night", "Boutique guesthouse: $85/night", ...]
    - Use numbers and currency consistently. If possible, break down costs by type, location, or time period.
    - Do NOT summarize as a single line; use a list of detailed lines for each budget category.

    Return ONLY valid JSON:
    {{
        "packing": {{"Clothing": ["item1", "item2"], "Electronics": ["smartphone", "charger"], "Documents": ["passport"], "Toiletries": ["item1"], "Other": ["item1"]}},
        "tips": ["tip1 for {city}", "tip2 for {city}", "tip3 for {city}"],
        "budget": {{"accommodation": ["Hotel XYZ: $120/night", "Boutique guesthouse: $85/night", ...], "food": ["Lunch at Cafe: $15", ...], "activities": ["Museum entry: $20", ...]}},
        "transport": ["transport1 in {city}", "transport2 in {city}"],
        "safety": ["safety1", "safety2", "safety3"],
        "closing": "personalized message",
        "itinerary": {{
            {skeleton}
        }}
    }}
    "#
    )
}

// ---------------------------------------------------------------------------
// Post-processing
// ---------------------------------------------------------------------------

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// At most eight items per category, each cut to thirty characters.
pub fn truncate_packing(packing: &mut Value) {
    let Value::Object(categories) = packing else {
        return;
    };
    for items in categories.values_mut() {
        if let Value::Array(list) = items {
            let trimmed: Vec<Value> = list
                .iter()
                .take(PACKING_ITEMS_PER_CATEGORY)
                .map(|item| Value::String(truncate_chars(&value_text(item), PACKING_ITEM_MAX_CHARS)))
                .collect();
            *list = trimmed;
        }
    }
}

/// Budget lines for one category: a string is split on newlines and
/// semicolons, a list is taken item by item, anything else is empty.
pub fn budget_lines(value: Option<&Value>) -> Vec<String> {
    let lines: Vec<String> = match value {
        Some(Value::String(text)) => BUDGET_LINE_SPLIT
            .split(text)
            .map(|line| line.trim().to_string())
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| value_text(item).trim().to_string())
            .collect(),
        _ => Vec::new(),
    };

    lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .take(BUDGET_MAX_LINES)
        .collect()
}

pub fn normalize_budget(budget: &mut Value) {
    let Value::Object(categories) = budget else {
        return;
    };
    for category in BUDGET_CATEGORIES {
        let lines = budget_lines(categories.get(category));
        categories.insert(
            category.to_string(),
            Value::Array(lines.into_iter().map(Value::String).collect()),
        );
    }
}

/// Apply the typo table and collapse whitespace.
pub fn clean_text(text: &str) -> String {
    let fixed = TEXT_FIXES
        .iter()
        .fold(text.to_string(), |acc, (wrong, right)| acc.replace(wrong, right));
    WHITESPACE.replace_all(&fixed, " ").trim().to_string()
}

/// Keep only non-empty periods of each day; days with none left, or days
/// that are not objects, collapse to a single `all_day` entry.
pub fn normalize_itinerary(itinerary: Value) -> Value {
    let days: Map<String, Value> = match itinerary {
        Value::Array(list) => list
            .into_iter()
            .enumerate()
            .map(|(i, day)| (format!("Day {}", i + 1), day))
            .collect(),
        Value::Object(mut map) if map.len() == 1 && map.contains_key("itinerary") => {
            match map.remove("itinerary") {
                Some(Value::Object(inner)) => inner,
                _ => Map::new(),
            }
        }
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let cleaned: Map<String, Value> = days
        .into_iter()
        .map(|(day, schedule)| {
            let plan = match schedule {
                Value::Object(periods) => {
                    let mut kept = Map::new();
                    for period in DAY_PERIODS {
                        if let Some(activity) = periods.get(period).filter(|v| is_truthy(v)) {
                            kept.insert(period.to_string(), Value::String(clean_text(&value_text(activity))));
                        }
                    }
                    if kept.is_empty() {
                        all_day(EMPTY_DAY)
                    } else {
                        Value::Object(kept)
                    }
                }
                other if is_truthy(&other) => all_day(&clean_text(&value_text(&other))),
                _ => all_day(EMPTY_DAY),
            };
            (day, plan)
        })
        .collect();

    Value::Object(cleaned)
}

fn all_day(text: &str) -> Value {
    let mut map = Map::new();
    map.insert("all_day".to_string(), Value::String(text.to_string()));
    Value::Object(map)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
    }
}

/// Sort a flat packing list into fixed buckets, dropping empty ones.
pub fn categorize_flat_packing(items: &[Value]) -> IndexMap<String, Vec<String>> {
    let mut buckets: IndexMap<String, Vec<String>> = PACKING_BUCKET_ORDER
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    for item in items {
        let item = PACKING_FIXES
            .iter()
            .fold(value_text(item), |acc, (wrong, right)| acc.replace(wrong, right));
        let bucket = PACKING_CATEGORIES.first_match(&item).copied().unwrap_or("Other");
        if let Some(list) = buckets.get_mut(bucket) {
            list.push(item);
        }
    }

    buckets.retain(|_, list| !list.is_empty());
    buckets
}

/// Decode sections that arrived as JSON inside a string.
fn decode_nested(mut value: Value) -> Value {
    for _ in 0..MAX_NESTED_DECODES {
        let Value::String(text) = &value else {
            break;
        };
        match serde_json::from_str::<Value>(text) {
            Ok(decoded) => value = decoded,
            Err(_) => break,
        }
    }
    value
}

fn parse_sections(mut data: Map<String, Value>) -> ItinerarySections {
    let mut take = |name: &str| data.remove(name).map(decode_nested);

    let packing = take("packing").map(|mut packing| {
        truncate_packing(&mut packing);
        match packing {
            Value::Array(items) => serde_json::to_value(categorize_flat_packing(&items))
                .unwrap_or(Value::Array(Vec::new())),
            other => other,
        }
    });
    let budget = take("budget").map(|mut budget| {
        normalize_budget(&mut budget);
        budget
    });
    let closing = take("closing").map(|closing| match closing {
        Value::String(text) => Value::String(text.chars().take(CLOSING_MAX_CHARS).collect()),
        other => other,
    });
    let itinerary = Some(normalize_itinerary(take("itinerary").unwrap_or(Value::Null)));

    ItinerarySections {
        packing: Section::from_value(packing),
        tips: Section::from_value(take("tips")),
        budget: Section::from_value(budget),
        transport: Section::from_value(take("transport")),
        safety: Section::from_value(take("safety")),
        closing: Section::from_value(closing),
        itinerary: Section::from_value(itinerary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::models::itinerary::Budget;
    use crate::models::recommendation::{Experience, TasteMapping};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingCompletion {
        reply: Result<String, u16>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingCompletion {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextCompletion for RecordingCompletion {
        async fn complete(&self, request: CompletionRequest) -> Result<String, ServiceError> {
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(ServiceError::Status {
                    status: *status,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    fn recommendation(days: u32, venues: usize) -> Recommendation {
        Recommendation {
            city: "Rome".to_string(),
            country: Some("Italy".to_string()),
            reason: String::new(),
            vibe: "cultural".to_string(),
            days,
            venues: (0..venues).map(|i| format!("Venue {}", i)).collect(),
            taste_mapping: None,
            qloo_powered: true,
            confidence: 5,
            is_fallback: false,
            fallback_message: None,
        }
    }

    async fn generate_with(reply: &str) -> ItinerarySections {
        let rec = recommendation(2, 3);
        let input = ContentInput {
            recommendation: &rec,
            start_date: None,
            end_date: None,
            weather: &[],
        };
        ItineraryContentGenerator::new(RecordingCompletion::replying(reply))
            .generate(&input)
            .await
    }

    #[test]
    fn test_token_budget() {
        assert_eq!(token_budget(3, 2), 1200 + 60 + 120);
        assert_eq!(token_budget(0, 1), 1260);
        assert_eq!(token_budget(15, 60), 4000);
    }

    #[test]
    fn test_day_skeleton_sized_to_days() {
        let short = day_skeleton(3, "Rome");
        assert!(short.contains(r#""Day 3": {"morning": "morning activity in Rome""#));
        assert!(!short.contains("Day 4"));

        let long = day_skeleton(16, "Rome");
        assert_eq!(long.matches("\"Day ").count(), 16);
        assert!(long.contains(r#""Day 16": {"morning": "morning activity","#));
        assert!(!long.contains("in Rome"));
    }

    #[test]
    fn test_prompt_lists_first_fifteen_venues_and_taste_links() {
        let mut rec = recommendation(2, 20);
        rec.taste_mapping = Some(TasteMapping {
            music_experiences: vec![Experience {
                venue: "Venue 1".to_string(),
                cultural_path: String::new(),
            }],
            ..TasteMapping::default()
        });
        let weather = [DailyForecast {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            desc: "Clear".to_string(),
            temp: Some(24),
        }];
        let input = ContentInput {
            recommendation: &rec,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 4),
            weather: &weather,
        };
        let prompt = build_prompt(&input);

        assert!(prompt.contains("Create a 2-day travel plan for Rome, Italy from 2025-06-01 to 2025-06-04"));
        assert!(prompt.contains("Weather forecast: Clear. Temperatures: 24°C."));
        assert!(prompt.contains("Venue 14."));
        assert!(!prompt.contains("Venue 15"));
        assert!(prompt.contains("TASTE CONNECTIONS: Music preference connects to Venue 1."));
    }

    #[actix_web::test]
    async fn test_http_failure_sets_every_section_to_error() {
        let rec = recommendation(3, 0);
        let input = ContentInput {
            recommendation: &rec,
            start_date: None,
            end_date: None,
            weather: &[],
        };
        let sections = ItineraryContentGenerator::new(RecordingCompletion::failing(500))
            .generate(&input)
            .await;

        let expected = "Error: Request failed with status 500: boom";
        assert_eq!(sections.raw_sections(), [Some(expected); 7]);
    }

    #[actix_web::test]
    async fn test_request_uses_budget_and_temperature() {
        let completion = RecordingCompletion::replying("{}");
        let rec = recommendation(4, 5);
        let input = ContentInput {
            recommendation: &rec,
            start_date: None,
            end_date: None,
            weather: &[],
        };
        ItineraryContentGenerator::new(completion.clone())
            .generate(&input)
            .await;

        let requests = completion.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 1200 + 100 + 240);
        assert_eq!(requests[0].temperature, 0.6);
    }

    #[actix_web::test]
    async fn test_unrepairable_reply_is_passed_through() {
        let sections = generate_with("  Sorry, I cannot help with that.  ").await;
        assert_eq!(
            sections.raw_sections(),
            [Some("Sorry, I cannot help with that."); 7]
        );
    }

    #[actix_web::test]
    async fn test_fenced_reply_with_truncated_object() {
        let reply = "```json\n{\"tips\": [\"Carry cash\"], \"closing\": \"Ciao!\", \"itinerary\": {\"Day 1\": {\"morning\": \"Colosseum\"}\n```";
        let sections = generate_with(reply).await;

        assert_eq!(sections.tips, Section::Parsed(vec!["Carry cash".to_string()]));
        assert_eq!(sections.closing, Section::Parsed("Ciao!".to_string()));
        let itinerary = sections.itinerary.parsed().unwrap();
        assert_eq!(itinerary["Day 1"].morning.as_deref(), Some("Colosseum"));
    }

    #[test]
    fn test_packing_truncation() {
        let long_item = "x".repeat(50);
        let mut packing = json!({ "Clothing": vec![long_item; 10] });
        truncate_packing(&mut packing);

        let items = packing["Clothing"].as_array().unwrap();
        assert_eq!(items.len(), 8);
        for item in items {
            let text = item.as_str().unwrap();
            assert!(text.chars().count() <= 33);
            assert!(text.ends_with("..."));
        }
    }

    #[test]
    fn test_packing_keeps_short_items() {
        let mut packing = json!({"Documents": ["passport", 42]});
        truncate_packing(&mut packing);
        assert_eq!(packing, json!({"Documents": ["passport", "42"]}));
    }

    #[test]
    fn test_budget_string_is_split() {
        let mut budget = json!({"food": "Lunch: $10; Dinner: $20"});
        normalize_budget(&mut budget);
        assert_eq!(budget["food"], json!(["Lunch: $10", "Dinner: $20"]));
        assert_eq!(budget["accommodation"], json!([]));
    }

    #[test]
    fn test_budget_list_is_trimmed_and_capped() {
        let many: Vec<Value> = (0..15).map(|i| json!(format!(" Line {} ", i))).collect();
        let mut with_blanks = vec![json!(""), json!("   ")];
        with_blanks.extend(many);
        let lines = budget_lines(Some(&Value::Array(with_blanks)));

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Line 0");
        assert!(budget_lines(Some(&json!(120))).is_empty());
    }

    #[actix_web::test]
    async fn test_budget_section_is_typed() {
        let reply = r#"{"budget": {"accommodation": "Hotel: $100\nHostel: $30", "food": ["Pizza: $12"], "activities": 5}}"#;
        let sections = generate_with(reply).await;
        assert_eq!(
            sections.budget,
            Section::Parsed(Budget {
                accommodation: vec!["Hotel: $100".to_string(), "Hostel: $30".to_string()],
                food: vec!["Pizza: $12".to_string()],
                activities: Vec::new(),
            })
        );
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(
            clean_text("Take the  trvl card\n to the restarant"),
            "Take the travel card to the restaurant"
        );
    }

    #[test]
    fn test_itinerary_list_is_rekeyed() {
        let value = normalize_itinerary(json!([
            {"morning": "Vatican", "afternoon": "", "evening": null},
            "Free   day",
            {}
        ]));
        assert_eq!(
            value,
            json!({
                "Day 1": {"morning": "Vatican"},
                "Day 2": {"all_day": "Free day"},
                "Day 3": {"all_day": "No activities planned"}
            })
        );
    }

    #[test]
    fn test_itinerary_wrapper_is_unwrapped() {
        let value = normalize_itinerary(json!({"itinerary": {"Day 1": {"evening": "Opera"}}}));
        assert_eq!(value, json!({"Day 1": {"evening": "Opera"}}));
        assert_eq!(normalize_itinerary(json!("nothing")), json!({}));
    }

    #[test]
    fn test_flat_packing_is_bucketed() {
        let items = vec![
            json!("Rncoat"),
            json!("rncoat"),
            json!("Phone chrgr"),
            json!("Passport"),
            json!("Sunscreen"),
            json!("Snacks"),
        ];
        let buckets = categorize_flat_packing(&items);

        assert_eq!(
            buckets.keys().collect::<Vec<_>>(),
            vec!["Clothing", "Electronics", "Documents", "Personal Care", "Other"]
        );
        // Fixes are case-sensitive, but bucketing is not
        assert_eq!(buckets["Clothing"], vec!["Rncoat", "raincoat"]);
        assert_eq!(buckets["Electronics"], vec!["Phone charger"]);
        assert_eq!(buckets["Other"], vec!["Snacks"]);
    }

    #[actix_web::test]
    async fn test_flat_packing_reply_and_double_encoded_tips() {
        let reply = r#"{"packing": ["Passport", "Hat"], "tips": "[\"Tip one\"]", "safety": {"level": "low"}}"#;
        let sections = generate_with(reply).await;

        let packing = sections.packing.parsed().unwrap();
        assert_eq!(packing["Documents"], vec!["Passport"]);
        assert_eq!(packing["Clothing"], vec!["Hat"]);
        assert_eq!(sections.tips, Section::Parsed(vec!["Tip one".to_string()]));
        assert_eq!(sections.safety.raw(), Some(r#"{"level":"low"}"#));
    }

    #[actix_web::test]
    async fn test_missing_sections_are_empty() {
        let sections = generate_with("{}").await;
        assert_eq!(sections.raw_sections(), [None; 7]);
        assert_eq!(sections.itinerary.parsed().map(|i| i.len()), Some(0));
    }
}
