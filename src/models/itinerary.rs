use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Section names, in the order they are emitted.
pub const SECTION_NAMES: [&str; 7] = [
    "packing",
    "tips",
    "budget",
    "transport",
    "safety",
    "closing",
    "itinerary",
];

/// A generated section: either content that matched its expected shape, or
/// the text we got instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section<T> {
    Parsed(T),
    Raw(String),
}

impl<T: DeserializeOwned + Default> Section<T> {
    /// Type a JSON value, degrading to its text when it does not fit.
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Section::Parsed(T::default()),
            Some(value) => match serde_json::from_value::<T>(value.clone()) {
                Ok(parsed) => Section::Parsed(parsed),
                Err(_) => match value {
                    Value::String(text) => Section::Raw(text),
                    other => Section::Raw(other.to_string()),
                },
            },
        }
    }
}

impl<T> Section<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Section::Parsed(value) => Some(value),
            Section::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            Section::Parsed(_) => None,
            Section::Raw(text) => Some(text),
        }
    }
}

pub type PackingList = IndexMap<String, Vec<String>>;
pub type DailySchedule = IndexMap<String, DayPlan>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub accommodation: Vec<String>,
    #[serde(default)]
    pub food: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<String>,
}

impl DayPlan {
    pub fn all_day(text: impl Into<String>) -> Self {
        Self {
            all_day: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Everything the content generator produces for one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItinerarySections {
    pub packing: Section<PackingList>,
    pub tips: Section<Vec<String>>,
    pub budget: Section<Budget>,
    pub transport: Section<Vec<String>>,
    pub safety: Section<Vec<String>>,
    pub closing: Section<String>,
    pub itinerary: Section<DailySchedule>,
}

impl ItinerarySections {
    /// Every section carries the same text; used when generation or parsing failed.
    pub fn degraded(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            packing: Section::Raw(text.clone()),
            tips: Section::Raw(text.clone()),
            budget: Section::Raw(text.clone()),
            transport: Section::Raw(text.clone()),
            safety: Section::Raw(text.clone()),
            closing: Section::Raw(text.clone()),
            itinerary: Section::Raw(text),
        }
    }

    /// Raw text of each section in `SECTION_NAMES` order; `None` for parsed ones.
    pub fn raw_sections(&self) -> [Option<&str>; 7] {
        [
            self.packing.raw(),
            self.tips.raw(),
            self.budget.raw(),
            self.transport.raw(),
            self.safety.raw(),
            self.closing.raw(),
            self.itinerary.raw(),
        ]
    }
}
