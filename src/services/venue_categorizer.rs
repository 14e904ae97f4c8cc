use crate::models::recommendation::{Experience, PreferenceSummary, TasteMapping};
use crate::services::keyword_rules::{KeywordRule, RuleTable};

const MAX_EXPERIENCES: usize = 3;
const MAX_ADDITIONAL_SPOTS: usize = 6;

/// Which recommendation tier the venues came from. Tiers bucket venues the
/// same way but describe them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorizationTier {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueBucket {
    Music,
    Cuisine,
    Film,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotTheme {
    Scenic,
    Sports,
    Waterfront,
}

/// The user's raw preference strings, as they appear in cultural paths.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceTerms<'a> {
    pub music: &'a str,
    pub film: &'a str,
    pub cuisine: &'a str,
}

/// Venues split by bucket, in input order. Not yet truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueBuckets {
    pub music: Vec<String>,
    pub film: Vec<String>,
    pub cuisine: Vec<String>,
    pub additional: Vec<String>,
}

/// Strategy for grouping venues and describing how they relate to the user's tastes.
pub trait CategorizationStrategy: Send + Sync {
    fn experience_path(&self, bucket: VenueBucket, terms: &PreferenceTerms, venue: &str)
        -> String;

    fn preference_summary(&self, terms: &PreferenceTerms) -> PreferenceSummary;

    fn bucket(&self, venues: &[String]) -> VenueBuckets {
        let mut buckets = VenueBuckets::default();
        for venue in venues {
            let target = match VENUE_BUCKETS.first_match(venue) {
                Some(VenueBucket::Music) => &mut buckets.music,
                Some(VenueBucket::Cuisine) => &mut buckets.cuisine,
                Some(VenueBucket::Film) => &mut buckets.film,
                None => &mut buckets.additional,
            };
            target.push(venue.clone());
        }
        buckets
    }

    fn spot_path(&self, terms: &PreferenceTerms, venue: &str) -> String {
        match SPOT_THEMES.first_match(venue) {
            Some(SpotTheme::Scenic) => format!("{} → Scenic inspiration → {}", terms.music, venue),
            Some(SpotTheme::Sports) => format!("{} → Sports culture → {}", terms.film, venue),
            Some(SpotTheme::Waterfront) => {
                format!("{} → Waterfront dining → {}", terms.cuisine, venue)
            }
            None => format!("Cultural exploration → {}", venue),
        }
    }

    /// Build the taste mapping: at most three experiences per preference and
    /// six additional spots.
    fn categorize(&self, venues: &[String], terms: &PreferenceTerms) -> TasteMapping {
        let buckets = self.bucket(venues);
        let experiences = |bucket: VenueBucket, list: &[String]| -> Vec<Experience> {
            list.iter()
                .take(MAX_EXPERIENCES)
                .map(|venue| Experience {
                    venue: venue.clone(),
                    cultural_path: self.experience_path(bucket, terms, venue),
                })
                .collect()
        };

        TasteMapping {
            preferences: self.preference_summary(terms),
            music_experiences: experiences(VenueBucket::Music, &buckets.music),
            film_experiences: experiences(VenueBucket::Film, &buckets.film),
            cuisine_experiences: experiences(VenueBucket::Cuisine, &buckets.cuisine),
            additional_spots: buckets
                .additional
                .iter()
                .take(MAX_ADDITIONAL_SPOTS)
                .map(|venue| Experience {
                    venue: venue.clone(),
                    cultural_path: self.spot_path(terms, venue),
                })
                .collect(),
        }
    }
}

/// Checked in order: music, then food, then landmark (film).
static VENUE_BUCKETS: RuleTable<VenueBucket> = RuleTable::new(&[
    KeywordRule {
        keywords: &["music", "concert", "palau", "born", "gracia"],
        value: VenueBucket::Music,
    },
    KeywordRule {
        keywords: &["market", "boqueria", "food", "mercat", "raval"],
        value: VenueBucket::Cuisine,
    },
    KeywordRule {
        keywords: &["gothic", "museum", "park", "casa", "sagrada", "ciutadella", "poble"],
        value: VenueBucket::Film,
    },
]);

static SPOT_THEMES: RuleTable<SpotTheme> = RuleTable::new(&[
    KeywordRule {
        keywords: &["beach", "hill", "mountain"],
        value: SpotTheme::Scenic,
    },
    KeywordRule {
        keywords: &["stadium", "camp"],
        value: SpotTheme::Sports,
    },
    KeywordRule {
        keywords: &["port", "harbor", "vell"],
        value: SpotTheme::Waterfront,
    },
]);

/// Last word of a multi-word venue name, or `default` for single words.
fn venue_tail<'a>(venue: &'a str, default: &'a str) -> &'a str {
    let words: Vec<&str> = venue.split_whitespace().collect();
    if words.len() > 1 {
        words[words.len() - 1]
    } else {
        default
    }
}

fn or_various(value: &str) -> String {
    if value.is_empty() {
        "Various".to_string()
    } else {
        value.to_string()
    }
}

/// Used with venues found through the taste graph.
pub struct PrimaryCategorization;

impl CategorizationStrategy for PrimaryCategorization {
    fn experience_path(
        &self,
        bucket: VenueBucket,
        terms: &PreferenceTerms,
        venue: &str,
    ) -> String {
        match bucket {
            VenueBucket::Music => format!(
                "{} → Mediterranean rhythms → {}",
                terms.music,
                venue_tail(venue, "music hub")
            ),
            VenueBucket::Film => format!(
                "{} → European cinema → {}",
                terms.film,
                venue_tail(venue, "cultural storytelling")
            ),
            VenueBucket::Cuisine => format!(
                "{} → Mediterranean diet → {}",
                terms.cuisine,
                venue_tail(venue, "local flavors")
            ),
        }
    }

    fn preference_summary(&self, terms: &PreferenceTerms) -> PreferenceSummary {
        PreferenceSummary {
            music: or_various(terms.music),
            film: or_various(terms.film),
            cuisine: or_various(terms.cuisine),
        }
    }
}

/// Used with the static per-city venue lists of the keyword fallback.
pub struct FallbackCategorization;

impl CategorizationStrategy for FallbackCategorization {
    fn experience_path(
        &self,
        bucket: VenueBucket,
        terms: &PreferenceTerms,
        venue: &str,
    ) -> String {
        match bucket {
            VenueBucket::Music => format!("{} → Global music culture → {}", terms.music, venue),
            VenueBucket::Film => format!("{} → Cinema culture → {}", terms.film, venue),
            VenueBucket::Cuisine => format!("{} → Culinary culture → {}", terms.cuisine, venue),
        }
    }

    fn preference_summary(&self, terms: &PreferenceTerms) -> PreferenceSummary {
        PreferenceSummary {
            music: terms.music.to_string(),
            film: terms.film.to_string(),
            cuisine: terms.cuisine.to_string(),
        }
    }
}

pub fn strategy_for(tier: CategorizationTier) -> &'static dyn CategorizationStrategy {
    match tier {
        CategorizationTier::Primary => &PrimaryCategorization,
        CategorizationTier::Fallback => &FallbackCategorization,
    }
}
