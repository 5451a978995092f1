//! Post-hoc keyword filtering for review topics.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::types::Topic;

/// Topics with fewer keywords than this after filtering are dropped.
pub const MIN_TOPIC_KEYWORDS: usize = 2;

/// Review boilerplate, filler and brand names that say nothing about a
/// specific product aspect.
pub const EXCLUDED_TERMS: &[&str] = &[
    // Review boilerplate
    "amazon", "amazing", "arrived", "awesome", "back", "bad", "best", "block",
    "bought", "buy", "came", "come", "contacted", "customer", "day",
    "delivered", "device", "even", "ever", "excellent", "fantastic", "five",
    "four", "get", "good", "got", "great", "hat", "hour", "issue", "item",
    "just", "later", "like", "minute", "month", "more", "much", "new", "nice",
    "object", "only", "order", "ordered", "perfect", "phone", "problem",
    "product", "purchase", "purchased", "rating", "really", "refund",
    "return", "review", "sent", "series", "seller", "service", "shipping",
    "star", "still", "stop", "stopped", "stuff", "support", "thank", "thing",
    "things", "time", "unit", "use", "used", "using", "very", "week", "well",
    "within", "with", "without", "work", "working", "worst", "year", "mother",
    "give", "would", "daughter", "love", "christmas", "thanks",
    // Informal and contracted forms
    "dont", "never", "ive", "say", "said", "one", "also", "lot", "lots",
    "make", "makes", "made", "go", "going", "went", "right", "first",
    "second", "last", "days", "better", "old", "try", "trying", "tried",
    "yes", "no", "ok", "okay",
    // Brands and product lines
    "samsung", "apple", "google", "iphone", "asus", "pixel", "nexus", "moto",
    "galaxy", "sony", "lg", "huawei", "xiaomi", "lenovo", "motorola", "nokia",
    "htc", "dell", "hp", "acer", "kindle",
    // Other filler
    "everything", "ago", "far", "yet", "could", "two", "many", "take",
    "taken", "see", "seen", "know", "known", "need", "needed",
];

static REVIEW_NOISE: Lazy<HashSet<String>> =
    Lazy::new(|| EXCLUDED_TERMS.iter().map(|t| t.to_string()).collect());

/// Removes excluded keywords from topics and drops topics left too thin.
#[derive(Debug, Clone)]
pub struct TopicFilter {
    excluded: HashSet<String>,
}

impl Default for TopicFilter {
    fn default() -> Self {
        Self::review_noise()
    }
}

impl TopicFilter {
    /// Filter with the built-in review noise list.
    pub fn review_noise() -> Self {
        Self {
            excluded: REVIEW_NOISE.clone(),
        }
    }

    pub fn new(excluded: impl IntoIterator<Item = String>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }

    pub fn is_excluded(&self, term: &str) -> bool {
        self.excluded.contains(term)
    }

    /// Remove excluded keywords, keeping keyword and topic order.
    /// Surviving topics are re-ranked 1..n in that order.
    pub fn filter(&self, topics: Vec<Topic>) -> Vec<Topic> {
        let before = topics.len();
        let mut kept: Vec<Topic> = topics
            .into_iter()
            .filter_map(|mut topic| {
                topic.keywords.retain(|k| !self.is_excluded(k));
                (topic.keywords.len() >= MIN_TOPIC_KEYWORDS).then_some(topic)
            })
            .collect();
        for (i, topic) in kept.iter_mut().enumerate() {
            topic.rank = i + 1;
        }
        debug!("Topic filter kept {}/{} topics", kept.len(), before);
        kept
    }
}
