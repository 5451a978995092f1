//! Noun lemmatizer: reduces plural forms to their dictionary base form.
//!
//! Irregular forms come from an exception table; regular plurals go
//! through ordered detachment rules. Lemmatization is idempotent:
//! `lemmatize(lemmatize(w)) == lemmatize(w)` for every input.

use std::collections::{HashMap, HashSet};

/// Detachment rules: (suffix, replacement). Longer suffixes first.
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("tches", "tch"),
    ("nches", "nch"),
    ("rches", "rch"),
    ("uches", "uch"),
    ("shes", "sh"),
    ("zzes", "zz"),
    ("xes", "x"),
    ("ies", "y"),
    ("s", ""),
];

/// Endings that look plural but belong to singular words.
const PROTECTED_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Irregular plural → lemma.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("salesmen", "salesman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("wolves", "wolf"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("buses", "bus"),
    ("quizzes", "quiz"),
    ("lenses", "lens"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("calories", "calorie"),
    ("selfies", "selfie"),
    ("rookies", "rookie"),
    ("zombies", "zombie"),
    ("smoothies", "smoothie"),
    ("freebies", "freebie"),
    ("goalies", "goalie"),
    ("ties", "tie"),
    ("lies", "lie"),
    ("pies", "pie"),
    ("dies", "die"),
];

/// Words that end like plurals but are already base forms.
const INVARIANT: &[&str] = &[
    "news", "series", "species", "means", "always", "perhaps", "whereas",
    "lens", "canvas", "alias", "bias", "atlas", "gas", "yes", "plus", "chaos",
    "sometimes", "headquarters", "physics", "electronics", "mathematics",
    "thanks", "pants", "jeans", "glasses", "scissors", "earphones",
    "headphones", "earbuds", "afterwards", "towards", "besides", "overseas",
    "wireless", "nevertheless", "nonetheless", "less", "unless", "regardless",
];

/// Dictionary-backed noun lemmatizer.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Lemmatizer {
    /// Lemmatizer with the built-in English tables.
    pub fn english() -> Self {
        Self {
            exceptions: EXCEPTIONS.iter().copied().collect(),
            invariant: INVARIANT.iter().copied().collect(),
        }
    }

    /// Reduce a lowercase token to its base form.
    pub fn lemmatize(&self, word: &str) -> String {
        if self.invariant.contains(word) {
            return word.to_string();
        }
        if let Some(&lemma) = self.exceptions.get(word) {
            return lemma.to_string();
        }

        let candidate = match self.detach(word) {
            Some(c) => c,
            None => return word.to_string(),
        };

        // "mens" → "men" → "man" in one step
        match self.exceptions.get(candidate.as_str()) {
            Some(&lemma) => lemma.to_string(),
            None => candidate,
        }
    }

    fn detach(&self, word: &str) -> Option<String> {
        if PROTECTED_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return None;
        }

        for &(suffix, replacement) in DETACHMENT_RULES {
            if word.len() > suffix.len() && word.ends_with(suffix) {
                let stem = &word[..word.len() - suffix.len()];
                let lemma = format!("{}{}", stem, replacement);
                if lemma.len() < 3 {
                    return None;
                }
                return Some(lemma);
            }
        }

        None
    }
}
