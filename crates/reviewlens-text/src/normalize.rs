//! Review text normalization.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lemmatizer::Lemmatizer;
use crate::stopwords::ENGLISH_STOPWORDS;

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_LEN: usize = 3;

/// HTML tag fragments and URL-like runs.
static MARKUP_AND_URLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<.*?>|http\S+|www\S+").expect("valid markup regex"));

/// Normalizer resources: stopword set and lemmatizer.
///
/// Constructed once and shared read-only; `normalize` is pure.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Normalizer {
    /// Normalizer for the English locale.
    pub fn english() -> Self {
        Self::new(
            ENGLISH_STOPWORDS.iter().map(|s| s.to_string()),
            Lemmatizer::english(),
        )
    }

    pub fn new(stopwords: impl IntoIterator<Item = String>, lemmatizer: Lemmatizer) -> Self {
        Self {
            stopwords: stopwords.into_iter().collect(),
            lemmatizer,
        }
    }

    /// Normalize an optional raw field. Absent input yields "".
    pub fn normalize_field(&self, raw: Option<&str>) -> String {
        match raw {
            Some(text) => self.normalize(text),
            None => String::new(),
        }
    }

    /// Clean, tokenize, filter and lemmatize one review text.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase().replace(['"', '\''], "");
        let stripped = MARKUP_AND_URLS.replace_all(&lowered, " ");

        let letters_only: String = stripped
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let mut out: Vec<String> = Vec::new();
        for token in letters_only.split_whitespace() {
            if !self.keep(token) {
                continue;
            }
            let lemma = self.lemmatizer.lemmatize(token);
            // A lemma can shrink into a stopword ("owns" → "own").
            if self.keep(&lemma) {
                out.push(lemma);
            }
        }

        out.join(" ")
    }

    fn keep(&self, token: &str) -> bool {
        token.len() >= MIN_TOKEN_LEN && !self.stopwords.contains(token)
    }
}

/// Number of whitespace-delimited tokens.
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_review() {
        let n = Normalizer::english();
        assert_eq!(
            n.normalize("Great battery life, love it!"),
            "great battery life love"
        );
    }

    #[test]
    fn test_strips_markup_urls_and_quotes() {
        let n = Normalizer::english();
        let out = n.normalize(
            "<b>Screen</b> cracked!! See http://example.com/x?y=1 and www.shop.com \"Terrible\" don't",
        );
        assert_eq!(out, "screen cracked see terrible dont");
    }

    #[test]
    fn test_lemmatizes_plurals() {
        let n = Normalizer::english();
        assert_eq!(n.normalize("The batteries and chargers"), "battery charger");
    }

    #[test]
    fn test_only_stopwords_yields_empty() {
        let n = Normalizer::english();
        assert_eq!(n.normalize("it is what it is, ok?"), "");
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize_field(None), "");
    }

    #[test]
    fn test_lemma_that_becomes_stopword_is_dropped() {
        let n = Normalizer::english();
        assert_eq!(n.normalize("owns several phones"), "several phone");
    }

    #[test]
    fn test_output_alphabet_and_token_length() {
        let n = Normalizer::english();
        let samples = [
            "Ça marche très bien!!! 10/10 would buy again :)",
            "<div class='x'>HTML</div> & entities &amp; stuff",
            "ALL CAPS REVIEW WITH NUMB3RS and_under_scores",
            "tab\tseparated\nnew lines\r\nwindows",
            "Émoji 🎉 party time, totally worth €300",
        ];
        for raw in samples {
            let out = n.normalize(raw);
            assert!(
                out.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
                "bad char in {out:?}"
            );
            assert!(out.split(' ').filter(|t| !t.is_empty()).all(|t| t.len() > 2));
            assert!(!out.contains("  "));
        }
    }

    #[test]
    fn test_idempotent() {
        let n = Normalizer::english();
        for raw in [
            "Great battery life, love it!",
            "The screens are too dim and the cases owns nothing",
            "Worst purchase ever... stopped charging after 2 weeks",
            "Children's movies look amazing on this display",
        ] {
            let once = n.normalize(raw);
            assert_eq!(n.normalize(&once), once);
        }
    }

    #[test]
    fn test_token_count() {
        assert_eq!(token_count("great battery life love"), 4);
        assert_eq!(token_count(""), 0);
        assert_eq!(token_count("  spaced   out  "), 2);
    }
}
