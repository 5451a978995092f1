//! Valence-lexicon scorer with booster and negation handling.

use std::collections::HashMap;
use std::path::Path;

use reviewlens_core::{Error, Result, Sentiment};
use serde::Serialize;
use tracing::info;

/// Built-in lexicon: word → valence on a [-4, 4] scale.
const BUILTIN_LEXICON: &str = include_str!("../lexicon.json");

/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;

/// Intensity added (or removed) by a booster word.
const BOOSTER_INCR: f64 = 0.293;
const BOOSTER_DECR: f64 = -0.293;

/// Valence multiplier when a negation precedes the word.
const NEGATION_SCALAR: f64 = -0.74;

/// How far back boosters and negations reach.
const WINDOW: usize = 3;

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably",
    "decidedly", "deeply", "enormously", "entirely", "especially",
    "exceptionally", "extremely", "fabulously", "greatly", "highly", "hugely",
    "incredibly", "intensely", "majorly", "particularly", "purely", "quite",
    "really", "remarkably", "substantially", "thoroughly", "totally",
    "tremendously", "unbelievably", "unusually", "utterly",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
];

/// Negations that survive normalization (apostrophes are already gone).
const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
    "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
    "neednt", "never", "none", "nope", "nothing", "nowhere", "oughtnt", "shant",
    "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt", "rarely",
    "seldom", "despite",
];

/// Polarity breakdown for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl PolarityScores {
    fn empty() -> Self {
        Self {
            neg: 0.0,
            neu: 0.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

/// Lexicon-based sentiment scorer.
///
/// Build once at startup and share by reference; scoring never mutates.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: HashMap<String, f64>,
}

impl SentimentScorer {
    /// Load the built-in lexicon.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_LEXICON)
    }

    /// Load a lexicon from a JSON object file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::ResourceUnavailable(format!(
                "Failed to read lexicon {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Load the lexicon at `path`, or the built-in one when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let scorer = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::builtin()?,
        };
        info!("Sentiment lexicon loaded: {} entries", scorer.len());
        Ok(scorer)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let lexicon: HashMap<String, f64> = serde_json::from_str(raw)
            .map_err(|e| Error::ResourceUnavailable(format!("Invalid sentiment lexicon: {}", e)))?;
        if lexicon.is_empty() {
            return Err(Error::ResourceUnavailable(
                "Sentiment lexicon is empty".into(),
            ));
        }
        Ok(Self { lexicon })
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    /// Score a normalized text. Empty text scores 0 everywhere.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return PolarityScores::empty();
        }

        let valences: Vec<f64> = (0..tokens.len())
            .map(|i| self.token_valence(&tokens, i))
            .collect();

        let sum: f64 = valences.iter().sum();
        let compound = normalize(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &v in &valences {
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        let total = pos_sum + neg_sum.abs() + neu_count;

        PolarityScores {
            neg: round3((neg_sum / total).abs()),
            neu: round3(neu_count / total),
            pos: round3(pos_sum / total),
            compound: round4(compound),
        }
    }

    /// Label a normalized text.
    pub fn label(&self, text: &str) -> Sentiment {
        Sentiment::from_compound(self.polarity_scores(text).compound)
    }

    fn token_valence(&self, tokens: &[&str], i: usize) -> f64 {
        let word = tokens[i];
        if is_booster(word) {
            return 0.0;
        }
        let mut valence = match self.lexicon.get(word) {
            Some(&v) => v,
            None => return 0.0,
        };

        for back in 1..=WINDOW.min(i) {
            let prev = tokens[i - back];
            let boost = booster_scalar(prev, valence);
            if boost != 0.0 {
                // Boosters fade with distance.
                let fade = match back {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                valence += boost * fade;
            }
        }

        let negated = (1..=WINDOW.min(i)).any(|back| NEGATIONS.contains(&tokens[i - back]));
        if negated {
            valence *= NEGATION_SCALAR;
        }

        valence
    }
}

fn is_booster(word: &str) -> bool {
    BOOSTERS_UP.contains(&word) || BOOSTERS_DOWN.contains(&word)
}

fn booster_scalar(word: &str, valence: f64) -> f64 {
    let scalar = if BOOSTERS_UP.contains(&word) {
        BOOSTER_INCR
    } else if BOOSTERS_DOWN.contains(&word) {
        BOOSTER_DECR
    } else {
        return 0.0;
    };
    if valence < 0.0 {
        -scalar
    } else {
        scalar
    }
}

/// Squash an unbounded valence sum into [-1, 1].
fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SentimentScorer {
        SentimentScorer::builtin().unwrap()
    }

    #[test]
    fn test_builtin_loads() {
        let s = scorer();
        assert!(s.len() > 300);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let s = scorer();
        let scores = s.polarity_scores("");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(s.label(""), Sentiment::Neutral);
    }

    #[test]
    fn test_positive_review() {
        let s = scorer();
        assert_eq!(s.label("great battery life love"), Sentiment::Positive);
        let scores = s.polarity_scores("great battery life love");
        assert!(scores.compound > 0.8);
        assert!(scores.pos > scores.neg);
    }

    #[test]
    fn test_negative_review() {
        let s = scorer();
        assert_eq!(
            s.label("screen cracked terrible waste money"),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_unknown_words_are_neutral() {
        let s = scorer();
        assert_eq!(s.label("phone arrived tuesday box"), Sentiment::Neutral);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let s = scorer();
        let plain = s.polarity_scores("battery good").compound;
        let negated = s.polarity_scores("battery dont good").compound;
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        let s = scorer();
        let plain = s.polarity_scores("camera good").compound;
        let boosted = s.polarity_scores("camera extremely good").compound;
        assert!(boosted > plain);

        let plain_neg = s.polarity_scores("camera bad").compound;
        let boosted_neg = s.polarity_scores("camera extremely bad").compound;
        assert!(boosted_neg < plain_neg);
    }

    #[test]
    fn test_compound_bounded() {
        let s = scorer();
        let text = "love ".repeat(200);
        let c = s.polarity_scores(&text).compound;
        assert!(c <= 1.0 && c > 0.99);
    }

    #[test]
    fn test_custom_lexicon_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lex.json");
        std::fs::write(&path, r#"{"zap": 2.0, "zonk": -2.0}"#).unwrap();
        let s = SentimentScorer::load(Some(&path)).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.label("zap zap"), Sentiment::Positive);
        assert_eq!(s.label("zonk"), Sentiment::Negative);
    }

    #[test]
    fn test_bad_lexicon_is_resource_unavailable() {
        let err = SentimentScorer::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable(_)));
        let err = SentimentScorer::from_json_str("{}").unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable(_)));
        let err = SentimentScorer::from_path(Path::new("/nonexistent/lexicon.json")).unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable(_)));
    }
}
