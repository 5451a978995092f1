//! Dataset building pipeline: shards → locale filter → normalize → label → persist.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use reviewlens_core::{ReviewLensConfig, Result, Sentiment};
use reviewlens_sentiment::SentimentScorer;
use reviewlens_text::{token_count, Normalizer};
use serde::Serialize;
use tracing::{debug, info};

use crate::raw::{discover_shards, read_shard, RawReview};
use crate::snapshot::{write_snapshot, CleanedReview};
use crate::stats::SentimentCounts;

/// Reviews with fewer normalized tokens than this are dropped.
pub const MIN_REVIEW_TOKENS: usize = 4;

/// Strip surrounding `"` then `'` characters and lowercase.
pub fn normalize_product_name(raw: Option<&str>) -> String {
    raw.unwrap_or("")
        .trim_matches('"')
        .trim_matches('\'')
        .to_lowercase()
}

/// Where to read shards from, which locale to keep, where to write.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub raw_dir: PathBuf,
    pub shard_prefix: String,
    pub language: String,
    pub country: String,
    pub output: PathBuf,
}

impl BuildOptions {
    pub fn from_config(config: &ReviewLensConfig) -> Self {
        Self {
            raw_dir: config.data_paths.raw.clone(),
            shard_prefix: config.shard_prefix.clone(),
            language: config.target_language.clone(),
            country: config.target_country.clone(),
            output: config.data_paths.dataset_file.clone(),
        }
    }
}

/// Summary of one build run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub shards: usize,
    pub rows_read: usize,
    pub rows_in_locale: usize,
    pub rows_persisted: usize,
    pub sentiment: SentimentCounts,
    pub sha256: String,
    pub duration_ms: u64,
}

/// Turns raw shards into the persisted, labeled dataset.
pub struct DatasetBuilder<'a> {
    normalizer: &'a Normalizer,
    scorer: &'a SentimentScorer,
    options: BuildOptions,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(normalizer: &'a Normalizer, scorer: &'a SentimentScorer, options: BuildOptions) -> Self {
        Self {
            normalizer,
            scorer,
            options,
        }
    }

    /// Run the full build and replace the snapshot.
    pub fn build(&self) -> Result<BuildReport> {
        let start = Instant::now();

        let shards = discover_shards(&self.options.raw_dir, &self.options.shard_prefix)?;
        info!(
            "Building dataset from {} shards in {}",
            shards.len(),
            self.options.raw_dir.display()
        );

        let mut raw = Vec::new();
        for shard in &shards {
            let rows = read_shard(shard)?;
            debug!("{}: {} rows", shard.display(), rows.len());
            raw.extend(rows);
        }
        let rows_read = raw.len();

        let in_locale: Vec<RawReview> = raw.into_iter().filter(|r| self.in_locale(r)).collect();
        let rows_in_locale = in_locale.len();

        let cleaned = self.process(in_locale);
        let sha256 = write_snapshot(&self.options.output, &cleaned)?;

        let report = BuildReport {
            shards: shards.len(),
            rows_read,
            rows_in_locale,
            rows_persisted: cleaned.len(),
            sentiment: SentimentCounts::from_rows(&cleaned),
            sha256,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Dataset built: read={}, in_locale={}, persisted={} (pos={}, neu={}, neg={}) in {}ms",
            report.rows_read,
            report.rows_in_locale,
            report.rows_persisted,
            report.sentiment.positive,
            report.sentiment.neutral,
            report.sentiment.negative,
            report.duration_ms
        );
        Ok(report)
    }

    /// Normalize, label and filter rows. Output keeps input order.
    pub fn process(&self, rows: Vec<RawReview>) -> Vec<CleanedReview> {
        rows.into_par_iter()
            .filter_map(|row| self.clean(row))
            .collect()
    }

    fn clean(&self, row: RawReview) -> Option<CleanedReview> {
        let normalized_text = self.normalizer.normalize_field(row.text.as_deref());
        if token_count(&normalized_text) < MIN_REVIEW_TOKENS {
            return None;
        }
        let sentiment: Sentiment = self.scorer.label(&normalized_text);
        Some(CleanedReview {
            product_name: normalize_product_name(row.product_name.as_deref()),
            normalized_text,
            sentiment,
        })
    }

    fn in_locale(&self, row: &RawReview) -> bool {
        row.language.as_deref() == Some(self.options.language.as_str())
            && row.country.as_deref() == Some(self.options.country.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, lang: &str, country: &str, product: &str) -> RawReview {
        RawReview {
            text: Some(text.into()),
            language: Some(lang.into()),
            country: Some(country.into()),
            product_name: Some(product.into()),
        }
    }

    fn options(dir: &std::path::Path) -> BuildOptions {
        BuildOptions {
            raw_dir: dir.join("raw"),
            shard_prefix: "phone_user_review_file_".into(),
            language: "en".into(),
            country: "us".into(),
            output: dir.join("reviews_preprocessed.csv"),
        }
    }

    #[test]
    fn test_normalize_product_name() {
        assert_eq!(normalize_product_name(Some("\"Galaxy S9\"")), "galaxy s9");
        assert_eq!(normalize_product_name(Some("'Pixel 3'")), "pixel 3");
        assert_eq!(normalize_product_name(Some("\"'Moto G'\"")), "moto g");
        assert_eq!(normalize_product_name(Some("  Nokia  ")), "  nokia  ");
        assert_eq!(normalize_product_name(None), "");
    }

    #[test]
    fn test_process_drops_short_and_keeps_order() {
        let normalizer = Normalizer::english();
        let scorer = SentimentScorer::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let builder = DatasetBuilder::new(&normalizer, &scorer, options(dir.path()));

        let rows = vec![
            raw("Great battery life, love it!", "en", "us", "A"),
            raw("ok", "en", "us", "B"),
            raw("Screen cracked after a week, terrible waste of money", "en", "us", "C"),
        ];
        let cleaned = builder.process(rows);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].product_name, "a");
        assert_eq!(cleaned[0].sentiment, Sentiment::Positive);
        assert_eq!(cleaned[1].product_name, "c");
        assert_eq!(cleaned[1].sentiment, Sentiment::Negative);
        assert!(cleaned
            .iter()
            .all(|r| token_count(&r.normalized_text) >= MIN_REVIEW_TOKENS));
    }

    #[test]
    fn test_absent_text_is_dropped() {
        let normalizer = Normalizer::english();
        let scorer = SentimentScorer::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let builder = DatasetBuilder::new(&normalizer, &scorer, options(dir.path()));

        let row = RawReview {
            text: None,
            language: Some("en".into()),
            country: Some("us".into()),
            product_name: Some("x".into()),
        };
        assert!(builder.process(vec![row]).is_empty());
    }

    #[test]
    fn test_locale_filter() {
        let normalizer = Normalizer::english();
        let scorer = SentimentScorer::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let builder = DatasetBuilder::new(&normalizer, &scorer, options(dir.path()));

        assert!(builder.in_locale(&raw("t", "en", "us", "p")));
        assert!(!builder.in_locale(&raw("t", "de", "us", "p")));
        assert!(!builder.in_locale(&raw("t", "en", "gb", "p")));
        assert!(!builder.in_locale(&raw("t", " en", "us", "p")));
        assert!(!builder.in_locale(&raw("t", "en", "us ", "p")));
        let mut missing = raw("t", "en", "us", "p");
        missing.country = None;
        assert!(!builder.in_locale(&missing));
    }
}
