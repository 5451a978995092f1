//! Batch commands shared by the CLI and the HTTP layer.

use reviewlens_core::{ReviewLensConfig, Result};
use reviewlens_dataset::{read_snapshot, BuildOptions, BuildReport, DatasetBuilder, DatasetStats};
use reviewlens_sentiment::SentimentScorer;
use reviewlens_text::Normalizer;
use tracing::info;

/// Rebuild the persisted dataset from the raw shards.
pub fn build_dataset(config: &ReviewLensConfig) -> Result<BuildReport> {
    config.data_paths.ensure_dirs()?;

    let normalizer = Normalizer::english();
    let scorer = SentimentScorer::load(config.lexicon_path.as_deref())?;
    let options = BuildOptions::from_config(config);
    info!(
        "Locale filter: language={} country={}",
        options.language, options.country
    );

    DatasetBuilder::new(&normalizer, &scorer, options).build()
}

/// Descriptive statistics over the persisted dataset.
pub fn dataset_stats(config: &ReviewLensConfig) -> Result<DatasetStats> {
    let rows = read_snapshot(&config.data_paths.dataset_file)?;
    Ok(DatasetStats::compute(&rows))
}
