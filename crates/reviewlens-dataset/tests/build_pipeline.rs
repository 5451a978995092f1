//! End-to-end dataset builds over shard fixtures on disk.

use std::path::Path;

use reviewlens_core::{Error, Sentiment};
use reviewlens_dataset::{
    read_snapshot, BuildOptions, DatasetBuilder, DatasetStats, MIN_REVIEW_TOKENS,
};
use reviewlens_sentiment::SentimentScorer;
use reviewlens_text::{token_count, Normalizer};

const HEADER: &str = "url,lang,country,date,product,extract\n";

fn options(root: &Path) -> BuildOptions {
    BuildOptions {
        raw_dir: root.join("raw"),
        shard_prefix: "phone_user_review_file_".into(),
        language: "en".into(),
        country: "us".into(),
        output: root.join("reviews_preprocessed.csv"),
    }
}

fn write_shard(root: &Path, name: &str, rows: &[&str]) {
    let raw = root.join("raw");
    std::fs::create_dir_all(&raw).unwrap();
    let mut body = HEADER.to_string();
    for r in rows {
        body.push_str(r);
        body.push('\n');
    }
    std::fs::write(raw.join(name), body).unwrap();
}

fn resources() -> (Normalizer, SentimentScorer) {
    (Normalizer::english(), SentimentScorer::builtin().unwrap())
}

#[test]
fn test_galaxy_rows_are_cleaned_and_positive() {
    let dir = tempfile::tempdir().unwrap();
    let row = r#"u,en,us,2018,"""Galaxy S9""","Great battery life, love it!""#;
    write_shard(dir.path(), "phone_user_review_file_1.csv", &[row, row, row, row]);

    let (normalizer, scorer) = resources();
    let report = DatasetBuilder::new(&normalizer, &scorer, options(dir.path()))
        .build()
        .unwrap();

    assert_eq!(report.shards, 1);
    assert_eq!(report.rows_persisted, 4);
    assert_eq!(report.sentiment.positive, 4);

    let rows = read_snapshot(&dir.path().join("reviews_preprocessed.csv")).unwrap();
    assert_eq!(rows.len(), 4);
    for r in &rows {
        assert_eq!(r.product_name, "galaxy s9");
        assert_eq!(r.normalized_text, "great battery life love");
        assert_eq!(r.sentiment, Sentiment::Positive);
    }
}

#[test]
fn test_locale_and_length_filters_across_shards() {
    let dir = tempfile::tempdir().unwrap();
    write_shard(
        dir.path(),
        "phone_user_review_file_2.csv",
        &[
            "u,en,us,2018,Pixel 3,Camera takes sharp photos in low light",
            "u,de,de,2018,Pixel 3,Die Kamera macht wirklich scharfe Fotos",
        ],
    );
    write_shard(
        dir.path(),
        "phone_user_review_file_1.csv",
        &[
            "u,en,us,2018,Moto G,Battery died after two days of light use",
            "u,en,us,2018,Moto G,Meh.",
            "u,en,gb,2018,Moto G,Battery lasts all day with heavy streaming",
        ],
    );
    // Not a shard: wrong prefix
    std::fs::write(
        dir.path().join("raw").join("other.csv"),
        format!("{}u,en,us,2018,X,should never be read at all\n", HEADER),
    )
    .unwrap();

    let (normalizer, scorer) = resources();
    let report = DatasetBuilder::new(&normalizer, &scorer, options(dir.path()))
        .build()
        .unwrap();

    assert_eq!(report.shards, 2);
    assert_eq!(report.rows_read, 5);
    assert_eq!(report.rows_in_locale, 3);
    assert_eq!(report.rows_persisted, 2);

    let rows = read_snapshot(&dir.path().join("reviews_preprocessed.csv")).unwrap();
    // Shard 1 sorts before shard 2
    assert_eq!(rows[0].product_name, "moto g");
    assert_eq!(rows[1].product_name, "pixel 3");
    assert!(rows
        .iter()
        .all(|r| token_count(&r.normalized_text) >= MIN_REVIEW_TOKENS));
}

#[test]
fn test_rebuild_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_shard(
        dir.path(),
        "phone_user_review_file_1.csv",
        &[
            "u,en,us,2018,Galaxy S9,Screen cracked after a week terrible waste of money",
            "u,en,us,2018,Galaxy S9,Battery lasts two full days with heavy use",
            "u,en,us,2018,Pixel 3,Camera quality excellent and the display is bright",
        ],
    );

    let (normalizer, scorer) = resources();
    let builder = DatasetBuilder::new(&normalizer, &scorer, options(dir.path()));
    let output = dir.path().join("reviews_preprocessed.csv");

    let first = builder.build().unwrap();
    let bytes_first = std::fs::read(&output).unwrap();
    let second = builder.build().unwrap();
    let bytes_second = std::fs::read(&output).unwrap();

    assert_eq!(bytes_first, bytes_second);
    assert_eq!(first.sha256, second.sha256);
}

#[test]
fn test_no_shards_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("raw")).unwrap();

    let (normalizer, scorer) = resources();
    let err = DatasetBuilder::new(&normalizer, &scorer, options(dir.path()))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(!dir.path().join("reviews_preprocessed.csv").exists());
}

#[test]
fn test_stats_over_built_dataset() {
    let dir = tempfile::tempdir().unwrap();
    write_shard(
        dir.path(),
        "phone_user_review_file_1.csv",
        &[
            "u,en,us,2018,Galaxy S9,Great battery life and love the screen",
            "u,en,us,2018,Galaxy S9,Battery drains fast and screen flickers",
            "u,en,us,2018,Pixel 3,Battery holds charge and camera is superb",
        ],
    );

    let (normalizer, scorer) = resources();
    DatasetBuilder::new(&normalizer, &scorer, options(dir.path()))
        .build()
        .unwrap();

    let rows = read_snapshot(&dir.path().join("reviews_preprocessed.csv")).unwrap();
    let stats = DatasetStats::compute(&rows);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.top_terms[0].name, "battery");
    assert_eq!(stats.top_products[0].name, "galaxy s9");
    assert!(stats.length.min >= MIN_REVIEW_TOKENS);
}
