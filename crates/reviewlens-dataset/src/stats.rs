//! Descriptive statistics over a persisted dataset.

use std::collections::HashMap;

use reviewlens_core::Sentiment;
use serde::Serialize;

use crate::snapshot::CleanedReview;

/// Entries kept in the term and product rankings.
const TOP_N: usize = 20;

/// Equal-width bins in the length histogram.
const LENGTH_BINS: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn from_rows(rows: &[CleanedReview]) -> Self {
        let mut counts = Self::default();
        for row in rows {
            match row.sentiment {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Neutral => counts.neutral += 1,
                Sentiment::Negative => counts.negative += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub name: String,
    pub count: usize,
}

/// One histogram bin covering token counts `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthBin {
    pub start: usize,
    pub end: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthSummary {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub histogram: Vec<LengthBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub sentiment: SentimentCounts,
    pub top_terms: Vec<RankedCount>,
    pub top_products: Vec<RankedCount>,
    pub length: LengthSummary,
}

impl DatasetStats {
    pub fn compute(rows: &[CleanedReview]) -> Self {
        let mut terms: HashMap<&str, usize> = HashMap::new();
        let mut products: HashMap<&str, usize> = HashMap::new();
        let mut lengths = Vec::with_capacity(rows.len());

        for row in rows {
            let mut n = 0;
            for token in row.normalized_text.split_whitespace() {
                *terms.entry(token).or_default() += 1;
                n += 1;
            }
            lengths.push(n);
            *products.entry(row.product_name.as_str()).or_default() += 1;
        }

        Self {
            total: rows.len(),
            sentiment: SentimentCounts::from_rows(rows),
            top_terms: top_n(terms),
            top_products: top_n(products),
            length: summarize_lengths(&lengths),
        }
    }
}

/// Highest counts first; ties broken by name.
fn top_n(counts: HashMap<&str, usize>) -> Vec<RankedCount> {
    let mut ranked: Vec<RankedCount> = counts
        .into_iter()
        .map(|(name, count)| RankedCount {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(TOP_N);
    ranked
}

fn summarize_lengths(lengths: &[usize]) -> LengthSummary {
    let (min, max) = match (lengths.iter().min(), lengths.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => {
            return LengthSummary {
                min: 0,
                max: 0,
                mean: 0.0,
                histogram: Vec::new(),
            }
        }
    };
    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

    // Bins span [min, max] inclusive; width rounds up so max lands in the last bin.
    let span = max - min + 1;
    let width = span.div_ceil(LENGTH_BINS).max(1);
    let bins = span.div_ceil(width);
    let mut histogram: Vec<LengthBin> = (0..bins)
        .map(|i| LengthBin {
            start: min + i * width,
            end: min + (i + 1) * width,
            count: 0,
        })
        .collect();
    for &len in lengths {
        histogram[(len - min) / width].count += 1;
    }

    LengthSummary {
        min,
        max,
        mean,
        histogram,
    }
}
