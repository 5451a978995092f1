//! Query service: slice the persisted dataset by product keyword and
//! sentiment, then extract and filter topics for each slice.

use std::path::PathBuf;
use std::time::Instant;

use reviewlens_core::{Result, Sentiment, TopicParams};
use reviewlens_dataset::{read_snapshot, CleanedReview};
use reviewlens_topics::{Topic, TopicExtractor, TopicFilter};
use serde::Serialize;
use tracing::info;

/// Rows matching a keyword, split by sentiment and capped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentSlices<'a> {
    /// All matching rows, any sentiment.
    pub matched: usize,
    pub positive: Vec<&'a str>,
    pub negative: Vec<&'a str>,
}

/// Case-insensitive substring match on product name. Each sentiment slice
/// keeps the first `cap` matching rows in dataset order.
pub fn slice_by_keyword<'a>(
    rows: &'a [CleanedReview],
    keyword: &str,
    cap: usize,
) -> SentimentSlices<'a> {
    let needle = keyword.to_lowercase();
    let mut slices = SentimentSlices::default();

    for row in rows {
        if !row.product_name.to_lowercase().contains(&needle) {
            continue;
        }
        slices.matched += 1;
        let slice = match row.sentiment {
            Sentiment::Positive => &mut slices.positive,
            Sentiment::Negative => &mut slices.negative,
            Sentiment::Neutral => continue,
        };
        if slice.len() < cap {
            slice.push(row.normalized_text.as_str());
        }
    }
    slices
}

/// Topics for one keyword.
#[derive(Debug, Clone, Serialize)]
pub struct TopicsReport {
    pub keyword: String,
    pub matched: usize,
    pub positive_reviews: usize,
    pub negative_reviews: usize,
    pub positive_topics: Vec<Topic>,
    pub negative_topics: Vec<Topic>,
}

/// Result of a query. "Nothing matched" is an outcome, not an error.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    NoMatches { keyword: String },
    Topics(TopicsReport),
}

pub struct QueryService {
    extractor: TopicExtractor,
    filter: TopicFilter,
    params: TopicParams,
    dataset_path: PathBuf,
}

impl QueryService {
    pub fn new(
        extractor: TopicExtractor,
        filter: TopicFilter,
        params: TopicParams,
        dataset_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            filter,
            params,
            dataset_path: dataset_path.into(),
        }
    }

    pub fn extractor(&self) -> &TopicExtractor {
        &self.extractor
    }

    /// Load the persisted dataset and answer one keyword query.
    ///
    /// A missing dataset is `Error::Precondition`.
    pub fn query(&self, keyword: &str) -> Result<QueryOutcome> {
        let rows = read_snapshot(&self.dataset_path)?;
        self.query_rows(&rows, keyword)
    }

    /// Answer a keyword query over rows already in memory.
    pub fn query_rows(&self, rows: &[CleanedReview], keyword: &str) -> Result<QueryOutcome> {
        let start = Instant::now();
        let slices = slice_by_keyword(rows, keyword, self.params.slice_cap);
        if slices.matched == 0 {
            info!("No reviews match '{}'", keyword);
            return Ok(QueryOutcome::NoMatches {
                keyword: keyword.to_string(),
            });
        }

        info!(
            "'{}': {} matches, slices positive={} negative={}",
            keyword,
            slices.matched,
            slices.positive.len(),
            slices.negative.len()
        );

        let (positive, negative) = rayon::join(
            || self.topics_for(&slices.positive, Sentiment::Positive),
            || self.topics_for(&slices.negative, Sentiment::Negative),
        );

        let report = TopicsReport {
            keyword: keyword.to_string(),
            matched: slices.matched,
            positive_reviews: slices.positive.len(),
            negative_reviews: slices.negative.len(),
            positive_topics: positive?,
            negative_topics: negative?,
        };
        info!(
            "'{}': {} positive / {} negative topics in {}ms",
            keyword,
            report.positive_topics.len(),
            report.negative_topics.len(),
            start.elapsed().as_millis()
        );
        Ok(QueryOutcome::Topics(report))
    }

    fn topics_for(&self, texts: &[&str], sentiment: Sentiment) -> Result<Vec<Topic>> {
        let topics = self.extractor.extract(texts, sentiment, &self.params)?;
        Ok(self.filter.filter(topics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product: &str, sentiment: Sentiment, text: &str) -> CleanedReview {
        CleanedReview {
            product_name: product.into(),
            normalized_text: text.into(),
            sentiment,
        }
    }

    #[test]
    fn test_slice_matches_substring_case_insensitive() {
        let rows = vec![
            row("samsung galaxy s9", Sentiment::Positive, "a"),
            row("galaxy note", Sentiment::Negative, "b"),
            row("pixel", Sentiment::Positive, "c"),
            row("galaxy tab", Sentiment::Neutral, "d"),
        ];
        let slices = slice_by_keyword(&rows, "GALAXY", 300);
        assert_eq!(slices.matched, 3);
        assert_eq!(slices.positive, vec!["a"]);
        assert_eq!(slices.negative, vec!["b"]);
    }

    #[test]
    fn test_slice_cap_keeps_head() {
        let rows: Vec<CleanedReview> = (0..10)
            .map(|i| {
                let text = if i < 3 { "early" } else { "late" };
                row("galaxy", Sentiment::Positive, text)
            })
            .collect();
        let slices = slice_by_keyword(&rows, "galaxy", 3);
        assert_eq!(slices.matched, 10);
        assert_eq!(slices.positive, vec!["early"; 3]);
        assert!(slices.negative.is_empty());
    }

    #[test]
    fn test_keyword_whitespace_is_significant() {
        let rows = vec![
            row("galaxy s9", Sentiment::Positive, "a"),
            row("galaxys9", Sentiment::Positive, "b"),
        ];
        assert_eq!(slice_by_keyword(&rows, "y s", 300).positive, vec!["a"]);
        assert_eq!(slice_by_keyword(&rows, " galaxy", 300).matched, 0);
    }

    #[test]
    fn test_no_match() {
        let rows = vec![row("pixel", Sentiment::Positive, "a")];
        let slices = slice_by_keyword(&rows, "nokia", 300);
        assert_eq!(slices, SentimentSlices::default());
    }
}
