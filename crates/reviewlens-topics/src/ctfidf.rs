//! Class-based TF-IDF: term salience per cluster.
//!
//! All documents of a cluster are treated as one class document. A term's
//! weight in class `c` is `tf(t, c) * ln(1 + A / f(t))`, where `f(t)` is the
//! term's frequency over all classes and `A` the average class length in
//! tokens. Outlier documents form their own class, so terms common to the
//! whole slice are damped for every cluster.

use std::collections::{BTreeMap, HashMap};

/// Top `top_n` terms per class label, highest weight first.
///
/// Ties are broken alphabetically so output is stable.
pub fn class_keywords(docs: &[&str], labels: &[i32], top_n: usize) -> BTreeMap<i32, Vec<String>> {
    let mut class_tf: BTreeMap<i32, HashMap<&str, usize>> = BTreeMap::new();
    let mut global_tf: HashMap<&str, usize> = HashMap::new();
    let mut total_tokens = 0usize;

    for (doc, &label) in docs.iter().zip(labels) {
        let tf = class_tf.entry(label).or_default();
        for token in doc.split_whitespace() {
            *tf.entry(token).or_default() += 1;
            *global_tf.entry(token).or_default() += 1;
            total_tokens += 1;
        }
    }

    if class_tf.is_empty() {
        return BTreeMap::new();
    }
    let avg_class_len = total_tokens as f64 / class_tf.len() as f64;

    class_tf
        .into_iter()
        .map(|(label, tf)| {
            let mut weighted: Vec<(&str, f64)> = tf
                .into_iter()
                .map(|(term, count)| {
                    let f = global_tf[term] as f64;
                    (term, count as f64 * (1.0 + avg_class_len / f).ln())
                })
                .collect();
            weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            let keywords = weighted
                .into_iter()
                .take(top_n)
                .map(|(term, _)| term.to_string())
                .collect();
            (label, keywords)
        })
        .collect()
}
