//! Inverse document frequency variants.
//!
//! Both return `None` for unseen terms (`df == 0`), where the ratio is
//! undefined; callers drop such terms from the query. Neither is negative.

/// `log10(N / df)`, 0 once `df >= N`
pub fn idf(total_docs: u64, doc_freq: u64) -> Option<f64> {
    if doc_freq == 0 {
        return None;
    }
    if doc_freq >= total_docs {
        return Some(0.0);
    }
    Some((total_docs as f64 / doc_freq as f64).log10())
}

/// `max(0, log10((N - df) / df))`
///
/// Terms in at least half the collection get 0; `df >= N` is 0 as well
/// instead of `log10(0)`.
pub fn prob_idf(total_docs: u64, doc_freq: u64) -> Option<f64> {
    if doc_freq == 0 {
        return None;
    }
    if doc_freq >= total_docs {
        return Some(0.0);
    }
    let ratio = (total_docs - doc_freq) as f64 / doc_freq as f64;
    Some(ratio.log10().max(0.0))
}
