use serde::{Deserialize, Serialize};
use crate::core::config::EvalConfig;

/// Per-document statistics, fixed once the document is indexed
#[derive(Debug, Clone, PartialEq)]
pub struct DocStats {
    pub length: u32,          // Number of tokens in document
    pub max_term_freq: u32,   // Largest raw tf of any term in the document
    pub log_norm: f64,        // sqrt(Σ (1 + ln tf)²) over the document's terms
    pub augmented_norm: f64,  // sqrt(Σ (0.5 + 0.5 tf / max_tf)²)
}

impl DocStats {
    /// Build from the raw term frequencies of one document.
    pub fn from_term_freqs<I: IntoIterator<Item = u32>>(freqs: I) -> Self {
        let freqs: Vec<u32> = freqs.into_iter().filter(|&tf| tf > 0).collect();
        let length = freqs.iter().sum();
        let max_term_freq = freqs.iter().copied().max().unwrap_or(0);

        let log_norm = freqs
            .iter()
            .map(|&tf| log_tf(tf).powi(2))
            .sum::<f64>()
            .sqrt();
        let augmented_norm = freqs
            .iter()
            .map(|&tf| augmented_tf(tf, max_term_freq).powi(2))
            .sum::<f64>()
            .sqrt();

        DocStats { length, max_term_freq, log_norm, augmented_norm }
    }
}

/// Collection-wide statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub total_docs: u64,
    pub avg_doc_length: f64,
}

/// Document-side weight of one matching term
pub trait Similarity: Send + Sync {
    fn score(&self, term_freq: u32, doc_freq: u64, doc: &DocStats, collection: &CollectionStats) -> f64;

    fn name(&self) -> &str;
}

fn log_tf(tf: u32) -> f64 {
    if tf == 0 { 0.0 } else { 1.0 + (tf as f64).ln() }
}

fn augmented_tf(tf: u32, max_tf: u32) -> f64 {
    if max_tf == 0 { 0.0 } else { 0.5 + 0.5 * tf as f64 / max_tf as f64 }
}

/// Okapi BM25 with the Lucene idf, `ln(1 + (N - df + 0.5) / (df + 0.5))`
#[derive(Debug, Clone)]
pub struct Bm25Similarity {
    pub k1: f64,  // Term frequency saturation
    pub b: f64,   // Length normalization strength
}

impl Default for Bm25Similarity {
    fn default() -> Self {
        Bm25Similarity { k1: 1.2, b: 0.75 }
    }
}

impl Similarity for Bm25Similarity {
    fn score(&self, term_freq: u32, doc_freq: u64, doc: &DocStats, collection: &CollectionStats) -> f64 {
        if term_freq == 0 || doc_freq == 0 {
            return 0.0;
        }
        let n = collection.total_docs as f64;
        let df = doc_freq as f64;
        let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();

        let tf = term_freq as f64;
        let length_ratio = if collection.avg_doc_length > 0.0 {
            doc.length as f64 / collection.avg_doc_length
        } else {
            1.0
        };
        let denominator = tf + self.k1 * (1.0 - self.b + self.b * length_ratio);

        idf * tf * (self.k1 + 1.0) / denominator
    }

    fn name(&self) -> &str {
        "bm25"
    }
}

/// SMART `lnc`: logarithmic tf, no idf, cosine normalization
#[derive(Debug, Clone, Default)]
pub struct LncSimilarity;

impl Similarity for LncSimilarity {
    fn score(&self, term_freq: u32, _doc_freq: u64, doc: &DocStats, _collection: &CollectionStats) -> f64 {
        if doc.log_norm == 0.0 {
            return 0.0;
        }
        log_tf(term_freq) / doc.log_norm
    }

    fn name(&self) -> &str {
        "lnc"
    }
}

/// SMART `bnn`: binary presence
#[derive(Debug, Clone, Default)]
pub struct BnnSimilarity;

impl Similarity for BnnSimilarity {
    fn score(&self, term_freq: u32, _doc_freq: u64, _doc: &DocStats, _collection: &CollectionStats) -> f64 {
        if term_freq > 0 { 1.0 } else { 0.0 }
    }

    fn name(&self) -> &str {
        "bnn"
    }
}

/// SMART `anc`: augmented tf, no idf, cosine normalization
#[derive(Debug, Clone, Default)]
pub struct AncSimilarity;

impl Similarity for AncSimilarity {
    fn score(&self, term_freq: u32, _doc_freq: u64, doc: &DocStats, _collection: &CollectionStats) -> f64 {
        if term_freq == 0 || doc.augmented_norm == 0.0 {
            return 0.0;
        }
        augmented_tf(term_freq, doc.max_term_freq) / doc.augmented_norm
    }

    fn name(&self) -> &str {
        "anc"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityKind {
    Bm25,
    Lnc,
    Bnn,
    Anc,
}

impl SimilarityKind {
    pub fn build(self, config: &EvalConfig) -> Box<dyn Similarity> {
        match self {
            SimilarityKind::Bm25 => Box::new(Bm25Similarity { k1: config.bm25_k1, b: config.bm25_b }),
            SimilarityKind::Lnc => Box::new(LncSimilarity),
            SimilarityKind::Bnn => Box::new(BnnSimilarity),
            SimilarityKind::Anc => Box::new(AncSimilarity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn collection() -> CollectionStats {
        CollectionStats { total_docs: 10, avg_doc_length: 4.0 }
    }

    #[test]
    fn doc_stats_norms() {
        // tf = [2, 1, 1]
        let doc = DocStats::from_term_freqs([2, 1, 1]);
        assert_eq!(doc.length, 4);
        assert_eq!(doc.max_term_freq, 2);

        let l2 = 1.0 + 2f64.ln();
        assert!((doc.log_norm - (l2 * l2 + 2.0).sqrt()).abs() < EPS);
        assert!((doc.augmented_norm - (1.0 + 2.0 * 0.75 * 0.75_f64).sqrt()).abs() < EPS);
    }

    #[test]
    fn lnc_weights_of_a_document_have_unit_norm() {
        let freqs = [3, 1, 2];
        let doc = DocStats::from_term_freqs(freqs);
        let sum_sq: f64 = freqs
            .iter()
            .map(|&tf| LncSimilarity.score(tf, 1, &doc, &collection()).powi(2))
            .sum();
        assert!((sum_sq - 1.0).abs() < 1e-9);
    }

    #[test]
    fn anc_weights_of_a_document_have_unit_norm() {
        let freqs = [4, 1];
        let doc = DocStats::from_term_freqs(freqs);
        let sum_sq: f64 = freqs
            .iter()
            .map(|&tf| AncSimilarity.score(tf, 1, &doc, &collection()).powi(2))
            .sum();
        assert!((sum_sq - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bnn_is_presence_only() {
        let doc = DocStats::from_term_freqs([7]);
        assert_eq!(BnnSimilarity.score(7, 3, &doc, &collection()), 1.0);
        assert_eq!(BnnSimilarity.score(0, 3, &doc, &collection()), 0.0);
    }

    #[test]
    fn bm25_prefers_rarer_terms() {
        let doc = DocStats::from_term_freqs([1, 1, 1, 1]);
        let bm25 = Bm25Similarity::default();
        let rare = bm25.score(1, 1, &doc, &collection());
        let common = bm25.score(1, 9, &doc, &collection());
        assert!(rare > common);
        assert!(common > 0.0);
    }

    #[test]
    fn empty_document_scores_zero() {
        let doc = DocStats::from_term_freqs(Vec::new());
        assert_eq!(LncSimilarity.score(1, 1, &doc, &collection()), 0.0);
        assert_eq!(AncSimilarity.score(1, 1, &doc, &collection()), 0.0);
    }
}
