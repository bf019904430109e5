use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, Result};
use crate::core::types::Term;
use crate::index::stats::TermStatsProvider;
use crate::query::weighted::WeightedQuery;
use crate::weighting::idf::{idf, prob_idf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Standard,  // One unit clause per token, duplicates kept
    Ltn,       // (1 + log10 tf) * log10(N / df)
    Bnn,       // One unit clause per distinct term
    Apc,       // Augmented tf * probabilistic idf, cosine normalized
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [Scheme::Standard, Scheme::Ltn, Scheme::Bnn, Scheme::Apc];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Standard => "standard",
            Scheme::Ltn => "ltn",
            Scheme::Bnn => "bnn",
            Scheme::Apc => "apc",
        }
    }

    /// Weight already-analyzed query terms.
    pub fn weigh<S: TermStatsProvider + ?Sized>(self, terms: &[Term], stats: &S) -> WeightedQuery {
        match self {
            Scheme::Standard => standard(terms),
            Scheme::Ltn => ltn(terms, stats),
            Scheme::Bnn => bnn(terms),
            Scheme::Apc => apc(terms, stats),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument(format!("Unknown weighting scheme '{}'", s)))
    }
}

/// Raw term frequencies in first-occurrence order.
fn term_frequencies(terms: &[Term]) -> Vec<(Term, u32)> {
    let mut slots: HashMap<&Term, usize> = HashMap::new();
    let mut freqs: Vec<(Term, u32)> = Vec::new();
    for term in terms {
        match slots.get(term) {
            Some(&slot) => freqs[slot].1 += 1,
            None => {
                slots.insert(term, freqs.len());
                freqs.push((term.clone(), 1));
            }
        }
    }
    freqs
}

pub fn standard(terms: &[Term]) -> WeightedQuery {
    terms.iter().map(|term| (term.clone(), 1.0)).collect()
}

/// Unseen terms (`df == 0`) have no idf and are left out.
pub fn ltn<S: TermStatsProvider + ?Sized>(terms: &[Term], stats: &S) -> WeightedQuery {
    let total_docs = stats.total_documents();

    term_frequencies(terms)
        .into_iter()
        .filter_map(|(term, freq)| {
            let Some(idf_weight) = idf(total_docs, stats.document_frequency(&term)) else {
                debug!(term = %term, "ltn: dropping unseen term");
                return None;
            };
            let tf_weight = 1.0 + (freq as f64).log10();
            Some((term, tf_weight * idf_weight))
        })
        .collect()
}

pub fn bnn(terms: &[Term]) -> WeightedQuery {
    term_frequencies(terms)
        .into_iter()
        .map(|(term, _)| (term, 1.0))
        .collect()
}

/// Unseen terms are left out before normalization. If every raw weight is
/// zero the clauses keep weight zero.
pub fn apc<S: TermStatsProvider + ?Sized>(terms: &[Term], stats: &S) -> WeightedQuery {
    let freqs = term_frequencies(terms);
    let Some(max_freq) = freqs.iter().map(|(_, freq)| *freq).max() else {
        return WeightedQuery::new();
    };
    let total_docs = stats.total_documents();

    let raw: Vec<(Term, f64)> = freqs
        .into_iter()
        .filter_map(|(term, freq)| {
            let Some(pidf) = prob_idf(total_docs, stats.document_frequency(&term)) else {
                debug!(term = %term, "apc: dropping unseen term");
                return None;
            };
            let augmented = 0.5 + 0.5 * freq as f64 / max_freq as f64;
            Some((term, augmented * pidf))
        })
        .collect();

    let norm = raw.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return raw.into_iter().collect();
    }
    raw.into_iter().map(|(term, w)| (term, w / norm)).collect()
}

/// Analyzes query text and weights it against one statistics source
pub struct QueryWeighter<'a> {
    analyzer: &'a Analyzer,
    stats: &'a (dyn TermStatsProvider + Sync),
}

impl<'a> QueryWeighter<'a> {
    pub fn new(analyzer: &'a Analyzer, stats: &'a (dyn TermStatsProvider + Sync)) -> Self {
        QueryWeighter { analyzer, stats }
    }

    pub fn weigh(&self, scheme: Scheme, text: &str) -> WeightedQuery {
        let terms = self.analyzer.terms(text);
        scheme.weigh(&terms, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::stats::StaticTermStats;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn terms(words: &[&str]) -> Vec<Term> {
        words.iter().map(|w| Term::new(w)).collect()
    }

    fn stats() -> StaticTermStats {
        StaticTermStats::new(10)
            .with_term("a", 2)
            .with_term("b", 8)
            .with_term("c", 1)
    }

    #[test]
    fn standard_keeps_duplicate_clauses() {
        let query = standard(&terms(&["a", "b", "a"]));
        assert_eq!(query.len(), 3);
        assert!(query.clauses().iter().all(|c| c.boost == 1.0));
        assert_eq!(query.weight(&Term::new("a")), Some(2.0));
    }

    #[test]
    fn bnn_deduplicates() {
        let query = bnn(&terms(&["a", "b", "a", "a"]));
        let names: Vec<&str> = query.clauses().iter().map(|c| c.term.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(query.clauses().iter().all(|c| c.boost == 1.0));
    }

    #[test]
    fn ltn_log_tf_times_idf() {
        let query = ltn(&terms(&["c", "a", "c"]), &stats());
        let c = query.weight(&Term::new("c")).unwrap();
        let a = query.weight(&Term::new("a")).unwrap();
        assert!((c - (1.0 + 2f64.log10()) * 10f64.log10()).abs() < EPS);
        assert!((a - 5f64.log10()).abs() < EPS);
    }

    #[test]
    fn ltn_weights_are_never_negative() {
        // Inconsistent statistics: df larger than the collection
        let stats = StaticTermStats::new(10).with_term("a", 40);
        let query = ltn(&terms(&["a", "a"]), &stats);
        assert_eq!(query.weight(&Term::new("a")), Some(0.0));
    }

    #[test]
    fn ltn_drops_unseen_terms() {
        let query = ltn(&terms(&["a", "zebra"]), &stats());
        assert_eq!(query.len(), 1);
        assert_eq!(query.weight(&Term::new("zebra")), None);
    }

    #[test]
    fn apc_scenario_a_a_b() {
        // maxFreq = 2, atf(a) = 1.0, atf(b) = 0.75
        // pidf(a) = log10(8 / 2), pidf(b) = max(0, log10(2 / 8)) = 0
        let query = apc(&terms(&["a", "a", "b"]), &stats());
        assert_eq!(query.len(), 2);
        assert!((query.weight(&Term::new("a")).unwrap() - 1.0).abs() < EPS);
        assert!(query.weight(&Term::new("b")).unwrap().abs() < EPS);
    }

    #[test]
    fn apc_normalizes_mixed_weights() {
        // atf(a) = 1.0, atf(c) = 0.75; pidf(a) = log10 4, pidf(c) = log10 9
        let query = apc(&terms(&["a", "a", "c"]), &stats());
        let ra = 4f64.log10();
        let rc = 0.75 * 9f64.log10();
        let norm = (ra * ra + rc * rc).sqrt();
        assert!((query.weight(&Term::new("a")).unwrap() - ra / norm).abs() < EPS);
        assert!((query.weight(&Term::new("c")).unwrap() - rc / norm).abs() < EPS);
    }

    #[test]
    fn apc_all_zero_weights_stay_zero() {
        let query = apc(&terms(&["b", "b"]), &stats());
        assert_eq!(query.len(), 1);
        assert_eq!(query.weight(&Term::new("b")), Some(0.0));
    }

    #[test]
    fn empty_queries_weigh_to_nothing() {
        for scheme in Scheme::ALL {
            assert!(scheme.weigh(&[], &stats()).is_empty(), "{}", scheme);
        }
    }

    #[test]
    fn weigher_analyzes_text_first() {
        let analyzer = Analyzer::simple();
        let stats = stats();
        let weigher = QueryWeighter::new(&analyzer, &stats);
        let query = weigher.weigh(Scheme::Apc, "A a B");
        assert!((query.weight(&Term::new("a")).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn scheme_names_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.name().parse::<Scheme>().unwrap(), scheme);
        }
        assert!("lnc".parse::<Scheme>().is_err());
    }

    proptest! {
        #[test]
        fn apc_weights_have_unit_norm_or_are_zero(
            words in proptest::collection::vec(0usize..6, 0..20),
            dfs in proptest::collection::vec(1u64..=50, 6),
        ) {
            let vocab = ["q0", "q1", "q2", "q3", "q4", "q5"];
            let mut stats = StaticTermStats::new(50);
            for (word, df) in vocab.iter().zip(&dfs) {
                stats = stats.with_term(word, *df);
            }
            let query_terms: Vec<Term> = words.iter().map(|&i| Term::new(vocab[i])).collect();

            let query = apc(&query_terms, &stats);
            let sum_sq: f64 = query.clauses().iter().map(|c| c.boost * c.boost).sum();
            prop_assert!(sum_sq.abs() < EPS || (sum_sq - 1.0).abs() < EPS, "sum of squares {}", sum_sq);
            prop_assert!(query.clauses().iter().all(|c| c.boost >= 0.0));
        }

        #[test]
        fn schemes_are_deterministic(words in proptest::collection::vec(0usize..4, 0..12)) {
            let vocab = ["a", "b", "c", "zebra"];
            let query_terms: Vec<Term> = words.iter().map(|&i| Term::new(vocab[i])).collect();
            for scheme in Scheme::ALL {
                prop_assert_eq!(scheme.weigh(&query_terms, &stats()), scheme.weigh(&query_terms, &stats()));
            }
        }
    }
}
