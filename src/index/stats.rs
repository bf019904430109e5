use std::collections::HashMap;
use crate::core::types::Term;

/// Corpus statistics consumed by the query weighting schemes
pub trait TermStatsProvider {
    /// Number of documents containing `term`; 0 when unseen.
    fn document_frequency(&self, term: &Term) -> u64;

    fn total_documents(&self) -> u64;
}

impl<T: TermStatsProvider + ?Sized> TermStatsProvider for &T {
    fn document_frequency(&self, term: &Term) -> u64 {
        (**self).document_frequency(term)
    }

    fn total_documents(&self) -> u64 {
        (**self).total_documents()
    }
}

/// Fixed table of statistics, for offline weighting without an index
#[derive(Debug, Clone, Default)]
pub struct StaticTermStats {
    pub total_docs: u64,
    pub doc_freqs: HashMap<Term, u64>,
}

impl StaticTermStats {
    pub fn new(total_docs: u64) -> Self {
        StaticTermStats { total_docs, doc_freqs: HashMap::new() }
    }

    pub fn with_term(mut self, term: &str, doc_freq: u64) -> Self {
        self.doc_freqs.insert(Term::new(term), doc_freq);
        self
    }
}

impl TermStatsProvider for StaticTermStats {
    fn document_frequency(&self, term: &Term) -> u64 {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    fn total_documents(&self) -> u64 {
        self.total_docs
    }
}
