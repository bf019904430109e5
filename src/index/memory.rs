use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Term};
use crate::index::posting::{DocOrd, Posting, PostingList};
use crate::index::stats::TermStatsProvider;
use crate::query::weighted::WeightedQuery;
use crate::scoring::similarity::{CollectionStats, DocStats, Similarity};
use crate::search::retriever::Retriever;

/// In-memory inverted index over a paragraph corpus.
///
/// Documents are analyzed with the session analyzer; per-document norms for
/// the SMART similarities are computed at insertion time.
pub struct MemoryIndex {
    postings: HashMap<Term, PostingList>,
    doc_ids: Vec<DocId>,
    doc_stats: Vec<DocStats>,
    ordinals: HashMap<DocId, DocOrd>,
    total_tokens: u64,
    analyzer: Arc<Analyzer>,
}

impl MemoryIndex {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        MemoryIndex {
            postings: HashMap::new(),
            doc_ids: Vec::new(),
            doc_stats: Vec::new(),
            ordinals: HashMap::new(),
            total_tokens: 0,
            analyzer,
        }
    }

    pub fn from_documents<I>(analyzer: Arc<Analyzer>, documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DocId, String)>,
    {
        let mut index = MemoryIndex::new(analyzer);
        for (id, text) in documents {
            index.add_document(id, &text)?;
        }
        debug!(docs = index.doc_count(), terms = index.postings.len(), "built memory index");
        Ok(index)
    }

    pub fn add_document(&mut self, id: DocId, text: &str) -> Result<()> {
        if self.ordinals.contains_key(&id) {
            return Err(Error::new(ErrorKind::InvalidInput, format!("Duplicate document id '{}'", id)));
        }
        let doc = DocOrd::try_from(self.doc_ids.len())
            .map_err(|_| Error::new(ErrorKind::Internal, "Too many documents".to_string()))?;

        let mut term_freqs: HashMap<Term, u32> = HashMap::new();
        for term in self.analyzer.terms(text) {
            *term_freqs.entry(term).or_insert(0) += 1;
        }

        let stats = DocStats::from_term_freqs(term_freqs.values().copied());
        self.total_tokens += stats.length as u64;

        for (term, term_freq) in term_freqs {
            self.postings
                .entry(term)
                .or_default()
                .add_posting(Posting { doc, term_freq });
        }

        self.ordinals.insert(id.clone(), doc);
        self.doc_ids.push(id);
        self.doc_stats.push(stats);
        Ok(())
    }

    pub fn doc_count(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn analyzer(&self) -> &Arc<Analyzer> {
        &self.analyzer
    }

    pub fn postings(&self, term: &Term) -> Option<&PostingList> {
        self.postings.get(term)
    }

    pub fn collection_stats(&self) -> CollectionStats {
        let total_docs = self.doc_ids.len() as u64;
        let avg_doc_length = if total_docs > 0 {
            self.total_tokens as f64 / total_docs as f64
        } else {
            0.0
        };
        CollectionStats { total_docs, avg_doc_length }
    }

    /// Searcher that scores documents with `similarity`.
    pub fn searcher(&self, similarity: Box<dyn Similarity>) -> MemorySearcher<'_> {
        MemorySearcher {
            index: self,
            similarity,
            collection: self.collection_stats(),
        }
    }
}

impl TermStatsProvider for MemoryIndex {
    fn document_frequency(&self, term: &Term) -> u64 {
        self.postings.get(term).map_or(0, PostingList::doc_freq)
    }

    fn total_documents(&self) -> u64 {
        self.doc_ids.len() as u64
    }
}

pub struct MemorySearcher<'a> {
    index: &'a MemoryIndex,
    similarity: Box<dyn Similarity>,
    collection: CollectionStats,
}

impl MemorySearcher<'_> {
    pub fn similarity(&self) -> &dyn Similarity {
        self.similarity.as_ref()
    }
}

impl Retriever for MemorySearcher<'_> {
    /// Every document matching at least one clause, best `limit` by score.
    fn search(&self, query: &WeightedQuery, limit: usize) -> Result<Vec<(DocId, f64)>> {
        let mut scores: HashMap<DocOrd, f64> = HashMap::new();

        for clause in query.clauses() {
            let Some(list) = self.index.postings(&clause.term) else {
                continue;
            };
            let doc_freq = list.doc_freq();
            for posting in list.iter() {
                let stats = &self.index.doc_stats[posting.doc as usize];
                let score = self.similarity.score(posting.term_freq, doc_freq, stats, &self.collection);
                *scores.entry(posting.doc).or_insert(0.0) += clause.boost * score;
            }
        }

        let mut hits: Vec<(DocOrd, f64)> = scores
            .into_iter()
            .filter(|(_, score)| score.is_finite())
            .collect();
        // Deterministic: score desc, then insertion order.
        hits.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        hits.truncate(limit);

        Ok(hits
            .into_iter()
            .map(|(doc, score)| (self.index.doc_ids[doc as usize].clone(), score))
            .collect())
    }
}
