use std::fs;
use std::path::PathBuf;
use rayon::prelude::*;
use tracing::{debug, info};
use crate::analysis::analyzer::Analyzer;
use crate::core::config::EvalConfig;
use crate::core::error::Result;
use crate::core::types::QueryId;
use crate::index::memory::MemoryIndex;
use crate::index::stats::TermStatsProvider;
use crate::run::outline::Page;
use crate::run::runfile::write_run;
use crate::scoring::similarity::SimilarityKind;
use crate::search::results::{rank_results, DocumentRanking};
use crate::search::retriever::Retriever;
use crate::weighting::{QueryWeighter, Scheme};

/// One query to run: identifier and free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText {
    pub id: QueryId,
    pub text: String,
}

/// Rankings for every query of one run, in query order
pub type RunResults = Vec<(QueryId, Vec<DocumentRanking>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryLevel {
    Page,     // One query per outline page
    Section,  // Every section heading plus the page itself
}

impl QueryLevel {
    pub const ALL: [QueryLevel; 2] = [QueryLevel::Page, QueryLevel::Section];

    pub fn name(self) -> &'static str {
        match self {
            QueryLevel::Page => "page",
            QueryLevel::Section => "section",
        }
    }

    pub fn queries(self, pages: &[Page]) -> Vec<QueryText> {
        match self {
            QueryLevel::Page => pages.iter().map(Page::page_query).collect(),
            QueryLevel::Section => pages.iter().flat_map(Page::section_queries).collect(),
        }
    }
}

/// A query weighting scheme paired with its document-side similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method {
    pub scheme: Scheme,
    pub similarity: SimilarityKind,
    pub label: &'static str,      // Written in the method column of run lines
    pub file_stem: &'static str,
}

pub const METHODS: [Method; 4] = [
    Method { scheme: Scheme::Standard, similarity: SimilarityKind::Bm25, label: "standard", file_stem: "standard" },
    Method { scheme: Scheme::Ltn, similarity: SimilarityKind::Lnc, label: "lnc.ltn", file_stem: "lnc_ltn" },
    Method { scheme: Scheme::Bnn, similarity: SimilarityKind::Bnn, label: "bnn.bnn", file_stem: "bnn_bnn" },
    Method { scheme: Scheme::Apc, similarity: SimilarityKind::Anc, label: "anc.apc", file_stem: "anc_apc" },
];

/// Weight, retrieve and rank every query.
///
/// Queries are processed on the rayon pool; results keep the input order.
pub fn run_queries(
    queries: &[QueryText],
    scheme: Scheme,
    analyzer: &Analyzer,
    stats: &(dyn TermStatsProvider + Sync),
    retriever: &dyn Retriever,
    limit: usize,
) -> Result<RunResults> {
    let weighter = QueryWeighter::new(analyzer, stats);
    queries
        .par_iter()
        .map(|query| {
            let weighted = weighter.weigh(scheme, &query.text);
            let hits = retriever.search(&weighted, limit)?;
            debug!(query = %query.id, clauses = weighted.len(), hits = hits.len(), "ran query");
            Ok((query.id.clone(), rank_results(hits)))
        })
        .collect()
}

/// Produces the run files of every method at every query level
pub struct SearchSession<'a> {
    index: &'a MemoryIndex,
    config: &'a EvalConfig,
}

impl<'a> SearchSession<'a> {
    pub fn new(index: &'a MemoryIndex, config: &'a EvalConfig) -> Self {
        SearchSession { index, config }
    }

    pub fn run_method(&self, method: &Method, queries: &[QueryText]) -> Result<RunResults> {
        let searcher = self.index.searcher(method.similarity.build(self.config));
        debug!(scheme = %method.scheme, similarity = searcher.similarity().name(), "running method");
        run_queries(
            queries,
            method.scheme,
            self.index.analyzer(),
            self.index,
            &searcher,
            self.config.max_results,
        )
    }

    /// Write `<level>_<method>.run` for all levels and methods; returns the paths written.
    pub fn run_all(&self, pages: &[Page]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.config.results_dir)?;
        let mut written = Vec::new();

        for level in QueryLevel::ALL {
            let queries = level.queries(pages);
            for method in &METHODS {
                let results = self.run_method(method, &queries)?;
                let path = self
                    .config
                    .results_dir
                    .join(format!("{}_{}.run", level.name(), method.file_stem));
                let tag = self.config.write_method_column.then_some(method.label);
                write_run(&path, tag, &results)?;

                info!(
                    run = %path.display(),
                    queries = queries.len(),
                    method = method.label,
                    "wrote run file"
                );
                written.push(path);
            }
        }

        Ok(written)
    }
}
