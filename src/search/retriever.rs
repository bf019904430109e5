use crate::core::error::Result;
use crate::core::types::DocId;
use crate::query::weighted::WeightedQuery;

/// Executes a weighted disjunction against an index.
///
/// Hits come back as `(document id, score)` pairs in no particular order;
/// ranking is the caller's job (see [`rank_results`]).
///
/// [`rank_results`]: crate::search::results::rank_results
pub trait Retriever: Send + Sync {
    fn search(&self, query: &WeightedQuery, limit: usize) -> Result<Vec<(DocId, f64)>>;
}
