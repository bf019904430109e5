use serde::{Deserialize, Serialize};
use crate::core::types::DocId;

/// One retrieved document after ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRanking {
    pub doc_id: DocId,
    pub score: f64,
    pub rank: u32,     // 1 = best
}

/// Sort hits by descending score and assign ranks 1, 2, 3, ...
///
/// The sort is stable: equal scores keep retrieval order.
pub fn rank_results(hits: Vec<(DocId, f64)>) -> Vec<DocumentRanking> {
    let mut hits = hits;
    hits.sort_by(|a, b| b.1.total_cmp(&a.1));

    hits.into_iter()
        .enumerate()
        .map(|(index, (doc_id, score))| DocumentRanking {
            doc_id,
            score,
            rank: index as u32 + 1,
        })
        .collect()
}
