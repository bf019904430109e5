use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Normalized token string, the unit of weighting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term(String);

impl Term {
    pub fn new(text: &str) -> Self {
        Term(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term(text.to_string())
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Term(text)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query identifier as it appears in qrels and run files.
pub type QueryId = String;

/// External document (paragraph) identifier.
pub type DocId = String;

/// Graded judgments: query → document → grade. Unlisted documents are grade 0.
pub type RelevanceTable = BTreeMap<QueryId, BTreeMap<DocId, u32>>;

/// Query → document → rank (1 = best), as read back from a run file.
pub type RunRanking = BTreeMap<QueryId, BTreeMap<DocId, i64>>;

/// Query → retrieved documents in run-file order.
pub type RankedLists = BTreeMap<QueryId, Vec<DocId>>;
