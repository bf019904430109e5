use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub ndcg_cutoff: usize,
    pub max_results: usize,              // Retriever cut-off per query
    pub analyzer: String,                // Name in the AnalyzerRegistry
    pub results_dir: PathBuf,
    pub reference_marker: String,        // Run name fragment of the comparison baseline
    pub missing_rank: i64,               // Spearman sentinel for unretrieved documents
    pub write_method_column: bool,

    pub bm25_k1: f64,
    pub bm25_b: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            ndcg_cutoff: 20,
            max_results: 100,
            analyzer: "standard".to_string(),
            results_dir: PathBuf::from("results"),
            reference_marker: "standard".to_string(),
            missing_rank: -1,
            write_method_column: true,

            bm25_k1: 1.2,
            bm25_b: 0.75,
        }
    }
}

impl EvalConfig {
    /// Load from a JSON file; absent keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: EvalConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ndcg_cutoff == 0 {
            return Err(Error::invalid_argument("ndcg_cutoff must be at least 1"));
        }
        if self.max_results == 0 {
            return Err(Error::invalid_argument("max_results must be at least 1"));
        }
        if self.reference_marker.is_empty() {
            return Err(Error::invalid_argument("reference_marker must not be empty"));
        }
        Ok(())
    }
}
