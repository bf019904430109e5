//! Ranking quality metrics and run-to-run comparison.
//!
//! Undefined per-query values are never averaged in as NaN:
//! - NDCG with no relevant documents for a query scores 0.0.
//! - A query absent from the evaluated run scores 0.0 (NDCG, MAP, R-precision).
//! - Spearman correlations that are undefined (fewer than two ranked
//!   documents) are left out of the cross-query mean.

pub mod comparator;
pub mod ndcg;
pub mod precision;
pub mod spearman;
