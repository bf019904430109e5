//! Query-side term weighting in SMART notation.
//!
//! Each [`Scheme`] turns analyzed query terms into a [`WeightedQuery`]
//! using corpus statistics from a [`TermStatsProvider`]. Weighting never
//! runs a search; the resulting clauses are handed to a retriever.
//!
//! [`WeightedQuery`]: crate::query::weighted::WeightedQuery
//! [`TermStatsProvider`]: crate::index::stats::TermStatsProvider

pub mod idf;
pub mod scheme;

pub use scheme::{QueryWeighter, Scheme};
