pub mod core;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod query;
pub mod weighting;
pub mod search;
pub mod eval;
pub mod run;

/*
┌──────────────────────────────────────────────────────────────────────────────────────┐
│                              SMARTEVAL ARCHITECTURE                                  │
└──────────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── SEARCH SIDE ───────────────────────────────────────┐
│                                                                                      │
│  outlines.json ──► QueryLevel::{Page, Section} ──► Vec<QueryText>                    │
│                                                        │                             │
│                                                        ▼                             │
│  ┌────────────────────┐   terms    ┌─────────────────────────────────────────┐      │
│  │ Analyzer           │ ─────────► │ Scheme::{Standard, Ltn, Bnn, Apc}       │      │
│  │ • StandardTokenizer│            │ • weigh(&[Term], &dyn TermStatsProvider)│      │
│  │ • TokenFilter*     │            │ → WeightedQuery (boosted clauses)       │      │
│  └────────────────────┘            └─────────────────────────────────────────┘      │
│                                                        │                             │
│                                                        ▼                             │
│  ┌──────────────────────────────────────────────────────────────────────────┐       │
│  │ MemoryIndex (TermStatsProvider)  ──►  MemorySearcher (Retriever)         │       │
│  │ • PostingList per Term                • Similarity: Bm25 | Lnc | Bnn | Anc│       │
│  │ • DocStats per document               • Σ boost · score, top max_results │       │
│  └──────────────────────────────────────────────────────────────────────────┘       │
│                                                        │                             │
│                                                        ▼                             │
│  SearchSession::run_all ──► results_dir/<level>_<method>.run                         │
└──────────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── EVAL SIDE ─────────────────────────────────────────┐
│                                                                                      │
│  qrels ──► RelevanceTable ─┐                                                         │
│                            ├──► ndcg::mean_ndcg, precision::{MAP, R-precision}      │
│  run   ──► RankedLists ────┘                                                         │
│                                                                                      │
│  results_dir ──► RunComparator ──► group_key ──► reference (marker) per group        │
│                       │                                                              │
│                       └──► spearman::mean_spearman ──► "run & correlation"           │
└──────────────────────────────────────────────────────────────────────────────────────┘
*/
