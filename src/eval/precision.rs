use std::collections::{BTreeMap, HashSet};
use crate::core::types::{DocId, RankedLists, RelevanceTable};

fn is_relevant(grades: &BTreeMap<DocId, u32>, doc: &DocId) -> bool {
    grades.get(doc).is_some_and(|&grade| grade > 0)
}

fn relevant_count(grades: &BTreeMap<DocId, u32>) -> usize {
    grades.values().filter(|&&grade| grade > 0).count()
}

/// Retrieved documents with repeats removed, first occurrence wins.
fn distinct(retrieved: &[DocId]) -> impl Iterator<Item = &DocId> {
    let mut seen = HashSet::new();
    retrieved.iter().filter(move |doc| seen.insert(*doc))
}

/// Fraction of relevant documents among the first R retrieved, R being the
/// number of relevant documents. 0.0 when the query has none.
pub fn r_precision(grades: &BTreeMap<DocId, u32>, retrieved: Option<&[DocId]>) -> f64 {
    let relevant = relevant_count(grades);
    let (Some(retrieved), true) = (retrieved, relevant > 0) else {
        return 0.0;
    };
    let hits = distinct(retrieved)
        .take(relevant)
        .filter(|doc| is_relevant(grades, doc))
        .count();
    hits as f64 / relevant as f64
}

/// Mean of precision at each relevant hit, over all relevant documents.
pub fn average_precision(grades: &BTreeMap<DocId, u32>, retrieved: Option<&[DocId]>) -> f64 {
    let relevant = relevant_count(grades);
    let (Some(retrieved), true) = (retrieved, relevant > 0) else {
        return 0.0;
    };

    let mut hits = 0usize;
    let mut sum = 0.0;
    for (index, doc) in distinct(retrieved).enumerate() {
        if is_relevant(grades, doc) {
            hits += 1;
            sum += hits as f64 / (index + 1) as f64;
        }
    }
    sum / relevant as f64
}

fn mean_over_table<F>(table: &RelevanceTable, run: &RankedLists, metric: F) -> f64
where
    F: Fn(&BTreeMap<DocId, u32>, Option<&[DocId]>) -> f64,
{
    if table.is_empty() {
        return 0.0;
    }
    let total: f64 = table
        .iter()
        .map(|(query, grades)| metric(grades, run.get(query).map(Vec::as_slice)))
        .sum();
    total / table.len() as f64
}

pub fn mean_r_precision(table: &RelevanceTable, run: &RankedLists) -> f64 {
    mean_over_table(table, run, r_precision)
}

/// MAP over the queries of the relevance table.
pub fn mean_average_precision(table: &RelevanceTable, run: &RankedLists) -> f64 {
    mean_over_table(table, run, average_precision)
}
