use std::collections::BTreeMap;
use crate::core::types::{DocId, QueryId, RankedLists, RelevanceTable};

pub const DEFAULT_CUTOFF: usize = 20;

/// Largest relevance grade accepted from judgment files.
pub const MAX_GRADE: u32 = 64;

/// `(2^grade - 1) / log2(1 + position)`, position starting at 1.
pub fn gain(grade: u32, position: usize) -> f64 {
    let numerator = 2f64.powi(grade.min(i32::MAX as u32) as i32) - 1.0;
    numerator / (1.0 + position as f64).log2()
}

/// DCG of the best possible ordering of the judged documents.
pub fn ideal_dcg(grades: &BTreeMap<DocId, u32>, cutoff: usize) -> f64 {
    let mut sorted: Vec<u32> = grades.values().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
        .into_iter()
        .take(cutoff)
        .enumerate()
        .map(|(index, grade)| gain(grade, index + 1))
        .sum()
}

/// DCG of the first `cutoff` retrieved documents; unjudged documents are grade 0.
pub fn dcg(retrieved: &[DocId], grades: &BTreeMap<DocId, u32>, cutoff: usize) -> f64 {
    retrieved
        .iter()
        .take(cutoff)
        .enumerate()
        .map(|(index, doc)| gain(grades.get(doc).copied().unwrap_or(0), index + 1))
        .sum()
}

/// NDCG for one query. `None` retrieval, zero ideal gain and a non-finite
/// ratio all score 0.0.
pub fn query_ndcg(grades: &BTreeMap<DocId, u32>, retrieved: Option<&[DocId]>, cutoff: usize) -> f64 {
    let Some(retrieved) = retrieved else {
        return 0.0;
    };
    let ideal = ideal_dcg(grades, cutoff);
    if ideal == 0.0 {
        return 0.0;
    }
    let ndcg = dcg(retrieved, grades, cutoff) / ideal;
    if ndcg.is_finite() { ndcg } else { 0.0 }
}

/// NDCG for every query of the relevance table.
pub fn ndcg_per_query(table: &RelevanceTable, run: &RankedLists, cutoff: usize) -> BTreeMap<QueryId, f64> {
    table
        .iter()
        .map(|(query, grades)| {
            let retrieved = run.get(query).map(Vec::as_slice);
            (query.clone(), query_ndcg(grades, retrieved, cutoff))
        })
        .collect()
}

/// Mean NDCG@cutoff over the queries of the relevance table; 0.0 for an empty table.
pub fn mean_ndcg(table: &RelevanceTable, run: &RankedLists, cutoff: usize) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let per_query = ndcg_per_query(table, run, cutoff);
    per_query.values().sum::<f64>() / per_query.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    fn table() -> RelevanceTable {
        let grades = BTreeMap::from([
            ("d1".to_string(), 2),
            ("d2".to_string(), 1),
            ("d3".to_string(), 0),
        ]);
        RelevanceTable::from([("q1".to_string(), grades)])
    }

    fn run(docs: &[&str]) -> RankedLists {
        RankedLists::from([("q1".to_string(), docs.iter().map(|d| d.to_string()).collect())])
    }

    #[test]
    fn gain_values() {
        assert!((gain(2, 1) - 3.0).abs() < EPS);
        assert!((gain(1, 3) - 0.5).abs() < EPS);
        assert_eq!(gain(0, 1), 0.0);
    }

    #[test]
    fn perfect_order_scores_one() {
        let score = mean_ndcg(&table(), &run(&["d1", "d2", "d3"]), DEFAULT_CUTOFF);
        assert!((score - 1.0).abs() < EPS);
    }

    #[test]
    fn reversed_order_matches_gain_formula() {
        let ideal = gain(2, 1) + gain(1, 2);
        let actual = gain(0, 1) + gain(1, 2) + gain(2, 3);
        let score = mean_ndcg(&table(), &run(&["d3", "d2", "d1"]), DEFAULT_CUTOFF);
        assert!((score - actual / ideal).abs() < EPS);
        assert!(score < 1.0);
    }

    #[test]
    fn empty_retrieval_scores_zero() {
        assert_eq!(mean_ndcg(&table(), &run(&[]), DEFAULT_CUTOFF), 0.0);
    }

    #[test]
    fn missing_query_counts_as_zero() {
        let mut table = table();
        table.insert("q2".to_string(), BTreeMap::from([("d9".to_string(), 1)]));
        let score = mean_ndcg(&table, &run(&["d1", "d2"]), DEFAULT_CUTOFF);
        assert!((score - 0.5).abs() < EPS);
    }

    #[test]
    fn query_without_relevant_documents_scores_zero() {
        let table = RelevanceTable::from([(
            "q1".to_string(),
            BTreeMap::from([("d1".to_string(), 0)]),
        )]);
        let score = mean_ndcg(&table, &run(&["d1"]), DEFAULT_CUTOFF);
        assert_eq!(score, 0.0);
        assert!(score.is_finite());
    }

    #[test]
    fn cutoff_truncates_both_sides() {
        // d1 sits past the cutoff in the retrieved list
        let score = mean_ndcg(&table(), &run(&["d3", "d1"]), 1);
        assert_eq!(score, 0.0);
        let score = mean_ndcg(&table(), &run(&["d1", "d3"]), 1);
        assert!((score - 1.0).abs() < EPS);
    }

    #[test]
    fn overflowing_gains_never_reach_the_mean() {
        let table = RelevanceTable::from([(
            "q1".to_string(),
            BTreeMap::from([("d1".to_string(), 1100), ("d2".to_string(), 1)]),
        )]);
        let score = mean_ndcg(&table, &run(&["d1", "d2"]), DEFAULT_CUTOFF);
        assert!(score.is_finite(), "{}", score);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn largest_accepted_grade_stays_finite() {
        let table = RelevanceTable::from([(
            "q1".to_string(),
            BTreeMap::from([("d1".to_string(), MAX_GRADE), ("d2".to_string(), 1)]),
        )]);
        let score = mean_ndcg(&table, &run(&["d1", "d2"]), DEFAULT_CUTOFF);
        assert!((score - 1.0).abs() < EPS);
    }

    #[test]
    fn empty_table_is_zero() {
        assert_eq!(mean_ndcg(&RelevanceTable::new(), &run(&["d1"]), DEFAULT_CUTOFF), 0.0);
    }

    proptest! {
        #[test]
        fn ndcg_is_bounded_and_ideal_order_is_perfect(
            grades in proptest::collection::vec(0u32..4, 1..15),
            order in proptest::collection::vec(0usize..15, 0..20),
            cutoff in 1usize..25,
        ) {
            let judged: BTreeMap<DocId, u32> = grades
                .iter()
                .enumerate()
                .map(|(i, g)| (format!("d{}", i), *g))
                .collect();
            let retrieved: Vec<DocId> = order.iter().map(|i| format!("d{}", i)).collect();
            let mut seen = std::collections::HashSet::new();
            let retrieved: Vec<DocId> = retrieved.into_iter().filter(|d| seen.insert(d.clone())).collect();

            let score = query_ndcg(&judged, Some(retrieved.as_slice()), cutoff);
            prop_assert!((0.0..=1.0 + 1e-9).contains(&score), "score {}", score);

            let mut ideal: Vec<(DocId, u32)> = judged.clone().into_iter().collect();
            ideal.sort_by(|a, b| b.1.cmp(&a.1));
            let ideal: Vec<DocId> = ideal.into_iter().map(|(d, _)| d).collect();
            let perfect = query_ndcg(&judged, Some(ideal.as_slice()), cutoff);
            if grades.iter().any(|&g| g > 0) {
                prop_assert!((perfect - 1.0).abs() < 1e-9);
            } else {
                prop_assert_eq!(perfect, 0.0);
            }
        }
    }
}
