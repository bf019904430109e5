use std::collections::BTreeMap;
use tracing::debug;
use crate::core::types::{DocId, RunRanking};

/// Paired ranks of the reference documents, reference order first
#[derive(Debug, Clone, PartialEq)]
pub struct RankPairs {
    pub reference: Vec<f64>,
    pub candidate: Vec<f64>,
    pub missing: usize,            // Reference documents the candidate did not retrieve
    pub max_squared_diff: f64,
}

impl RankPairs {
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn sum_squared_diff(&self) -> f64 {
        self.reference
            .iter()
            .zip(&self.candidate)
            .map(|(r, c)| (r - c).powi(2))
            .sum()
    }
}

/// Pair every reference document with its candidate rank.
///
/// Documents the candidate did not retrieve get `missing_rank` on the
/// candidate side while keeping their real reference rank, so each one
/// counts as a large displacement instead of disappearing from the sample.
pub fn pair_ranks(
    reference: &BTreeMap<DocId, i64>,
    candidate: &BTreeMap<DocId, i64>,
    missing_rank: i64,
) -> RankPairs {
    let mut ordered: Vec<(&DocId, i64)> = reference.iter().map(|(doc, &rank)| (doc, rank)).collect();
    ordered.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut pairs = RankPairs {
        reference: Vec::with_capacity(ordered.len()),
        candidate: Vec::with_capacity(ordered.len()),
        missing: 0,
        max_squared_diff: 0.0,
    };

    for (doc, reference_rank) in ordered {
        let candidate_rank = match candidate.get(doc) {
            Some(&rank) => rank,
            None => {
                pairs.missing += 1;
                missing_rank
            }
        };
        let squared = (reference_rank as f64 - candidate_rank as f64).powi(2);
        pairs.max_squared_diff = pairs.max_squared_diff.max(squared);
        pairs.reference.push(reference_rank as f64);
        pairs.candidate.push(candidate_rank as f64);
    }

    pairs
}

/// `1 - 6 Σd² / (n (n² - 1))`, clamped to [-1, 1].
///
/// Sentinel ranks can push the raw value below -1; the clamp maps any such
/// sample to full discordance. `None` when fewer than two documents are paired.
pub fn spearman(pairs: &RankPairs) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    if pairs.max_squared_diff == 0.0 {
        return Some(1.0);
    }

    let n = n as f64;
    let rho = 1.0 - 6.0 * pairs.sum_squared_diff() / (n * (n * n - 1.0));
    rho.is_finite().then(|| rho.clamp(-1.0, 1.0))
}

/// Rank correlation of one query's candidate ranking against the reference.
pub fn compute_spearman(
    reference: &BTreeMap<DocId, i64>,
    candidate: &BTreeMap<DocId, i64>,
    missing_rank: i64,
) -> Option<f64> {
    spearman(&pair_ranks(reference, candidate, missing_rank))
}

/// Mean correlation over the reference run's non-empty queries.
///
/// A query the candidate never answered pairs against an empty ranking.
/// Undefined per-query values are skipped; `None` if none are defined.
pub fn mean_spearman(reference: &RunRanking, candidate: &RunRanking, missing_rank: i64) -> Option<f64> {
    let empty = BTreeMap::new();
    let correlations: Vec<f64> = reference
        .iter()
        .filter(|(_, rankings)| !rankings.is_empty())
        .filter_map(|(query, rankings)| {
            let pairs = pair_ranks(rankings, candidate.get(query).unwrap_or(&empty), missing_rank);
            let rho = spearman(&pairs);
            debug!(
                query = %query,
                paired = pairs.len(),
                missing = pairs.missing,
                max_squared_diff = pairs.max_squared_diff,
                rho = ?rho,
                "spearman"
            );
            rho
        })
        .collect();

    if correlations.is_empty() {
        return None;
    }
    Some(correlations.iter().sum::<f64>() / correlations.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;
    const MISSING: i64 = -1;

    fn ranking(docs: &[(&str, i64)]) -> BTreeMap<DocId, i64> {
        docs.iter().map(|(d, r)| (d.to_string(), *r)).collect()
    }

    #[test]
    fn identical_rankings_agree_fully() {
        let reference = ranking(&[("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(compute_spearman(&reference, &reference, MISSING), Some(1.0));
    }

    #[test]
    fn reversed_ranking_is_minus_one() {
        let reference = ranking(&[("a", 1), ("b", 2), ("c", 3)]);
        let candidate = ranking(&[("a", 3), ("b", 2), ("c", 1)]);
        let rho = compute_spearman(&reference, &candidate, MISSING).unwrap();
        assert!((rho + 1.0).abs() < EPS);
    }

    #[test]
    fn partial_swap_uses_standard_formula() {
        let reference = ranking(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let candidate = ranking(&[("a", 2), ("b", 1), ("c", 3), ("d", 4)]);
        // Σd² = 2, n = 4
        let rho = compute_spearman(&reference, &candidate, MISSING).unwrap();
        assert!((rho - (1.0 - 12.0 / 60.0)).abs() < EPS);
    }

    #[test]
    fn candidate_missing_everything_is_full_discordance() {
        let reference = ranking(&[("a", 1), ("b", 2), ("c", 3)]);
        let pairs = pair_ranks(&reference, &BTreeMap::new(), MISSING);
        assert_eq!(pairs.missing, 3);
        assert_eq!(pairs.candidate, vec![-1.0, -1.0, -1.0]);
        assert_eq!(pairs.max_squared_diff, 16.0);
        assert_eq!(spearman(&pairs), Some(-1.0));
    }

    #[test]
    fn missing_document_lowers_correlation() {
        let reference = ranking(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let candidate = ranking(&[("a", 1), ("b", 2), ("c", 3)]);
        let rho = compute_spearman(&reference, &candidate, MISSING).unwrap();
        assert!(rho < 1.0);
    }

    #[test]
    fn extreme_ranks_do_not_overflow() {
        let reference = ranking(&[("a", i64::MAX), ("b", 2)]);
        let pairs = pair_ranks(&reference, &BTreeMap::new(), MISSING);
        assert!(pairs.max_squared_diff.is_finite());
        assert_eq!(spearman(&pairs), Some(-1.0));

        let candidate = ranking(&[("a", i64::MIN), ("b", 2)]);
        let rho = compute_spearman(&reference, &candidate, MISSING).unwrap();
        assert!((-1.0..=1.0).contains(&rho));
    }

    #[test]
    fn single_document_is_undefined() {
        let reference = ranking(&[("a", 1)]);
        assert_eq!(compute_spearman(&reference, &reference, MISSING), None);
    }

    #[test]
    fn mean_skips_undefined_queries() {
        let reference = RunRanking::from([
            ("q1".to_string(), ranking(&[("a", 1), ("b", 2)])),
            ("q2".to_string(), ranking(&[("x", 1)])),
            ("q3".to_string(), BTreeMap::new()),
        ]);
        let candidate = RunRanking::from([
            ("q1".to_string(), ranking(&[("a", 2), ("b", 1)])),
            ("q2".to_string(), ranking(&[("x", 1)])),
        ]);
        // q1 = -1, q2 undefined, q3 empty
        assert_eq!(mean_spearman(&reference, &candidate, MISSING), Some(-1.0));
    }

    #[test]
    fn mean_penalizes_unanswered_queries() {
        let reference = RunRanking::from([
            ("q1".to_string(), ranking(&[("a", 1), ("b", 2)])),
            ("q2".to_string(), ranking(&[("c", 1), ("d", 2)])),
        ]);
        let candidate = RunRanking::from([("q1".to_string(), ranking(&[("a", 1), ("b", 2)]))]);
        assert_eq!(mean_spearman(&reference, &candidate, MISSING), Some(0.0));
    }

    #[test]
    fn mean_without_defined_queries_is_none() {
        let reference = RunRanking::from([("q1".to_string(), ranking(&[("a", 1)]))]);
        assert_eq!(mean_spearman(&reference, &reference, MISSING), None);
    }

    proptest! {
        #[test]
        fn self_correlation_is_one(n in 2usize..40) {
            let reference: BTreeMap<DocId, i64> = (0..n).map(|i| (format!("d{}", i), i as i64 + 1)).collect();
            prop_assert_eq!(compute_spearman(&reference, &reference, MISSING), Some(1.0));
        }

        #[test]
        fn correlation_stays_in_range(
            n in 2usize..30,
            shuffle in proptest::collection::vec(any::<u32>(), 30),
            keep in proptest::collection::vec(any::<bool>(), 30),
        ) {
            let reference: BTreeMap<DocId, i64> = (0..n).map(|i| (format!("d{}", i), i as i64 + 1)).collect();
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by_key(|&i| shuffle[i]);
            let candidate: BTreeMap<DocId, i64> = order
                .iter()
                .enumerate()
                .filter(|(_, i)| keep[**i])
                .map(|(rank, i)| (format!("d{}", i), rank as i64 + 1))
                .collect();

            let rho = compute_spearman(&reference, &candidate, MISSING).unwrap();
            prop_assert!((-1.0..=1.0).contains(&rho));
        }
    }
}
