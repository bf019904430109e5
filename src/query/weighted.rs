use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::core::types::Term;

/// One boosted SHOULD clause of a disjunctive query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermClause {
    pub term: Term,
    pub boost: f64,
}

/// Disjunction of boosted term clauses.
///
/// A document matching any clause receives that clause's similarity score
/// multiplied by its boost; clause scores add up. Repeated clauses for the
/// same term are allowed and count once each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedQuery {
    clauses: Vec<TermClause>,
}

impl WeightedQuery {
    pub fn new() -> Self {
        WeightedQuery { clauses: Vec::new() }
    }

    pub fn with_clause(mut self, term: Term, boost: f64) -> Self {
        self.clauses.push(TermClause { term, boost });
        self
    }

    pub fn clauses(&self) -> &[TermClause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Total boost carried by `term`, or `None` if no clause names it.
    pub fn weight(&self, term: &Term) -> Option<f64> {
        self.clauses
            .iter()
            .filter(|c| &c.term == term)
            .map(|c| c.boost)
            .reduce(|a, b| a + b)
    }

    /// Term → total boost, in term order.
    pub fn weights(&self) -> BTreeMap<Term, f64> {
        let mut weights = BTreeMap::new();
        for clause in &self.clauses {
            *weights.entry(clause.term.clone()).or_insert(0.0) += clause.boost;
        }
        weights
    }
}

impl FromIterator<(Term, f64)> for WeightedQuery {
    fn from_iter<I: IntoIterator<Item = (Term, f64)>>(iter: I) -> Self {
        WeightedQuery {
            clauses: iter
                .into_iter()
                .map(|(term, boost)| TermClause { term, boost })
                .collect(),
        }
    }
}
