use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use crate::core::config::EvalConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::RunRanking;
use crate::eval::spearman::mean_spearman;
use crate::run::runfile::read_rank_table;

/// A run file loaded for comparison, named by its file stem
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRun {
    pub name: String,
    pub ranking: RunRanking,
}

/// Mean correlation of one run against its group's reference
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub group: String,
    pub reference: String,
    pub run: String,
    pub correlation: f64,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} & {}", self.run, self.correlation)
    }
}

/// Group key of a run name: everything before the first underscore.
pub fn group_key(name: &str) -> &str {
    name.split_once('_').map_or(name, |(key, _)| key)
}

pub struct RunComparator {
    reference_marker: String,
    missing_rank: i64,
}

impl RunComparator {
    pub fn new(config: &EvalConfig) -> Self {
        RunComparator {
            reference_marker: config.reference_marker.clone(),
            missing_rank: config.missing_rank,
        }
    }

    /// Read every visible file of `dir` as a run, sorted by name.
    pub fn load_runs(&self, dir: &Path) -> Result<Vec<NamedRun>> {
        let entries = fs::read_dir(dir).map_err(|e| {
            Error::new(ErrorKind::Io, format!("{}: {}", dir.display(), e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_none_or(|name| name.starts_with('.'));
            if path.is_file() && !hidden {
                paths.push(path);
            }
        }
        paths.sort();

        let mut runs = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let ranking = read_rank_table(&path)?;
            debug!(run = name, queries = ranking.len(), "loaded run");
            runs.push(NamedRun { name: name.to_string(), ranking });
        }
        Ok(runs)
    }

    /// Correlate every run with the reference run of its group.
    ///
    /// Runs carrying the reference marker are never candidates. Groups
    /// without a reference are skipped with a warning, as are runs whose
    /// mean correlation is undefined.
    pub fn compare(&self, runs: &[NamedRun]) -> Vec<Comparison> {
        let mut groups: BTreeMap<&str, Vec<&NamedRun>> = BTreeMap::new();
        for run in runs {
            groups.entry(group_key(&run.name)).or_default().push(run);
        }

        let mut comparisons = Vec::new();
        for (group, members) in groups {
            let Some(reference) = members
                .iter()
                .find(|run| run.name.contains(&self.reference_marker))
            else {
                warn!(group, marker = %self.reference_marker, "no reference run in group, skipping");
                continue;
            };

            let candidates = members
                .iter()
                .filter(|run| !run.name.contains(&self.reference_marker));
            for run in candidates {
                match mean_spearman(&reference.ranking, &run.ranking, self.missing_rank) {
                    Some(correlation) => comparisons.push(Comparison {
                        group: group.to_string(),
                        reference: reference.name.clone(),
                        run: run.name.clone(),
                        correlation,
                    }),
                    None => warn!(run = %run.name, reference = %reference.name, "correlation undefined for every query"),
                }
            }
        }
        comparisons
    }

    pub fn compare_dir(&self, dir: &Path) -> Result<Vec<Comparison>> {
        let runs = self.load_runs(dir)?;
        info!(dir = %dir.display(), runs = runs.len(), "comparing runs");
        Ok(self.compare(&runs))
    }
}
