use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, QueryId, RankedLists, RunRanking};
use crate::run::for_each_line;
use crate::search::runner::RunResults;

/// One parsed run line: `<query> Q0 <doc> <rank> [<score> [<method>]]`
#[derive(Debug, Clone, PartialEq)]
pub struct RunLine {
    pub query: QueryId,
    pub doc_id: DocId,
    pub rank: i64,
    pub score: Option<f64>,
    pub method: Option<String>,
}

impl RunLine {
    fn parse(path: &Path, line_no: usize, line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(Error::parse_at(path, line_no, "expected `<query> Q0 <doc> <rank> <score>`"));
        }
        let rank: i64 = fields[3]
            .parse()
            .map_err(|_| Error::parse_at(path, line_no, format!("invalid rank '{}'", fields[3])))?;
        if rank < 1 {
            return Err(Error::parse_at(path, line_no, "rank must be >= 1"));
        }
        let score = fields
            .get(4)
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|_| Error::parse_at(path, line_no, format!("invalid score '{}'", raw)))
            })
            .transpose()?;

        Ok(RunLine {
            query: fields[0].to_string(),
            doc_id: fields[2].to_string(),
            rank,
            score,
            method: fields.get(5).map(|m| m.to_string()),
        })
    }
}

pub fn read_run_lines(path: &Path) -> Result<Vec<RunLine>> {
    let mut lines = Vec::new();
    for_each_line(path, |line_no, line| {
        lines.push(RunLine::parse(path, line_no, line)?);
        Ok(())
    })?;
    Ok(lines)
}

/// Retrieved documents per query, in file order.
pub fn read_ranked_lists(path: &Path) -> Result<RankedLists> {
    let mut lists = RankedLists::new();
    for line in read_run_lines(path)? {
        lists.entry(line.query).or_default().push(line.doc_id);
    }
    Ok(lists)
}

/// Document → rank per query. A repeated document keeps its last rank.
pub fn read_rank_table(path: &Path) -> Result<RunRanking> {
    let mut table = RunRanking::new();
    for line in read_run_lines(path)? {
        table.entry(line.query).or_default().insert(line.doc_id, line.rank);
    }
    Ok(table)
}

/// Write rankings as `<query> Q0 <doc> <rank> <score>[ <method>]` lines.
pub fn write_run(path: &Path, method: Option<&str>, results: &RunResults) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    for (query, rankings) in results {
        for ranking in rankings {
            write!(out, "{} Q0 {} {} {}", query, ranking.doc_id, ranking.rank, ranking.score)?;
            if let Some(method) = method {
                write!(out, " {}", method)?;
            }
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
