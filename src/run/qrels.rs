use std::path::Path;
use crate::core::error::{Error, Result};
use crate::core::types::RelevanceTable;
use crate::eval::ndcg::MAX_GRADE;
use crate::run::for_each_line;

/// Read TREC qrels: `<query> <iteration> <document> <grade>` per line.
pub fn read_qrels(path: &Path) -> Result<RelevanceTable> {
    let mut table = RelevanceTable::new();

    for_each_line(path, |line_no, line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(Error::parse_at(path, line_no, "expected `<query> <iter> <doc> <grade>`"));
        }
        let grade: u32 = fields[3]
            .parse()
            .map_err(|_| Error::parse_at(path, line_no, format!("invalid grade '{}'", fields[3])))?;
        if grade > MAX_GRADE {
            return Err(Error::parse_at(path, line_no, format!("grade {} exceeds {}", grade, MAX_GRADE)));
        }

        table
            .entry(fields[0].to_string())
            .or_default()
            .insert(fields[2].to_string(), grade);
        Ok(())
    })?;

    Ok(table)
}
