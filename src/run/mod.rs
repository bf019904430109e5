//! File formats at the edge of an evaluation session.

pub mod corpus;
pub mod outline;
pub mod qrels;
pub mod runfile;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::core::error::{Error, ErrorKind, Result};

/// Feed every non-blank line of `path` to `visit` with its 1-based number.
pub(crate) fn for_each_line<F>(path: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::Io, format!("{}: {}", path.display(), e))
    })?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        visit(index + 1, trimmed)?;
    }
    Ok(())
}
