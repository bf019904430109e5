use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};
use crate::core::types::DocId;
use crate::run::for_each_line;

/// One retrievable unit of the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: DocId,
    pub text: String,
}

/// Read a JSON-lines corpus, one paragraph object per line.
pub fn read_corpus(path: &Path) -> Result<Vec<Paragraph>> {
    let mut paragraphs = Vec::new();
    for_each_line(path, |line_no, line| {
        let paragraph: Paragraph = serde_json::from_str(line)
            .map_err(|e| Error::parse_at(path, line_no, e))?;
        paragraphs.push(paragraph);
        Ok(())
    })?;
    Ok(paragraphs)
}
