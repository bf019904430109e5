use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::search::runner::QueryText;

/// A page outline: the page title and its nested section headings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub page_id: String,
    pub page_name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading_id: String,
    pub heading: String,
    #[serde(default)]
    pub children: Vec<Section>,
}

impl Page {
    pub fn page_query(&self) -> QueryText {
        QueryText {
            id: self.page_id.clone(),
            text: self.page_name.clone(),
        }
    }

    /// Every heading in pre-order, followed by the page itself.
    pub fn section_queries(&self) -> Vec<QueryText> {
        let mut queries = Vec::new();
        let mut stack: Vec<&Section> = self.sections.iter().rev().collect();
        while let Some(section) = stack.pop() {
            queries.push(QueryText {
                id: section.heading_id.clone(),
                text: section.heading.clone(),
            });
            stack.extend(section.children.iter().rev());
        }
        queries.push(self.page_query());
        queries
    }
}

/// Read a JSON array of page outlines.
pub fn read_outlines(path: &Path) -> Result<Vec<Page>> {
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::Io, format!("{}: {}", path.display(), e))
    })?;
    let pages: Vec<Page> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        Error::new(ErrorKind::Parse, format!("{}: {}", path.display(), e))
    })?;
    Ok(pages)
}
