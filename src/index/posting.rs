/// Ordinal of a document inside one in-memory index
pub type DocOrd = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc: DocOrd,
    pub term_freq: u32,       // Term frequency in document
}

/// Posting list for a term, sorted by document ordinal
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    pub postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    /// Insert or replace the posting for `posting.doc`.
    pub fn add_posting(&mut self, posting: Posting) {
        match self.postings.binary_search_by_key(&posting.doc, |p| p.doc) {
            Ok(pos) => self.postings[pos] = posting,
            Err(pos) => self.postings.insert(pos, posting),
        }
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn doc_freq(&self) -> u64 {
        self.postings.len() as u64
    }

    pub fn total_freq(&self) -> u64 {
        self.postings.iter().map(|p| p.term_freq as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.postings.iter()
    }
}
