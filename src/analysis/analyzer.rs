use std::collections::HashMap;
use std::sync::Arc;
use rust_stemmers::Algorithm;
use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Term;

/// Text analysis pipeline: one tokenizer followed by filters in order
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: &str, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name: name.to_string(),
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        self.filters
            .iter()
            .fold(self.tokenizer.tokenize(text), |tokens, filter| filter.filter(tokens))
    }

    /// Analyzed terms in text order, duplicates kept.
    pub fn terms(&self, text: &str) -> Vec<Term> {
        self.analyze(text)
            .into_iter()
            .map(|token| Term::from(token.text))
            .collect()
    }

    /// Unicode words, lowercased, classic English stop words removed
    pub fn standard() -> Self {
        Analyzer::new("standard", Box::new(StandardTokenizer::default()))
            .add_filter(Box::new(LowercaseFilter))
            .add_filter(Box::new(StopWordFilter::english()))
    }

    /// `standard` plus Snowball English stemming
    pub fn english() -> Self {
        Analyzer::standard()
            .renamed("english")
            .add_filter(Box::new(StemmerFilter::new(Algorithm::English)))
    }

    /// Lowercasing only; every word is a term
    pub fn simple() -> Self {
        Analyzer::new("simple", Box::new(StandardTokenizer::default()))
            .add_filter(Box::new(LowercaseFilter))
    }

    fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

/// Named analyzers available to an evaluation session
pub struct AnalyzerRegistry {
    analyzers: HashMap<String, Arc<Analyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        let mut registry = AnalyzerRegistry {
            analyzers: HashMap::new(),
        };
        registry.register(Analyzer::standard());
        registry.register(Analyzer::english());
        registry.register(Analyzer::simple());
        registry
    }

    pub fn register(&mut self, analyzer: Analyzer) {
        self.analyzers.insert(analyzer.name.clone(), Arc::new(analyzer));
    }

    pub fn get(&self, name: &str) -> Result<Arc<Analyzer>> {
        self.analyzers.get(name).cloned().ok_or_else(|| Error {
            kind: ErrorKind::NotFound,
            context: format!("Analyzer '{}' not found", name),
        })
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
