use serde::{Serialize, Deserialize};

/// A single analyzed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub position: u32,     // Ordinal among emitted tokens
    pub offset: usize,     // Byte offset in original text
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        Token { text, position, offset }
    }
}
