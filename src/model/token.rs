//! Extracted text tokens.

use serde::{Deserialize, Serialize};

/// A unit of extracted document text paired with its rendered font size.
///
/// Tokens are produced in reading order: page 1's first item through the
/// last page's last item. The text is trimmed and never empty; items whose
/// trimmed text would be empty are dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The trimmed text content.
    pub text: String,

    /// Rendered font size in points, rounded to the nearest integer.
    pub font_size: i32,
}

impl Token {
    /// Create a new token.
    pub fn new(text: impl Into<String>, font_size: i32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_new() {
        let token = Token::new("Introduction", 14);
        assert_eq!(token.text, "Introduction");
        assert_eq!(token.font_size, 14);
    }
}
