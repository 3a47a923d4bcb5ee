//! Structure derivation over the extracted token stream.
//!
//! Title selection, heading grouping, and body assembly are independent
//! passes over the same token sequence; none mutates shared state, so they
//! can run in any order.

mod classify;
mod grouper;

pub use classify::{classify, Role, HEADING_MAX_SIZE, HEADING_MIN_SIZE, TITLE_MIN_SIZE};
pub use grouper::HeadingGrouper;

use crate::model::{DocumentOutline, Token};

/// Title used when no token qualifies as a title candidate.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Pick the document title: the first title-candidate in reading order.
///
/// This is a first-match policy. A later candidate never wins, even when
/// its font is larger.
pub fn select_title(tokens: &[Token]) -> String {
    tokens
        .iter()
        .find(|t| classify(t.font_size) == Role::Title)
        .map(|t| t.text.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Join every token's text with a single space, preserving reading order.
///
/// All roles are included, titles and headings too: the summarization
/// collaborator receives full-document context, not a body-only excerpt.
pub fn assemble_body(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the three structure passes and assemble the outline.
pub fn build_outline(tokens: &[Token]) -> DocumentOutline {
    let title = select_title(tokens);

    let mut grouper = HeadingGrouper::new();
    for token in tokens {
        if classify(token.font_size) == Role::Heading {
            grouper.push(&token.text);
        }
    }

    DocumentOutline {
        title,
        programs: grouper.finish(),
        body_text: assemble_body(tokens),
    }
}
