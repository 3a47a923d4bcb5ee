//! Outline-level types: numbered section entries, the per-document
//! extraction result, and the final response shape.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A numbered section entry grouped from heading tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramEntry {
    /// The digits preceding the marker period (`"3."` becomes `"3"`).
    pub number: String,

    /// Space-joined heading text following the marker.
    pub title: String,
}

impl ProgramEntry {
    /// Create a new entry.
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
        }
    }

    /// An entry qualifies for emission only when both fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.number.is_empty() && !self.title.is_empty()
    }
}

/// Structured outline derived from one document.
///
/// Built once per extraction request and not modified afterwards. Feeds
/// the summarization handoff and the caller's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title: the first title-candidate token, or `"Untitled"`.
    pub title: String,

    /// Numbered section entries, in the order their markers appeared.
    pub programs: Vec<ProgramEntry>,

    /// Every token's text joined with single spaces, in reading order.
    pub body_text: String,
}

impl DocumentOutline {
    /// Join all entry titles with `"; "` for the summarizer handoff.
    ///
    /// Entry numbers are not included.
    pub fn headings_joined(&self) -> String {
        self.programs
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Serialize the outline to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}

/// Final pipeline response: the outline plus the collaborator's summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brief {
    /// Document title.
    pub title: String,

    /// Numbered section entries.
    pub programs: Vec<ProgramEntry>,

    /// The collaborator's output, trimmed of surrounding whitespace.
    pub summary: String,
}

impl Brief {
    /// Assemble the response from an outline and a summary.
    pub fn new(outline: DocumentOutline, summary: impl Into<String>) -> Self {
        Self {
            title: outline.title,
            programs: outline.programs,
            summary: summary.into(),
        }
    }

    /// Serialize the brief to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}

/// Output format for JSON serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// Human-readable, indented output.
    Pretty,
    /// Single-line output.
    Compact,
}

fn to_json<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}
