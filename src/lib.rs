//! # pdfbrief
//!
//! Document structure extraction and summarization handoff for PDF files.
//!
//! pdfbrief flattens a PDF's text into `(text, font size)` tokens, derives
//! a structured outline from them with a font-size heuristic — document
//! title, numbered section entries, full body text — and can delegate
//! summarization of that outline to an external text-in/text-out process.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfbrief::extract_file;
//!
//! fn main() -> pdfbrief::Result<()> {
//!     let outline = extract_file("document.pdf")?;
//!     println!("{}: {} sections", outline.title, outline.programs.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Summarization
//!
//! ```no_run
//! use pdfbrief::{summarize_file, Summarizer};
//!
//! let summarizer = Summarizer::new("python3").arg("ai/custom_summarizer.py");
//! let brief = summarize_file("document.pdf", &summarizer)?;
//! println!("{}", brief.summary);
//! # Ok::<(), pdfbrief::Error>(())
//! ```
//!
//! ## How classification works
//!
//! Roles are assigned from font size alone: text above 20 pt is a title
//! candidate, text in (12, 16] pt is a heading candidate, everything else
//! is body. The first title candidate in reading order names the document;
//! heading candidates are grouped into numbered entries under `"1."`-style
//! markers; the body blob keeps every token so the summarizer sees the
//! whole document.

pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod summarize;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Brief, DocumentOutline, JsonFormat, ProgramEntry, Token};
pub use outline::{
    assemble_body, build_outline, classify, select_title, HeadingGrouper, Role, DEFAULT_TITLE,
    HEADING_MAX_SIZE, HEADING_MIN_SIZE, TITLE_MIN_SIZE,
};
pub use parser::{
    ContentOp, ErrorMode, ExtractOptions, LopdfSource, PageRef, PdfSource, PdfValue,
    TokenExtractor,
};
pub use summarize::{BodyFile, Summarizer, DEFAULT_TIMEOUT};

use std::io::Read;
use std::path::Path;

/// Extract the token stream from a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfbrief::tokens_from_file;
///
/// let tokens = tokens_from_file("document.pdf").unwrap();
/// println!("{} text runs", tokens.len());
/// ```
pub fn tokens_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Token>> {
    let source = LopdfSource::open(path)?;
    TokenExtractor::new(&source).extract()
}

/// Extract the token stream from PDF bytes.
pub fn tokens_from_bytes(data: &[u8]) -> Result<Vec<Token>> {
    let source = LopdfSource::from_bytes(data)?;
    TokenExtractor::new(&source).extract()
}

/// Extract the token stream from a reader.
pub fn tokens_from_reader<R: Read>(reader: R) -> Result<Vec<Token>> {
    let source = LopdfSource::from_reader(reader)?;
    TokenExtractor::new(&source).extract()
}

/// Extract the structured outline from a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfbrief::extract_file;
///
/// let outline = extract_file("document.pdf").unwrap();
/// for entry in &outline.programs {
///     println!("{}. {}", entry.number, entry.title);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Ok(build_outline(&tokens_from_file(path)?))
}

/// Extract the structured outline from PDF bytes.
pub fn extract_bytes(data: &[u8]) -> Result<DocumentOutline> {
    Ok(build_outline(&tokens_from_bytes(data)?))
}

/// Run the full pipeline: extract an outline, then delegate to the
/// summarizer.
///
/// The pipeline returns a complete [`Brief`] or a complete failure. When
/// the collaborator fails, the already-computed outline is discarded
/// rather than surfaced partially.
pub fn summarize_file<P: AsRef<Path>>(path: P, summarizer: &Summarizer) -> Result<Brief> {
    let outline = extract_file(path)?;
    summarize_outline(outline, summarizer)
}

/// Summarize an already-extracted outline.
pub fn summarize_outline(outline: DocumentOutline, summarizer: &Summarizer) -> Result<Brief> {
    let summary = summarizer.summarize(&outline)?;
    Ok(Brief::new(outline, summary))
}

/// Builder for configuring extraction and summarization in one chain.
///
/// # Example
///
/// ```no_run
/// use pdfbrief::{Pdfbrief, Summarizer};
///
/// let brief = Pdfbrief::new()
///     .lenient()
///     .with_summarizer(Summarizer::new("python3").arg("summarizer.py"))
///     .run("document.pdf")?;
/// # Ok::<(), pdfbrief::Error>(())
/// ```
pub struct Pdfbrief {
    extract_options: ExtractOptions,
    summarizer: Option<Summarizer>,
}

impl Pdfbrief {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            summarizer: None,
        }
    }

    /// Skip undecodable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Disable parallel page extraction.
    pub fn sequential(mut self) -> Self {
        self.extract_options = self.extract_options.sequential();
        self
    }

    /// Configure the summarization collaborator.
    pub fn with_summarizer(mut self, summarizer: Summarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Extract the outline only.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let source = LopdfSource::open(path)?;
        let tokens =
            TokenExtractor::with_options(&source, self.extract_options.clone()).extract()?;
        Ok(build_outline(&tokens))
    }

    /// Extract the outline from bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<DocumentOutline> {
        let source = LopdfSource::from_bytes(data)?;
        let tokens =
            TokenExtractor::with_options(&source, self.extract_options.clone()).extract()?;
        Ok(build_outline(&tokens))
    }

    /// Run the full pipeline. Requires a configured summarizer.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<Brief> {
        let outline = self.extract(path)?;
        let summarizer = self
            .summarizer
            .as_ref()
            .ok_or_else(|| Error::Summarization("no summarizer configured".to_string()))?;
        summarize_outline(outline, summarizer)
    }
}

impl Default for Pdfbrief {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = Pdfbrief::new();
        assert_eq!(builder.extract_options.error_mode, ErrorMode::Strict);
        assert!(builder.extract_options.parallel);
        assert!(builder.summarizer.is_none());
    }

    #[test]
    fn test_builder_chained() {
        let builder = Pdfbrief::new()
            .lenient()
            .sequential()
            .with_summarizer(Summarizer::new("true"));

        assert_eq!(builder.extract_options.error_mode, ErrorMode::Lenient);
        assert!(!builder.extract_options.parallel);
        assert!(builder.summarizer.is_some());
    }

    #[test]
    fn test_extract_bytes_rejects_garbage() {
        let result = extract_bytes(b"not a pdf at all");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_run_fails_on_missing_file() {
        let result = Pdfbrief::new().run("definitely-missing.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
