//! Token stream adapter: flattens per-page content-stream operations into
//! one ordered `(text, font size)` sequence for the whole document.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Token;

use super::backend::{ContentOp, PageRef, PdfSource, PdfValue};
use super::options::{ErrorMode, ExtractOptions};

/// Kerning adjustment (in 1/1000 text-space units) past which a `TJ`
/// positioning number is read as a word space.
const WORD_SPACE_THRESHOLD: f32 = 200.0;

/// Extracts a document's token stream in reading order.
///
/// Pages are visited in ascending order, items within a page in the order
/// the content stream reports them. Runs whose trimmed text is empty are
/// dropped: they carry no signal for title or heading detection and would
/// corrupt heading grouping with spurious gaps. There is no reordering, no
/// deduplication, and no cross-page merging beyond concatenation.
pub struct TokenExtractor<'a, S: PdfSource> {
    source: &'a S,
    options: ExtractOptions,
}

impl<'a, S: PdfSource + Sync> TokenExtractor<'a, S> {
    /// Create an extractor with default options.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            options: ExtractOptions::default(),
        }
    }

    /// Create an extractor with custom options.
    pub fn with_options(source: &'a S, options: ExtractOptions) -> Self {
        Self { source, options }
    }

    /// Extract every page's tokens into one flat sequence.
    pub fn extract(&self) -> Result<Vec<Token>> {
        let pages = self.source.pages();

        let per_page: Vec<Result<Vec<Token>>> = if self.options.parallel {
            pages.par_iter().map(|page| self.page_tokens(*page)).collect()
        } else {
            pages.iter().map(|page| self.page_tokens(*page)).collect()
        };

        let mut tokens = Vec::new();
        for (page, result) in pages.iter().zip(per_page) {
            match result {
                Ok(mut page_tokens) => tokens.append(&mut page_tokens),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("skipping page object {} {}: {}", page.0, page.1, e);
                }
            }
        }
        Ok(tokens)
    }

    fn page_tokens(&self, page: PageRef) -> Result<Vec<Token>> {
        let ops = self.source.page_operations(page)?;
        Ok(self.tokens_from_ops(page, &ops))
    }

    /// Walk one page's operations with a text cursor and collect tokens.
    fn tokens_from_ops(&self, page: PageRef, ops: &[ContentOp]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut cursor = TextCursor::default();

        for op in ops {
            match op.operator.as_str() {
                "BT" => cursor.begin_text(),
                "ET" => cursor.end_text(),
                "Tf" => cursor.set_font(op),
                "Tm" => cursor.set_matrix(op),
                "Tj" | "TJ" => {
                    if cursor.in_text {
                        let text = self.op_text(page, op, &cursor);
                        push_token(&mut tokens, text, cursor.effective_size());
                    }
                }
                "'" | "\"" => {
                    if cursor.in_text {
                        // The " operator carries word/char spacing first.
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(PdfValue::Str(bytes)) = op.operands.get(text_idx) {
                            let text = self.source.decode_text(page, &cursor.font_name, bytes);
                            push_token(&mut tokens, text, cursor.effective_size());
                        }
                    }
                }
                _ => {}
            }
        }

        tokens
    }

    /// Decode the text carried by a `Tj` or `TJ` operation.
    fn op_text(&self, page: PageRef, op: &ContentOp, cursor: &TextCursor) -> String {
        if op.operator == "TJ" {
            let Some(PdfValue::Array(items)) = op.operands.first() else {
                return String::new();
            };

            let mut combined = String::new();
            for item in items {
                match item {
                    PdfValue::Str(bytes) => {
                        combined.push_str(&self.source.decode_text(
                            page,
                            &cursor.font_name,
                            bytes,
                        ));
                    }
                    PdfValue::Integer(_) | PdfValue::Real(_) => {
                        // Negative adjustments advance the cursor; large
                        // ones stand in for word spaces.
                        let adjustment = -item.as_number().unwrap_or(0.0);
                        if adjustment > WORD_SPACE_THRESHOLD
                            && !combined.is_empty()
                            && !combined.ends_with(' ')
                        {
                            combined.push(' ');
                        }
                    }
                    _ => {}
                }
            }
            combined
        } else {
            match op.operands.first() {
                Some(PdfValue::Str(bytes)) => {
                    self.source.decode_text(page, &cursor.font_name, bytes)
                }
                _ => String::new(),
            }
        }
    }
}

fn push_token(tokens: &mut Vec<Token>, text: String, font_size: i32) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        tokens.push(Token::new(trimmed, font_size));
    }
}

/// Text state tracked across one page's content stream.
#[derive(Debug)]
struct TextCursor {
    in_text: bool,
    font_name: Vec<u8>,
    font_size: f32,
    scale: f32,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self {
            in_text: false,
            font_name: Vec::new(),
            font_size: 12.0,
            scale: 1.0,
        }
    }
}

impl TextCursor {
    fn begin_text(&mut self) {
        self.in_text = true;
        self.scale = 1.0;
    }

    fn end_text(&mut self) {
        self.in_text = false;
    }

    fn set_font(&mut self, op: &ContentOp) {
        if op.operands.len() >= 2 {
            if let PdfValue::Name(name) = &op.operands[0] {
                self.font_name = name.clone();
            }
            self.font_size = op.operands[1].as_number().unwrap_or(12.0);
        }
    }

    fn set_matrix(&mut self, op: &ContentOp) {
        if op.operands.len() >= 6 {
            let a = op.operands[0].as_number().unwrap_or(1.0);
            let c = op.operands[2].as_number().unwrap_or(0.0);
            self.scale = (a * a + c * c).sqrt();
        }
    }

    /// Rendered size: the `Tf` size scaled by the text matrix, rounded the
    /// way the classification thresholds expect.
    fn effective_size(&self) -> i32 {
        (self.font_size * self.scale).round() as i32
    }
}
