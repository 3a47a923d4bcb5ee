//! Token extraction from PDF documents.

mod backend;
mod options;
mod tokens;

pub use backend::{decode_text_simple, ContentOp, LopdfSource, PageRef, PdfSource, PdfValue};
pub use options::{ErrorMode, ExtractOptions};
pub use tokens::TokenExtractor;
