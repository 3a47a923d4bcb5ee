//! PDF source abstraction.
//!
//! Isolates the concrete PDF library (lopdf) behind the small surface the
//! token extractor needs: ascending page enumeration, content-stream
//! operations, and font-aware text decoding.

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageRef = (u32, u16);

/// A value from a content-stream operand.
#[derive(Debug, Clone)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric view of an operand, if it has one.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single content-stream operation.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

/// Access to a PDF document at the extraction-collaborator boundary.
///
/// Implementations enumerate pages in ascending page order and decode text
/// bytes with the page's font encoding where one is available.
pub trait PdfSource {
    /// Pages in ascending page-number order.
    fn pages(&self) -> Vec<PageRef>;

    /// Decoded content-stream operations for one page.
    fn page_operations(&self, page: PageRef) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the named font's encoding on the
    /// given page, falling back to [`decode_text_simple`].
    fn decode_text(&self, page: PageRef, font_name: &[u8], bytes: &[u8]) -> String;
}

/// Text decoding fallback when no font encoding is available:
/// UTF-16BE with BOM, then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

// ---------------------------------------------------------------------------
// LopdfSource — concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// PDF magic bytes every input must start with.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Concrete [`PdfSource`] backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
}

impl LopdfSource {
    /// Load from a file path.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    ///
    /// Input without the `%PDF-` magic is rejected up front, so obviously
    /// wrong files fail as a format error rather than a parse error.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !data.starts_with(PDF_MAGIC) {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Ok(Self { doc })
    }

    /// Load from a reader.
    pub fn from_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }
}

impl PdfSource for LopdfSource {
    fn pages(&self) -> Vec<PageRef> {
        // get_pages is keyed by page number, so values come out ascending.
        self.doc.get_pages().into_values().collect()
    }

    fn page_operations(&self, page: PageRef) -> Result<Vec<ContentOp>> {
        let content = self
            .doc
            .get_page_content(page)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        let decoded = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        Ok(decoded
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_operand).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageRef, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page) {
            if let Some(font) = fonts.get(font_name) {
                if let Ok(encoding) = font.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }
}

/// Convert a `lopdf::Object` operand to an owned [`PdfValue`].
fn convert_operand(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_operand).collect()),
        _ => PdfValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(PdfValue::Integer(42).as_number(), Some(42.0));
        assert_eq!(PdfValue::Real(3.5).as_number(), Some(3.5));
        assert_eq!(PdfValue::Other.as_number(), None);
    }

    #[test]
    fn test_from_bytes_rejects_non_pdf() {
        let result = LopdfSource::from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_from_bytes_rejects_empty() {
        let result = LopdfSource::from_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_from_bytes_rejects_truncated_pdf() {
        // Magic alone is not a parseable document.
        let result = LopdfSource::from_bytes(b"%PDF-1.7\n");
        assert!(result.is_err());
    }
}
