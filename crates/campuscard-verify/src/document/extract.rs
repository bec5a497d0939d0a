//! PDF text extraction.
//!
//! The document structure is parsed with `lopdf` to get a trustworthy page
//! count, then the text layer is pulled with `pdf-extract` over the same
//! bytes. Both run fully in memory; uploaded documents are never written to
//! disk before they pass verification.

use lopdf::Document;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("file is not a valid PDF")]
    NotAPdf,

    #[error("PDF has no pages")]
    NoPages,

    #[error("failed to parse PDF structure: {0}")]
    Parse(String),

    #[error("failed to extract text from PDF: {0}")]
    Text(String),
}

/// Text layer of an uploaded proof document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub page_count: usize,
    pub text: String,
}

impl ExtractedDocument {
    /// Full text lowercased, the form all content checks run against.
    pub fn lowercased(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Parse the PDF and extract its text layer.
pub fn extract_text(data: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
    if !data.starts_with(PDF_MAGIC) {
        return Err(ExtractionError::NotAPdf);
    }

    let document =
        Document::load_mem(data).map_err(|e| ExtractionError::Parse(e.to_string()))?;
    let page_count = document.get_pages().len();
    if page_count == 0 {
        return Err(ExtractionError::NoPages);
    }

    let text =
        pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Text(e.to_string()))?;

    tracing::debug!(page_count, text_len = text.len(), "extracted PDF text");

    Ok(ExtractedDocument { page_count, text })
}
