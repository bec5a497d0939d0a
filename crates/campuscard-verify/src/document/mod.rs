//! Proof-document handling: PDF text extraction and content checks.

mod extract;
mod proof;

pub use extract::{extract_text, ExtractedDocument, ExtractionError};
pub use proof::ProofVerifier;
