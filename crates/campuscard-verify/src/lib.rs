//! Campuscard Verification Library
//!
//! The document/photo verification pipeline behind campuscard issuance:
//!
//! - [`validator`]: file-level upload constraints (size, extension,
//!   content type)
//! - [`photo`]: image decode, dimension and aspect-ratio quality checks
//! - [`face`]: face location and framing checks, thorough and fast modes
//! - [`document`]: PDF text extraction and proof-of-registration /
//!   proof-of-employment keyword verification
//! - [`upload`]: async orchestration that runs the checks in order and
//!   writes to storage only on acceptance
//!
//! All decisions carry a user-facing reason string. Storage is written only
//! after an accepted decision; rejected uploads never leave memory.

pub mod document;
pub mod face;
pub mod photo;
pub mod upload;
pub mod validator;

// Re-export commonly used types
pub use document::{extract_text, ExtractedDocument, ExtractionError, ProofVerifier};
pub use face::{
    select_locator, DetectionMode, DisabledLocator, FaceBackendError, FaceDetector, FaceLocator,
    HeuristicLocator, ScanParams,
};
pub use photo::{check_quality, PhotoQuality};
pub use upload::{
    process_live_capture, process_photo_upload, process_proof_upload, ProofClaim, UploadOutcome,
};
pub use validator::{UploadValidator, ValidationError};
