//! Upload orchestration: validation, domain checks, then storage.
//!
//! Files reach storage only after every check has passed; a rejected upload
//! never leaves memory, so there is nothing to clean up on the failure path.

mod pipeline;
mod types;

pub use pipeline::{process_live_capture, process_photo_upload, process_proof_upload};
pub use types::{ProofClaim, UploadOutcome};
