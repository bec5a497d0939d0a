//! Data models for the verification pipeline
//!
//! Decision structs produced by the pipeline, the request-scoped upload
//! candidate, and the card record shape consumed by the surrounding service.

mod card;
mod upload;
mod verification;

// Re-export all models for convenient imports
pub use card::*;
pub use upload::*;
pub use verification::*;
