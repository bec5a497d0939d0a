//! Campuscard Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! telemetry setup shared across the campuscard verification components.

pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::VerificationConfig;
pub use error::AppError;
pub use models::{
    CardKind, DocumentVerificationResult, FaceBox, FaceDetectionResult, IdentityCard,
    UploadCandidate,
};
