//! Face detection: locator backends plus framing checks.
//!
//! The locator is an injected capability selected at startup
//! ([`select_locator`]); the detector applies the mode-specific framing
//! rules on top of whatever the locator reports.

mod backend;
mod detector;
mod geometry;
mod scan;

pub use backend::{select_locator, DisabledLocator, FaceBackendError, FaceLocator, ScanParams};
pub use detector::{DetectionMode, FaceDetector};
pub use scan::HeuristicLocator;
