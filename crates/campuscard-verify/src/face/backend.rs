//! Face locator strategy seam.
//!
//! Backend availability is decided once at startup from configuration and
//! injected into the detector; there is no runtime probing and no global
//! state. Swapping a locator in tests exercises the fail-closed/fail-open
//! policies directly.

use std::sync::Arc;

use campuscard_core::{FaceBox, VerificationConfig};
use image::GrayImage;

use super::scan::HeuristicLocator;

#[derive(Debug, thiserror::Error)]
pub enum FaceBackendError {
    #[error("face detection backend is not available")]
    Unavailable,

    #[error("face detection failed: {0}")]
    Detection(String),
}

/// Multi-scale scan parameters, matching the cascade-locator contract:
/// the window ladder grows by `scale_factor` from `min_size`, and a
/// candidate needs `min_neighbors` raw hits to count as a detection.
#[derive(Debug, Clone, Copy)]
pub struct ScanParams {
    pub scale_factor: f64,
    pub min_neighbors: usize,
    pub min_size: u32,
}

impl ScanParams {
    /// Strict parameters for card-photo vetting.
    pub fn thorough() -> Self {
        ScanParams {
            scale_factor: 1.1,
            min_neighbors: 5,
            min_size: 30,
        }
    }

    /// Relaxed parameters for the live-capture loop, trading accuracy for
    /// responsiveness.
    pub fn fast() -> Self {
        ScanParams {
            scale_factor: 1.2,
            min_neighbors: 3,
            min_size: 20,
        }
    }
}

/// A face-locating backend: returns all face candidates in the luminance
/// plane, or an error when the backend cannot run at all.
pub trait FaceLocator: Send + Sync {
    fn locate(&self, luma: &GrayImage, params: &ScanParams)
        -> Result<Vec<FaceBox>, FaceBackendError>;
}

/// Locator used when the face backend is configured off. Always errors;
/// the detector decides per mode whether that means reject (thorough) or
/// degrade to the basic dimension check (fast).
pub struct DisabledLocator;

impl FaceLocator for DisabledLocator {
    fn locate(
        &self,
        _luma: &GrayImage,
        _params: &ScanParams,
    ) -> Result<Vec<FaceBox>, FaceBackendError> {
        Err(FaceBackendError::Unavailable)
    }
}

/// Select the locator strategy for this process from configuration.
pub fn select_locator(config: &VerificationConfig) -> Arc<dyn FaceLocator> {
    if config.face_backend_enabled {
        Arc::new(HeuristicLocator::default())
    } else {
        tracing::warn!("face detection backend disabled by configuration");
        Arc::new(DisabledLocator)
    }
}
