//! Mode-specific framing policy on top of a [`FaceLocator`].

use std::io::Cursor;
use std::sync::Arc;

use campuscard_core::{FaceBox, FaceDetectionResult};
use image::{GrayImage, ImageReader};

use super::backend::{FaceBackendError, FaceLocator, ScanParams};

// Thorough framing thresholds, applied after the scan.
const MIN_FACE_PCT: f64 = 0.08;
const MAX_FACE_PCT: f64 = 0.70;
const CENTER_OFFSET_PCT: f64 = 0.4;
const FACE_ASPECT_MIN: f64 = 0.7;
const FACE_ASPECT_MAX: f64 = 1.4;

// Fast mode only floors the face size, in percent of image area.
const FAST_MIN_FACE_PCT: f64 = 0.5;

// Dimension floor for the degraded fast path when the backend is down.
const FALLBACK_MIN_DIMENSION: u32 = 100;

/// How strictly to vet the frame.
///
/// `Thorough` is the card-photo gate and fails closed when the locator
/// backend errors. `Fast` serves the live-capture preview loop and degrades
/// to a bare dimension check instead, so an outage never blocks capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    Thorough,
    Fast,
}

/// Applies framing rules to whatever the injected locator reports.
#[derive(Clone)]
pub struct FaceDetector {
    locator: Arc<dyn FaceLocator>,
}

impl FaceDetector {
    pub fn new(locator: Arc<dyn FaceLocator>) -> Self {
        FaceDetector { locator }
    }

    /// Run detection over encoded image bytes. All failure paths fold into
    /// a rejected result with a user-facing reason; this never panics on
    /// hostile input.
    pub fn detect(&self, data: &[u8], mode: DetectionMode) -> FaceDetectionResult {
        let decoded = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| e.to_string())
            .and_then(|reader| reader.decode().map_err(|e| e.to_string()));

        let image = match decoded {
            Ok(image) => image,
            Err(error) => {
                tracing::debug!(%error, "image decode failed before face detection");
                return FaceDetectionResult::rejected("Could not load image");
            }
        };

        let luma = image.to_luma8();
        match mode {
            DetectionMode::Thorough => self.detect_thorough(&luma),
            DetectionMode::Fast => self.detect_fast(&luma),
        }
    }

    fn detect_thorough(&self, luma: &GrayImage) -> FaceDetectionResult {
        let faces = match self.locator.locate(luma, &ScanParams::thorough()) {
            Ok(faces) => faces,
            Err(error) => {
                // Card photos are vetted or not stored at all.
                tracing::error!(%error, "face backend failed during card-photo vetting");
                return FaceDetectionResult::rejected(
                    "Face detection is currently unavailable. Please try again.",
                );
            }
        };

        let (width, height) = luma.dimensions();
        tracing::debug!(faces = faces.len(), width, height, "thorough face scan");

        if faces.is_empty() {
            return FaceDetectionResult::rejected(
                "No human face detected. Please ensure your face is clearly visible and try again.",
            );
        }
        if faces.len() > 1 {
            return FaceDetectionResult::rejected(
                "Multiple faces detected. Please upload an image with only one face.",
            );
        }

        let face = faces[0];
        let image_area = (width as u64 * height as u64) as f64;
        let face_pct = face.area() as f64 / image_area;

        if face_pct < MIN_FACE_PCT {
            return FaceDetectionResult::rejected(
                "Oops! No human Face detected, please upload a clear picture of yourself",
            );
        }
        if face_pct > MAX_FACE_PCT {
            return FaceDetectionResult::rejected(
                "Face too large. Please step back from the camera and try again.",
            );
        }

        let (cx, cy) = face.center();
        let offset_x = (cx as f64 - width as f64 / 2.0).abs();
        let offset_y = (cy as f64 - height as f64 / 2.0).abs();
        if offset_x > width as f64 * CENTER_OFFSET_PCT || offset_y > height as f64 * CENTER_OFFSET_PCT
        {
            return FaceDetectionResult::rejected(
                "Face not centered. Please position your face in the center of the frame.",
            );
        }

        let aspect = face.aspect_ratio();
        if !(FACE_ASPECT_MIN..=FACE_ASPECT_MAX).contains(&aspect) {
            return FaceDetectionResult::rejected(
                "Face proportions not suitable. Please ensure your face is facing forward.",
            );
        }

        FaceDetectionResult::accepted("Face detected successfully.", Some(face))
    }

    fn detect_fast(&self, luma: &GrayImage) -> FaceDetectionResult {
        let (width, height) = luma.dimensions();

        let faces = match self.locator.locate(luma, &ScanParams::fast()) {
            Ok(faces) => faces,
            Err(error) => {
                // Live capture stays responsive; fall back to a size check.
                tracing::warn!(%error, "face backend down, degrading to dimension check");
                if width < FALLBACK_MIN_DIMENSION || height < FALLBACK_MIN_DIMENSION {
                    return FaceDetectionResult::rejected("Image too small");
                }
                return FaceDetectionResult::accepted("Image validation passed", None);
            }
        };

        if faces.is_empty() {
            return FaceDetectionResult::rejected("No face detected");
        }
        if faces.len() > 1 {
            return FaceDetectionResult::rejected("Multiple faces detected");
        }

        let face = faces[0];
        let image_area = (width as u64 * height as u64) as f64;
        let face_pct = face.area() as f64 / image_area * 100.0;
        if face_pct < FAST_MIN_FACE_PCT {
            return FaceDetectionResult::rejected("Face too small");
        }

        FaceDetectionResult::accepted("Face detected successfully", Some(face))
    }
}
