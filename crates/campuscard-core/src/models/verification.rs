//! Decision structs produced by the verification pipeline.
//!
//! These are consumed immediately by the calling handler and never persisted;
//! the card record stores only the storage keys of accepted files.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Axis-aligned face bounding box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl FaceBox {
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Center point of the box.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

/// Outcome of a face-detection pass over one uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceDetectionResult {
    pub accepted: bool,
    /// User-facing reason; shown directly to the uploader.
    pub reason: String,
    pub face_box: Option<FaceBox>,
}

impl FaceDetectionResult {
    pub fn accepted(reason: impl Into<String>, face_box: Option<FaceBox>) -> Self {
        FaceDetectionResult {
            accepted: true,
            reason: reason.into(),
            face_box,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        FaceDetectionResult {
            accepted: false,
            reason: reason.into(),
            face_box: None,
        }
    }
}

/// Outcome of matching a proof document against the expected identity fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVerificationResult {
    pub accepted: bool,
    /// User-facing reason; shown directly to the uploader.
    pub reason: String,
    /// Keywords from the rule tables found in the document text. Kept for
    /// the manual-review trail.
    pub matched_keywords: BTreeSet<String>,
}

impl DocumentVerificationResult {
    pub fn accepted(reason: impl Into<String>, matched_keywords: BTreeSet<String>) -> Self {
        DocumentVerificationResult {
            accepted: true,
            reason: reason.into(),
            matched_keywords,
        }
    }

    pub fn rejected(reason: impl Into<String>, matched_keywords: BTreeSet<String>) -> Self {
        DocumentVerificationResult {
            accepted: false,
            reason: reason.into(),
            matched_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_box_arithmetic() {
        let face = FaceBox { x: 10, y: 20, w: 100, h: 80 };
        assert_eq!(face.area(), 8000);
        assert_eq!(face.center(), (60, 60));
        assert!((face.aspect_ratio() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_detection_result_constructors() {
        let face = FaceBox { x: 0, y: 0, w: 50, h: 50 };
        let ok = FaceDetectionResult::accepted("face detected successfully", Some(face));
        assert!(ok.accepted);
        assert_eq!(ok.face_box, Some(face));

        let bad = FaceDetectionResult::rejected("No face detected");
        assert!(!bad.accepted);
        assert!(bad.face_box.is_none());
    }

    #[test]
    fn test_document_result_serialization() {
        let mut matched = BTreeSet::new();
        matched.insert("registration".to_string());
        matched.insert("student".to_string());

        let result = DocumentVerificationResult::accepted("verified", matched);
        let json = serde_json::to_string(&result).unwrap();
        let back: DocumentVerificationResult = serde_json::from_str(&json).unwrap();
        assert!(back.accepted);
        assert!(back.matched_keywords.contains("registration"));
    }
}
