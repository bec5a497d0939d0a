//! Image quality validation - decode, dimension and aspect-ratio checks
//!
//! A pure function over the uploaded bytes: no side effects, identical bytes
//! always produce the identical decision.

use image::ImageReader;
use std::io::Cursor;

/// Minimum acceptable width/height for a card photo, in pixels.
pub const MIN_DIMENSION: u32 = 200;
/// Maximum acceptable width/height for a card photo, in pixels.
pub const MAX_DIMENSION: u32 = 4000;

const MIN_ASPECT_RATIO: f64 = 0.5;
const MAX_ASPECT_RATIO: f64 = 2.0;

/// Outcome of the photo quality check.
#[derive(Debug, Clone)]
pub struct PhotoQuality {
    pub accepted: bool,
    /// User-facing reason; shown directly to the uploader.
    pub reason: String,
    pub dimensions: Option<(u32, u32)>,
}

impl PhotoQuality {
    fn rejected(reason: &str, dimensions: Option<(u32, u32)>) -> Self {
        PhotoQuality {
            accepted: false,
            reason: reason.to_string(),
            dimensions,
        }
    }
}

/// Check that the bytes decode as an image of card-photo-suitable size and
/// shape. Checks run in order and short-circuit on the first failure.
pub fn check_quality(data: &[u8]) -> PhotoQuality {
    let decoded = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| e.to_string())
        .and_then(|reader| reader.decode().map_err(|e| e.to_string()));

    let img = match decoded {
        Ok(img) => img,
        Err(err) => {
            tracing::debug!(error = %err, "Photo rejected: failed to decode");
            return PhotoQuality::rejected(
                "Image is corrupt or in an unsupported format. Please upload a different photo.",
                None,
            );
        }
    };

    let (width, height) = (img.width(), img.height());

    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        tracing::debug!(width, height, "Photo rejected: below minimum dimensions");
        return PhotoQuality::rejected(
            "Image is too small. Minimum size is 200x200 pixels.",
            Some((width, height)),
        );
    }

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        tracing::debug!(width, height, "Photo rejected: above maximum dimensions");
        return PhotoQuality::rejected(
            "Image is too large. Maximum size is 4000x4000 pixels.",
            Some((width, height)),
        );
    }

    let aspect_ratio = width as f64 / height as f64;
    if !(MIN_ASPECT_RATIO..=MAX_ASPECT_RATIO).contains(&aspect_ratio) {
        tracing::debug!(width, height, aspect_ratio, "Photo rejected: aspect ratio");
        return PhotoQuality::rejected(
            "Image aspect ratio is not suitable for a photo.",
            Some((width, height)),
        );
    }

    PhotoQuality {
        accepted: true,
        reason: "Image quality is acceptable.".to_string(),
        dimensions: Some((width, height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([120, 120, 120, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_rejects_undecodable_bytes() {
        let result = check_quality(b"not an image");
        assert!(!result.accepted);
        assert!(result.reason.contains("corrupt or in an unsupported format"));
        assert!(result.dimensions.is_none());
    }

    #[test]
    fn test_rejects_too_small() {
        let result = check_quality(&png_bytes(199, 300));
        assert!(!result.accepted);
        assert!(result.reason.contains("too small"));

        let result = check_quality(&png_bytes(300, 150));
        assert!(!result.accepted);
        assert!(result.reason.contains("too small"));
    }

    #[test]
    fn test_rejects_too_large() {
        let result = check_quality(&png_bytes(4001, 3000));
        assert!(!result.accepted);
        assert!(result.reason.contains("too large"));
    }

    #[test]
    fn test_rejects_extreme_aspect_ratio() {
        // 3:1 is outside [0.5, 2.0] while both dimensions are in range
        let result = check_quality(&png_bytes(1200, 400));
        assert!(!result.accepted);
        assert!(result.reason.contains("aspect ratio"));

        // 1:3 likewise
        let result = check_quality(&png_bytes(400, 1200));
        assert!(!result.accepted);
    }

    #[test]
    fn test_accepts_reasonable_photo() {
        let result = check_quality(&png_bytes(600, 800));
        assert!(result.accepted);
        assert_eq!(result.dimensions, Some((600, 800)));
    }

    #[test]
    fn test_boundary_dimensions_accepted() {
        assert!(check_quality(&png_bytes(200, 200)).accepted);
        assert!(check_quality(&png_bytes(4000, 2000)).accepted);
    }

    #[test]
    fn test_idempotent_over_same_bytes() {
        let bytes = png_bytes(640, 480);
        let first = check_quality(&bytes);
        let second = check_quality(&bytes);
        assert_eq!(first.accepted, second.accepted);
        assert_eq!(first.reason, second.reason);
    }
}
