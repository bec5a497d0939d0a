//! Heuristic face locator: multi-scale sliding-window scan.
//!
//! A classifier-cascade stand-in built from summed-area-table rectangle
//! features. The luminance plane is Gaussian-smoothed, then square windows
//! from `min_size` upward (growing by `scale_factor`) are scored with cheap
//! checks modeled on frontal-face shading:
//!
//! 1. the eye band is darker than the cheek band, but not void-dark;
//! 2. the forehead and cheek bands are lit (rejects flat or dark regions
//!    and windows hanging off the top of the subject);
//! 3. the left and right halves are roughly symmetric in brightness.
//!
//! Raw hits then vote: a location must collect `min_neighbors` overlapping
//! hits to become a detection (see [`super::geometry::group_hits`]). This is
//! a fixed heuristic rule set, not a trained model; false accepts and
//! rejects are expected and tolerated by the calling policy.

use campuscard_core::FaceBox;
use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;

use super::backend::{FaceBackendError, FaceLocator, ScanParams};
use super::geometry::{group_hits, suppress_nested};

// Band layout as fractions of the window height.
const FOREHEAD_BAND: (f64, f64) = (0.0, 0.20);
const EYE_BAND: (f64, f64) = (0.20, 0.45);
const CHEEK_BAND: (f64, f64) = (0.55, 0.85);

// Feature thresholds (8-bit luminance units).
const CONTRAST_MIN: f64 = 10.0;
const SYMMETRY_MAX: f64 = 30.0;
const CHEEK_BRIGHTNESS_MIN: f64 = 50.0;
// The eye band is shaded skin, not background; windows whose "eyes" are
// near-black relative to the cheeks are framing something else.
const EYE_CHEEK_RATIO_MIN: f64 = 0.35;

const BLUR_SIGMA: f32 = 1.5;

/// Summed-area table over a grayscale image, `(width+1) x (height+1)` with a
/// zero border, so any rectangle sum is four lookups.
struct IntegralImage {
    table: Vec<u64>,
    stride: usize,
}

impl IntegralImage {
    fn new(gray: &GrayImage) -> Self {
        let (w, h) = gray.dimensions();
        let stride = (w + 1) as usize;
        let mut table = vec![0u64; stride * (h + 1) as usize];

        for y in 0..h {
            let mut row_sum: u64 = 0;
            for x in 0..w {
                row_sum += gray.get_pixel(x, y).0[0] as u64;
                let idx = (y + 1) as usize * stride + (x + 1) as usize;
                let above = y as usize * stride + (x + 1) as usize;
                table[idx] = row_sum + table[above];
            }
        }

        IntegralImage { table, stride }
    }

    /// Mean pixel value over the half-open rectangle [x1, x2) x [y1, y2).
    fn mean(&self, x1: u32, y1: u32, x2: u32, y2: u32) -> f64 {
        debug_assert!(x2 > x1 && y2 > y1);
        let (x1, y1, x2, y2) = (x1 as usize, y1 as usize, x2 as usize, y2 as usize);
        let sum = self.table[y2 * self.stride + x2] + self.table[y1 * self.stride + x1]
            - self.table[y1 * self.stride + x2]
            - self.table[y2 * self.stride + x1];
        sum as f64 / ((x2 - x1) * (y2 - y1)) as f64
    }
}

/// The default face-locating backend.
#[derive(Default)]
pub struct HeuristicLocator;

impl HeuristicLocator {
    /// Score one square window; true when all shading checks pass.
    fn window_matches(integral: &IntegralImage, x: u32, y: u32, size: u32) -> bool {
        let s = size as f64;
        let inset = (s * 0.1) as u32;
        let col_left = x + inset;
        let col_right = x + size - inset;
        if col_right <= col_left + 1 {
            return false;
        }

        let band = |range: (f64, f64)| {
            let top = y + (s * range.0) as u32;
            let bottom = y + (s * range.1) as u32;
            integral.mean(col_left, top, col_right, bottom)
        };

        let forehead = band(FOREHEAD_BAND);
        let eye = band(EYE_BAND);
        let cheek = band(CHEEK_BAND);

        if cheek < CHEEK_BRIGHTNESS_MIN || forehead < CHEEK_BRIGHTNESS_MIN {
            return false;
        }
        if cheek - eye < CONTRAST_MIN {
            return false;
        }
        if eye < cheek * EYE_CHEEK_RATIO_MIN {
            return false;
        }

        // Bilateral symmetry over the face rows
        let rows_top = y + (s * EYE_BAND.0) as u32;
        let rows_bottom = y + (s * CHEEK_BAND.1) as u32;
        let mid = x + size / 2;
        let left = integral.mean(col_left, rows_top, mid, rows_bottom);
        let right = integral.mean(mid, rows_top, col_right, rows_bottom);

        (left - right).abs() <= SYMMETRY_MAX
    }
}

impl FaceLocator for HeuristicLocator {
    fn locate(
        &self,
        luma: &GrayImage,
        params: &ScanParams,
    ) -> Result<Vec<FaceBox>, FaceBackendError> {
        let (width, height) = luma.dimensions();
        let max_size = width.min(height);
        if max_size < params.min_size {
            return Ok(Vec::new());
        }

        let smoothed = gaussian_blur_f32(luma, BLUR_SIGMA);
        let integral = IntegralImage::new(&smoothed);

        let mut hits: Vec<FaceBox> = Vec::new();
        let mut size = params.min_size;
        while size <= max_size {
            let step = (size / 16).max(2);
            let mut y = 0;
            while y + size <= height {
                let mut x = 0;
                while x + size <= width {
                    if Self::window_matches(&integral, x, y, size) {
                        hits.push(FaceBox { x, y, w: size, h: size });
                    }
                    x += step;
                }
                y += step;
            }

            let next = (size as f64 * params.scale_factor) as u32;
            size = next.max(size + 1);
        }

        let detections = suppress_nested(group_hits(&hits, params.min_neighbors));
        tracing::debug!(
            raw_hits = hits.len(),
            detections = detections.len(),
            min_neighbors = params.min_neighbors,
            "heuristic face scan complete"
        );

        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const BACKGROUND: u8 = 30;
    const SKIN: u8 = 185;
    const EYE_SHADOW: u8 = 70;

    /// Paint a frontal-face shading pattern: a lit square with a darker
    /// horizontal eye band in its upper third.
    fn paint_face(img: &mut GrayImage, fx: u32, fy: u32, size: u32) {
        for y in fy..fy + size {
            for x in fx..fx + size {
                let band_top = fy + (size as f64 * 0.28) as u32;
                let band_bottom = fy + (size as f64 * 0.42) as u32;
                let value = if y >= band_top && y < band_bottom {
                    EYE_SHADOW
                } else {
                    SKIN
                };
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }

    fn blank(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([BACKGROUND]))
    }

    #[test]
    fn test_no_hits_on_flat_background() {
        let img = blank(320, 320);
        let detections = HeuristicLocator.locate(&img, &ScanParams::thorough()).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_locates_single_face() {
        let mut img = blank(400, 400);
        paint_face(&mut img, 100, 100, 200);

        let detections = HeuristicLocator.locate(&img, &ScanParams::thorough()).unwrap();
        assert_eq!(detections.len(), 1);

        let face = detections[0];
        // The detected box should land on the painted region
        assert!(face.x > 50 && face.x < 150);
        assert!(face.y > 50 && face.y < 150);
        assert!(face.w > 130 && face.w < 270);
    }

    #[test]
    fn test_locates_two_faces_separately() {
        let mut img = blank(400, 720);
        paint_face(&mut img, 60, 60, 150);
        paint_face(&mut img, 180, 480, 150);

        let detections = HeuristicLocator.locate(&img, &ScanParams::thorough()).unwrap();
        assert_eq!(detections.len(), 2);
    }

    #[test]
    fn test_fast_params_also_find_face() {
        let mut img = blank(400, 400);
        paint_face(&mut img, 100, 100, 200);

        let detections = HeuristicLocator.locate(&img, &ScanParams::fast()).unwrap();
        assert_eq!(detections.len(), 1);
    }

    #[test]
    fn test_image_smaller_than_min_window() {
        let img = blank(20, 20);
        let detections = HeuristicLocator.locate(&img, &ScanParams::thorough()).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_idempotent_over_same_image() {
        let mut img = blank(400, 400);
        paint_face(&mut img, 100, 100, 200);

        let a = HeuristicLocator.locate(&img, &ScanParams::thorough()).unwrap();
        let b = HeuristicLocator.locate(&img, &ScanParams::thorough()).unwrap();
        assert_eq!(a, b);
    }
}
