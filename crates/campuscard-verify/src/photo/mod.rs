//! Photo quality checks.

mod quality;

pub use quality::{check_quality, PhotoQuality, MAX_DIMENSION, MIN_DIMENSION};
