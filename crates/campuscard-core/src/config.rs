//! Configuration module
//!
//! Environment-driven configuration for the verification pipeline: upload
//! limits per asset kind, the expected document fields, and the face backend
//! selection. Call [`VerificationConfig::from_env`] once at startup.

use std::env;

// Default limits
const DEFAULT_PHOTO_MAX_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_DOCUMENT_MAX_BYTES: usize = 10 * 1024 * 1024;

// The document checks are pinned to the current academic year; a proof
// document issued for another year is not valid for card issuance.
const DEFAULT_EXPECTED_YEAR: &str = "2025";

/// Keywords that identify the issuing institution in a proof document.
pub const INSTITUTION_KEYWORDS: &[&str] =
    &["university of mpumalanga", "ump", "mpumalanga university"];

/// Verification pipeline configuration
#[derive(Clone, Debug)]
pub struct VerificationConfig {
    // Photo upload limits
    pub photo_max_bytes: usize,
    pub photo_allowed_extensions: Vec<String>,
    pub photo_allowed_content_types: Vec<String>,
    // Proof document upload limits
    pub document_max_bytes: usize,
    pub document_allowed_extensions: Vec<String>,
    pub document_allowed_content_types: Vec<String>,
    // Document field matching
    pub expected_year: String,
    pub institution_keywords: Vec<String>,
    /// Whether the face-detection backend is enabled. When false the
    /// pipeline runs with the disabled locator: thorough detection rejects
    /// everything, fast detection degrades to the dimension check.
    pub face_backend_enabled: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        VerificationConfig {
            photo_max_bytes: DEFAULT_PHOTO_MAX_BYTES,
            photo_allowed_extensions: str_list(&["jpg", "jpeg", "png", "webp"]),
            photo_allowed_content_types: str_list(&["image/jpeg", "image/png", "image/webp"]),
            document_max_bytes: DEFAULT_DOCUMENT_MAX_BYTES,
            document_allowed_extensions: str_list(&["pdf"]),
            document_allowed_content_types: str_list(&["application/pdf"]),
            expected_year: DEFAULT_EXPECTED_YEAR.to_string(),
            institution_keywords: str_list(INSTITUTION_KEYWORDS),
            face_backend_enabled: true,
        }
    }
}

impl VerificationConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Load .env if present; ignore when missing (production sets real env)
        dotenvy::dotenv().ok();

        let defaults = VerificationConfig::default();

        let config = VerificationConfig {
            photo_max_bytes: env::var("CAMPUSCARD_PHOTO_MAX_MB")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(defaults.photo_max_bytes),
            photo_allowed_extensions: env_list(
                "CAMPUSCARD_PHOTO_EXTENSIONS",
                defaults.photo_allowed_extensions,
            ),
            photo_allowed_content_types: env_list(
                "CAMPUSCARD_PHOTO_CONTENT_TYPES",
                defaults.photo_allowed_content_types,
            ),
            document_max_bytes: env::var("CAMPUSCARD_DOCUMENT_MAX_MB")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(defaults.document_max_bytes),
            document_allowed_extensions: env_list(
                "CAMPUSCARD_DOCUMENT_EXTENSIONS",
                defaults.document_allowed_extensions,
            ),
            document_allowed_content_types: env_list(
                "CAMPUSCARD_DOCUMENT_CONTENT_TYPES",
                defaults.document_allowed_content_types,
            ),
            expected_year: env::var("CAMPUSCARD_EXPECTED_YEAR")
                .unwrap_or(defaults.expected_year),
            institution_keywords: env_list(
                "CAMPUSCARD_INSTITUTION_KEYWORDS",
                defaults.institution_keywords,
            ),
            face_backend_enabled: env::var("CAMPUSCARD_FACE_BACKEND")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.face_backend_enabled),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.photo_max_bytes == 0 {
            anyhow::bail!("photo_max_bytes must be non-zero");
        }
        if self.document_max_bytes == 0 {
            anyhow::bail!("document_max_bytes must be non-zero");
        }
        if self.expected_year.is_empty() {
            anyhow::bail!("expected_year must be set");
        }
        if self.institution_keywords.is_empty() {
            anyhow::bail!("institution_keywords must not be empty");
        }
        Ok(())
    }
}

fn str_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn env_list(key: &str, default: Vec<String>) -> Vec<String> {
    match env::var(key) {
        Ok(value) => value
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default,
    }
}
