//! The accept/reject pipelines for the three upload kinds.

use campuscard_core::{AppError, UploadCandidate, VerificationConfig};
use campuscard_storage::{card_asset_key, Storage};
use uuid::Uuid;

use crate::document::{extract_text, ExtractionError, ProofVerifier};
use crate::face::{DetectionMode, FaceDetector};
use crate::photo::check_quality;
use crate::validator::{UploadValidator, ValidationError};

use super::types::{ProofClaim, UploadOutcome};

const MEGABYTE: usize = 1024 * 1024;

/// Vet a card-photo upload and store it on acceptance.
///
/// Order: file constraints, decoded image quality, thorough face detection,
/// then the storage write. The face gate fails closed; an unavailable
/// backend rejects the upload.
pub async fn process_photo_upload(
    storage: &dyn Storage,
    detector: &FaceDetector,
    config: &VerificationConfig,
    user_id: Uuid,
    candidate: UploadCandidate,
) -> Result<UploadOutcome, AppError> {
    let validator = UploadValidator::for_photo(config);
    if let Err(error) = validator.validate(&candidate) {
        tracing::info!(user_id = %user_id, %error, "photo upload failed file validation");
        return Ok(UploadOutcome::Rejected {
            reason: rejection_reason(&error),
        });
    }

    let quality = check_quality(&candidate.data);
    if !quality.accepted {
        tracing::info!(user_id = %user_id, reason = %quality.reason, "photo failed quality check");
        return Ok(UploadOutcome::Rejected {
            reason: quality.reason,
        });
    }

    let detection = detector.detect(&candidate.data, DetectionMode::Thorough);
    if !detection.accepted {
        tracing::info!(user_id = %user_id, reason = %detection.reason, "photo failed face check");
        return Ok(UploadOutcome::Rejected {
            reason: detection.reason,
        });
    }

    let extension = candidate
        .extension()
        .ok_or_else(|| AppError::InvalidInput("filename has no extension".to_string()))?;
    store_accepted(storage, user_id, "photo", &extension, candidate.data, detection.reason).await
}

/// Vet one live-capture frame and store it on acceptance.
///
/// Runs the fast detection profile; when the face backend is down this
/// degrades to a dimension check rather than blocking capture.
pub async fn process_live_capture(
    storage: &dyn Storage,
    detector: &FaceDetector,
    config: &VerificationConfig,
    user_id: Uuid,
    candidate: UploadCandidate,
) -> Result<UploadOutcome, AppError> {
    // Camera frames carry a synthetic filename; only the size limit applies.
    let validator = UploadValidator::for_photo(config);
    if let Err(error) = validator.validate_file_size(candidate.size()) {
        tracing::info!(user_id = %user_id, %error, "live capture over size limit");
        return Ok(UploadOutcome::Rejected {
            reason: rejection_reason(&error),
        });
    }

    let detection = detector.detect(&candidate.data, DetectionMode::Fast);
    if !detection.accepted {
        tracing::debug!(user_id = %user_id, reason = %detection.reason, "live frame rejected");
        return Ok(UploadOutcome::Rejected {
            reason: detection.reason,
        });
    }

    let extension = candidate.extension().unwrap_or_else(|| "png".to_string());
    store_accepted(storage, user_id, "live", &extension, candidate.data, detection.reason).await
}

/// Vet a proof document against the applicant's claim and store it on
/// acceptance.
///
/// Structural failures (not a PDF, zero pages) reject. Extraction failures
/// on an otherwise plausible PDF accept without content checks: scanned or
/// image-only documents must not lock applicants out, and the document is
/// kept in storage for manual review.
pub async fn process_proof_upload(
    storage: &dyn Storage,
    verifier: &ProofVerifier,
    config: &VerificationConfig,
    user_id: Uuid,
    candidate: UploadCandidate,
    claim: &ProofClaim,
) -> Result<UploadOutcome, AppError> {
    let validator = UploadValidator::for_document(config);
    if let Err(error) = validator.validate(&candidate) {
        tracing::info!(user_id = %user_id, %error, "proof upload failed file validation");
        return Ok(UploadOutcome::Rejected {
            reason: rejection_reason(&error),
        });
    }

    let reason = match extract_text(&candidate.data) {
        Ok(document) => {
            let result = match claim {
                ProofClaim::Registration { student_email } => {
                    verifier.verify_registration(&document, student_email)
                }
                ProofClaim::Employment {
                    employee_number,
                    full_name,
                } => verifier.verify_employment(&document, employee_number, full_name),
            };
            if !result.accepted {
                tracing::info!(
                    user_id = %user_id,
                    reason = %result.reason,
                    "proof document failed content checks"
                );
                return Ok(UploadOutcome::Rejected {
                    reason: result.reason,
                });
            }
            result.reason
        }
        Err(ExtractionError::NotAPdf) => {
            return Ok(UploadOutcome::Rejected {
                reason: "File is not a valid PDF".to_string(),
            });
        }
        Err(ExtractionError::NoPages) => {
            return Ok(UploadOutcome::Rejected {
                reason: "The PDF document has no pages.".to_string(),
            });
        }
        Err(error) => {
            tracing::warn!(
                user_id = %user_id,
                %error,
                "proof text extraction failed, accepting for manual review"
            );
            "Document accepted; contents could not be automatically verified.".to_string()
        }
    };

    let extension = candidate.extension().unwrap_or_else(|| "pdf".to_string());
    store_accepted(storage, user_id, "proof", &extension, candidate.data, reason).await
}

async fn store_accepted(
    storage: &dyn Storage,
    user_id: Uuid,
    label: &str,
    extension: &str,
    data: Vec<u8>,
    reason: String,
) -> Result<UploadOutcome, AppError> {
    let storage_key = card_asset_key(user_id, label, extension);
    let storage_url = storage
        .upload(&storage_key, data)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    tracing::info!(user_id = %user_id, %storage_key, "upload accepted and stored");

    Ok(UploadOutcome::Accepted {
        storage_key,
        storage_url,
        reason,
    })
}

fn rejection_reason(error: &ValidationError) -> String {
    match error {
        ValidationError::FileTooLarge { max, .. } => {
            format!("File size too large. Maximum size is {}MB", max / MEGABYTE)
        }
        ValidationError::InvalidExtension { allowed, .. } => {
            format!("File type not allowed. Allowed types: {}", allowed.join(", "))
        }
        ValidationError::InvalidContentType { .. } => {
            "File content type not allowed.".to_string()
        }
        ValidationError::InvalidFilename(_) => "Invalid file name.".to_string(),
        ValidationError::EmptyFile => "No file was uploaded.".to_string(),
    }
}
