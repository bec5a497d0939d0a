//! End-to-end pipeline tests with the real locator, real PDFs, and
//! filesystem-backed storage.

use std::io::Cursor;

use campuscard_core::{UploadCandidate, VerificationConfig};
use campuscard_storage::{LocalStorage, Storage};
use campuscard_verify::{
    process_live_capture, process_photo_upload, process_proof_upload, select_locator,
    FaceDetector, ProofClaim, ProofVerifier,
};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use lopdf::{dictionary, Document, Object, Stream};
use uuid::Uuid;

const BACKGROUND: u8 = 30;
const SKIN: u8 = 185;
const EYE_SHADOW: u8 = 70;

/// Encode a PNG with a frontal-face shading pattern the heuristic locator
/// recognizes: a lit square on a dark background with a darker eye band.
fn face_photo(width: u32, height: u32, fx: u32, fy: u32, size: u32) -> Vec<u8> {
    let mut img = GrayImage::from_pixel(width, height, Luma([BACKGROUND]));
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
    encode_png(img)
}

fn blank_photo(width: u32, height: u32) -> Vec<u8> {
    encode_png(GrayImage::from_pixel(width, height, Luma([BACKGROUND])))
}

fn encode_png(img: GrayImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Build a one-page PDF containing the given line of text.
fn pdf_with_text(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = lopdf::content::Content {
        operations: vec![
            lopdf::content::Operation::new("BT", vec![]),
            lopdf::content::Operation::new("Tf", vec!["F1".into(), 12.into()]),
            lopdf::content::Operation::new("Td", vec![50.into(), 700.into()]),
            lopdf::content::Operation::new("Tj", vec![Object::string_literal(text)]),
            lopdf::content::Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

async fn storage(dir: &tempfile::TempDir) -> LocalStorage {
    LocalStorage::new(dir.path(), "http://localhost/cards".to_string())
        .await
        .unwrap()
}

fn detector(config: &VerificationConfig) -> FaceDetector {
    FaceDetector::new(select_locator(config))
}

#[tokio::test]
async fn test_photo_upload_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let config = VerificationConfig::default();
    let user_id = Uuid::new_v4();

    // Centered 200px face in a 400x400 frame: 25% of the image area
    let data = face_photo(400, 400, 100, 100, 200);
    let candidate = UploadCandidate::new(data.clone(), "portrait.png", "image/png");

    let outcome =
        process_photo_upload(&storage, &detector(&config), &config, user_id, candidate)
            .await
            .unwrap();

    assert!(outcome.is_accepted(), "rejected: {}", outcome.reason());
    let key = outcome.storage_key().unwrap();
    assert!(key.starts_with(&format!("cards/{}/photo-", user_id)));
    assert_eq!(storage.download(key).await.unwrap(), data);
}

#[tokio::test]
async fn test_photo_without_face_is_rejected_and_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let config = VerificationConfig::default();

    let candidate = UploadCandidate::new(blank_photo(400, 400), "blank.png", "image/png");
    let outcome = process_photo_upload(
        &storage,
        &detector(&config),
        &config,
        Uuid::new_v4(),
        candidate,
    )
    .await
    .unwrap();

    assert!(!outcome.is_accepted());
    assert!(outcome.reason().contains("No human face"));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_photo_gate_fails_closed_when_backend_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let mut config = VerificationConfig::default();
    config.face_backend_enabled = false;

    let candidate = UploadCandidate::new(
        face_photo(400, 400, 100, 100, 200),
        "portrait.png",
        "image/png",
    );
    let outcome = process_photo_upload(
        &storage,
        &detector(&config),
        &config,
        Uuid::new_v4(),
        candidate,
    )
    .await
    .unwrap();

    assert!(!outcome.is_accepted());
    assert!(outcome.reason().contains("currently unavailable"));
}

#[tokio::test]
async fn test_live_capture_degrades_when_backend_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let mut config = VerificationConfig::default();
    config.face_backend_enabled = false;

    let candidate = UploadCandidate::new(blank_photo(320, 240), "capture.png", "image/png");
    let outcome = process_live_capture(
        &storage,
        &detector(&config),
        &config,
        Uuid::new_v4(),
        candidate,
    )
    .await
    .unwrap();

    assert!(outcome.is_accepted());
    assert_eq!(outcome.reason(), "Image validation passed");
}

#[tokio::test]
async fn test_registration_proof_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let config = VerificationConfig::default();
    let verifier = ProofVerifier::new(&config);
    let user_id = Uuid::new_v4();

    let data = pdf_with_text(
        "University of Mpumalanga Proof of Registration 2025 \
         student number 22012345 enrolled for the academic year",
    );
    let candidate = UploadCandidate::new(data, "proof.pdf", "application/pdf");
    let claim = ProofClaim::Registration {
        student_email: "22012345@ump.ac.za".to_string(),
    };

    let outcome =
        process_proof_upload(&storage, &verifier, &config, user_id, candidate, &claim)
            .await
            .unwrap();

    assert!(outcome.is_accepted(), "rejected: {}", outcome.reason());
    let key = outcome.storage_key().unwrap();
    assert!(key.starts_with(&format!("cards/{}/proof-", user_id)));
    assert!(storage.exists(key).await.unwrap());
}

#[tokio::test]
async fn test_employment_proof_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let config = VerificationConfig::default();
    let verifier = ProofVerifier::new(&config);

    let data = pdf_with_text(
        "University of Mpumalanga Employment Contract 2025 \
         employee number EMP9921 Thandi Nkosi appointed as lecturer",
    );
    let candidate = UploadCandidate::new(data, "contract.pdf", "application/pdf");
    let claim = ProofClaim::Employment {
        employee_number: "EMP9921".to_string(),
        full_name: "Thandi Nkosi".to_string(),
    };

    let outcome = process_proof_upload(
        &storage,
        &verifier,
        &config,
        Uuid::new_v4(),
        candidate,
        &claim,
    )
    .await
    .unwrap();

    assert!(outcome.is_accepted(), "rejected: {}", outcome.reason());
}

#[tokio::test]
async fn test_proof_with_wrong_year_is_rejected_and_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let config = VerificationConfig::default();
    let verifier = ProofVerifier::new(&config);

    let data = pdf_with_text(
        "University of Mpumalanga Proof of Registration 2024 \
         student number 22012345 enrolled for the academic year",
    );
    let candidate = UploadCandidate::new(data, "proof.pdf", "application/pdf");
    let claim = ProofClaim::Registration {
        student_email: "22012345@ump.ac.za".to_string(),
    };

    let outcome = process_proof_upload(
        &storage,
        &verifier,
        &config,
        Uuid::new_v4(),
        candidate,
        &claim,
    )
    .await
    .unwrap();

    assert!(!outcome.is_accepted());
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_unparseable_pdf_is_accepted_for_manual_review() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage(&dir).await;
    let config = VerificationConfig::default();
    let verifier = ProofVerifier::new(&config);

    // Valid magic, unreadable body: accepted and kept for a human to check
    let candidate = UploadCandidate::new(
        b"%PDF-1.5\nthis body is not a parseable document".to_vec(),
        "scan.pdf",
        "application/pdf",
    );
    let claim = ProofClaim::Registration {
        student_email: "22012345@ump.ac.za".to_string(),
    };

    let outcome = process_proof_upload(
        &storage,
        &verifier,
        &config,
        Uuid::new_v4(),
        candidate,
        &claim,
    )
    .await
    .unwrap();

    assert!(outcome.is_accepted());
    assert!(outcome.reason().contains("could not be automatically verified"));
    assert!(storage.exists(outcome.storage_key().unwrap()).await.unwrap());
}
