//! Content checks for proof-of-registration and proof-of-employment
//! documents.
//!
//! All checks run over the lowercased text layer. The applicant-supplied
//! identifiers (student number, employee number, name) must appear verbatim,
//! and the document must read like the right kind of paperwork: at least two
//! registration keywords for students, at least one employment keyword for
//! staff.

use std::collections::BTreeSet;

use campuscard_core::{DocumentVerificationResult, VerificationConfig};

use super::extract::ExtractedDocument;

const REGISTRATION_KEYWORDS: &[&str] = &[
    "registration",
    "student",
    "enrolled",
    "matriculation",
    "admission",
    "academic",
    "enrollment",
    "accepted",
    "proof of registration",
    "student registration",
];
const MIN_REGISTRATION_KEYWORDS: usize = 2;

const EMPLOYMENT_KEYWORDS: &[&str] = &[
    "employment",
    "employee",
    "staff",
    "appointment",
    "contract",
    "employment contract",
    "position",
    "designation",
    "job title",
    "appointed",
];
const MIN_EMPLOYMENT_KEYWORDS: usize = 1;

/// Checks an extracted document against the institutional requirements.
pub struct ProofVerifier {
    expected_year: String,
    institution_keywords: Vec<String>,
}

impl ProofVerifier {
    pub fn new(config: &VerificationConfig) -> Self {
        ProofVerifier {
            expected_year: config.expected_year.clone(),
            institution_keywords: config.institution_keywords.clone(),
        }
    }

    /// Verify a proof of registration. The student number is the local part
    /// of the student email and must appear in the document.
    pub fn verify_registration(
        &self,
        document: &ExtractedDocument,
        student_email: &str,
    ) -> DocumentVerificationResult {
        let text = document.lowercased();

        if let Some(result) = self.check_common(&text) {
            return result;
        }

        let student_number = student_email
            .split('@')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        if student_number.is_empty() {
            return DocumentVerificationResult::rejected(
                "Student number could not be read from your email address.",
                BTreeSet::new(),
            );
        }
        if !text.contains(&student_number) {
            tracing::debug!(%student_number, "student number not found in document");
            return DocumentVerificationResult::rejected(
                "Student number from your email was not found in the document.",
                BTreeSet::new(),
            );
        }

        let matched = matched_keywords(&text, REGISTRATION_KEYWORDS);
        tracing::debug!(matched = matched.len(), ?matched, "registration keyword scan");
        if matched.len() < MIN_REGISTRATION_KEYWORDS {
            return DocumentVerificationResult::rejected(
                "Document does not look like a proof of registration.",
                matched,
            );
        }

        DocumentVerificationResult::accepted("Proof of registration verified.", matched)
    }

    /// Verify a proof of employment. The employee number and at least one
    /// word of the applicant's name must appear in the document.
    pub fn verify_employment(
        &self,
        document: &ExtractedDocument,
        employee_number: &str,
        full_name: &str,
    ) -> DocumentVerificationResult {
        let text = document.lowercased();

        if let Some(result) = self.check_common(&text) {
            return result;
        }

        let employee_number = employee_number.trim().to_lowercase();
        if employee_number.is_empty() || !text.contains(&employee_number) {
            tracing::debug!(%employee_number, "employee number not found in document");
            return DocumentVerificationResult::rejected(
                "Employee number was not found in the document.",
                BTreeSet::new(),
            );
        }

        let name_found = full_name
            .to_lowercase()
            .split_whitespace()
            .any(|part| text.contains(part));
        if !name_found {
            tracing::debug!(%full_name, "name not found in document");
            return DocumentVerificationResult::rejected(
                "Your name was not found in the document.",
                BTreeSet::new(),
            );
        }

        let matched = matched_keywords(&text, EMPLOYMENT_KEYWORDS);
        tracing::debug!(matched = matched.len(), ?matched, "employment keyword scan");
        if matched.len() < MIN_EMPLOYMENT_KEYWORDS {
            return DocumentVerificationResult::rejected(
                "Document does not look like a proof of employment.",
                matched,
            );
        }

        DocumentVerificationResult::accepted("Proof of employment verified.", matched)
    }

    /// Year and institution checks shared by both proof kinds.
    fn check_common(&self, text: &str) -> Option<DocumentVerificationResult> {
        if !text.contains(&self.expected_year) {
            tracing::debug!(year = %self.expected_year, "expected year not found in document");
            return Some(DocumentVerificationResult::rejected(
                format!(
                    "Document does not mention the {} academic year.",
                    self.expected_year
                ),
                BTreeSet::new(),
            ));
        }

        let institution_found = self
            .institution_keywords
            .iter()
            .any(|keyword| text.contains(keyword.as_str()));
        if !institution_found {
            tracing::debug!("no institution keyword found in document");
            return Some(DocumentVerificationResult::rejected(
                "Document does not appear to be issued by the university.",
                BTreeSet::new(),
            ));
        }

        None
    }
}

fn matched_keywords(text: &str, keywords: &[&str]) -> BTreeSet<String> {
    keywords
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}
