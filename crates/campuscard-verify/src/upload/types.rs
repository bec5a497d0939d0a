use serde::{Deserialize, Serialize};

/// Identity claim a proof document must substantiate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProofClaim {
    /// Student proof of registration. The student number is derived from
    /// the local part of the email address.
    Registration { student_email: String },

    /// Staff proof of employment.
    Employment {
        employee_number: String,
        full_name: String,
    },
}

/// Final decision for one upload.
///
/// `Accepted` means the file has been written to storage under
/// `storage_key`; `Rejected` means it never left memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UploadOutcome {
    Accepted {
        storage_key: String,
        storage_url: String,
        reason: String,
    },
    Rejected {
        reason: String,
    },
}

impl UploadOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, UploadOutcome::Accepted { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            UploadOutcome::Accepted { reason, .. } => reason,
            UploadOutcome::Rejected { reason } => reason,
        }
    }

    pub fn storage_key(&self) -> Option<&str> {
        match self {
            UploadOutcome::Accepted { storage_key, .. } => Some(storage_key),
            UploadOutcome::Rejected { .. } => None,
        }
    }
}
