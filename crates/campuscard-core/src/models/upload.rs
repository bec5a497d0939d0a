//! Request-scoped upload input.

/// One uploaded file as received at the pipeline boundary.
///
/// Created per request and dropped after the accept/reject decision is made;
/// only accepted bytes outlive the candidate, as a storage write.
#[derive(Clone, Debug)]
pub struct UploadCandidate {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

impl UploadCandidate {
    pub fn new(
        data: Vec<u8>,
        original_filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        UploadCandidate {
            data,
            original_filename: original_filename.into(),
            content_type: content_type.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Lower-cased extension of the declared filename, if any.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercased() {
        let candidate = UploadCandidate::new(vec![1, 2, 3], "Photo.JPG", "image/jpeg");
        assert_eq!(candidate.extension(), Some("jpg".to_string()));
        assert_eq!(candidate.size(), 3);
    }

    #[test]
    fn test_extension_missing() {
        let candidate = UploadCandidate::new(vec![], "noextension", "image/jpeg");
        assert_eq!(candidate.extension(), None);
    }
}
