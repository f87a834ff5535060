use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::messages::Attachment;

/// Largest accepted payload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Media types accepted for upload, matched exactly.
pub const ALLOWED_UPLOAD_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// A file handed to the object storage collaborator.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    /// Checks size and media type. All violations are reported together.
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() {
            return Err(ValidationError::MissingField("filename".to_string()).into());
        }
        if self.bytes.is_empty() {
            return Err(ValidationError::MissingField("file".to_string()).into());
        }

        let mut problems = Vec::new();
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            problems.push("File size should be less than 5MB");
        }
        if !ALLOWED_UPLOAD_TYPES.contains(&self.content_type.as_str()) {
            problems.push("File type should be JPEG or PNG");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_input(problems.join(", ")))
        }
    }
}

/// Where an uploaded object ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub url: String,
    pub pathname: String,
    pub content_type: String,
}

impl StoredObject {
    pub fn into_attachment(self) -> Attachment {
        Attachment {
            url: self.url,
            name: self.pathname,
            content_type: self.content_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn request(content_type: &str, size: usize) -> UploadRequest {
        UploadRequest {
            filename: "photo.png".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_accepts_png_and_jpeg_up_to_limit() {
        assert!(request("image/png", 1024).validate().is_ok());
        assert!(request("image/jpeg", MAX_UPLOAD_BYTES).validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let err = request("image/png", MAX_UPLOAD_BYTES + 1).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("less than 5MB"));
    }

    #[test]
    fn test_rejects_other_media_types_and_reports_all_problems() {
        assert!(request("image/gif", 10).validate().is_err());
        assert!(request("image/PNG", 10).validate().is_err());

        let err = request("application/pdf", MAX_UPLOAD_BYTES + 1)
            .validate()
            .unwrap_err();
        let reason = err.to_string();
        assert!(reason.contains("5MB"));
        assert!(reason.contains("JPEG or PNG"));
    }

    #[test]
    fn test_rejects_empty_payload() {
        assert!(request("image/png", 0).validate().is_err());
    }

    #[test]
    fn test_stored_object_becomes_attachment() {
        let attachment = StoredObject {
            url: "https://bucket.example/photo.png".to_string(),
            pathname: "photo.png".to_string(),
            content_type: "image/png".to_string(),
        }
        .into_attachment();
        assert_eq!(attachment.name, "photo.png");
        assert_eq!(attachment.url, "https://bucket.example/photo.png");
    }
}
