use async_trait::async_trait;
use log::warn;

use super::uploads_model::{StoredObject, UploadRequest};
use crate::errors::Result;
use crate::messages::Attachment;

/// Object storage collaborator.
///
/// Single attempt, keyed by the original filename. Implementations report any
/// failure as `Error::Upload`.
#[async_trait]
pub trait ObjectStorageTrait: Send + Sync {
    async fn put(&self, request: UploadRequest) -> Result<StoredObject>;
}

/// Validates a request, hands it to the object store and returns the
/// attachment descriptor to persist with a message.
pub async fn store_attachment(
    storage: &dyn ObjectStorageTrait,
    request: UploadRequest,
) -> Result<Attachment> {
    request.validate()?;
    let filename = request.filename.clone();
    let stored = storage.put(request).await.map_err(|e| {
        warn!("Upload of {} failed: {}", filename, e);
        e
    })?;
    Ok(stored.into_attachment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, ErrorKind};
    use std::sync::{Arc, Mutex};

    // --- Mock ObjectStorage ---
    #[derive(Default)]
    struct MockObjectStorage {
        fail: bool,
        puts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ObjectStorageTrait for MockObjectStorage {
        async fn put(&self, request: UploadRequest) -> Result<StoredObject> {
            if self.fail {
                return Err(Error::Upload("bucket unreachable".to_string()));
            }
            self.puts.lock().unwrap().push(request.filename.clone());
            Ok(StoredObject {
                url: format!("https://files.example/{}", request.filename),
                pathname: request.filename,
                content_type: request.content_type,
            })
        }
    }

    fn png(name: &str) -> UploadRequest {
        UploadRequest {
            filename: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_store_attachment_returns_url() {
        let storage = MockObjectStorage::default();
        let attachment = store_attachment(&storage, png("cat.png")).await.unwrap();
        assert_eq!(attachment.url, "https://files.example/cat.png");
        assert_eq!(attachment.content_type, "image/png");
        assert_eq!(storage.puts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_storage() {
        let storage = MockObjectStorage::default();
        let mut request = png("doc.pdf");
        request.content_type = "application/pdf".to_string();

        let err = store_attachment(&storage, request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(storage.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_surfaced() {
        let storage = MockObjectStorage {
            fail: true,
            ..Default::default()
        };
        let err = store_attachment(&storage, png("cat.png")).await.unwrap_err();
        assert!(matches!(err, Error::Upload(_)));
    }
}
