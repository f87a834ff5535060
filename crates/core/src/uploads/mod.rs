//! Uploads module - contract with the object storage collaborator.
//!
//! Binary payloads never reach the database; only the returned URL is stored,
//! as a message [`Attachment`](crate::messages::Attachment) or document content.

mod uploads_model;
mod uploads_traits;

pub use uploads_model::{StoredObject, UploadRequest, ALLOWED_UPLOAD_TYPES, MAX_UPLOAD_BYTES};
pub use uploads_traits::{store_attachment, ObjectStorageTrait};
