mod upload_service;

pub use upload_service::{UploadService, ALLOWED_IMAGE_TYPES, KNOWN_DISTRICTS};
