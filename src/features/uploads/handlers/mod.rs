pub mod upload_handler;

pub use upload_handler::{submit_upload, UploadState};
