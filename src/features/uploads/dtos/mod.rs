mod upload_dto;

pub use upload_dto::{UploadFormDto, UploadRequest, UploadResponseDto, UploadedImage};
