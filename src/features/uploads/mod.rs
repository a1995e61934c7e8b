pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use clients::{HttpRoadClassifier, RoadClassifier};
pub use services::UploadService;
