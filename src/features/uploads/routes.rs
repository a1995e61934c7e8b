use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::uploads::handlers::{self, UploadState};
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature
///
/// Requires a session (middleware applied by the caller); any logged-in
/// user may upload
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    let state = UploadState { upload_service };

    Router::new()
        .route("/api/uploads", post(handlers::submit_upload))
        .with_state(state)
}
