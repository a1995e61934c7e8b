use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::session::handlers;
use crate::features::session::services::SessionService;

/// Public routes (no session required)
pub fn public_routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .with_state(service)
}

/// Protected routes (require session middleware to be applied by caller)
pub fn protected_routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/me", get(handlers::get_me))
        .with_state(service)
}
