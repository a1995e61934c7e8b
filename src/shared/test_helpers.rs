#[cfg(test)]
use crate::features::session::models::{SessionContext, UserRole};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_authority_session() -> SessionContext {
    SessionContext {
        email: "authority@safestreet.test".to_string(),
        role: UserRole::Authority,
        started_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
pub fn create_citizen_session() -> SessionContext {
    SessionContext {
        email: "citizen@safestreet.test".to_string(),
        role: UserRole::Citizen,
        started_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
async fn inject_authority_session_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_authority_session());
    next.run(request).await
}

#[cfg(test)]
pub fn with_authority_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(
        inject_authority_session_middleware,
    ))
}

#[cfg(test)]
async fn inject_citizen_session_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_citizen_session());
    next.run(request).await
}

#[cfg(test)]
pub fn with_citizen_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_citizen_session_middleware))
}
