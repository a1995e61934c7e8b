use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Citizen,
    Authority,
}

/// Explicit session state, created on login and torn down on logout.
/// Passed to handlers through request extensions; nothing reads ambient
/// global state.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionContext {
    pub email: String,
    pub role: UserRole,
    pub started_at: DateTime<Utc>,
}

/// Opaque bearer token identifying a session
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);
