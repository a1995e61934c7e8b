use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::session::models::{SessionContext, UserRole};

/// Request DTO for login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    /// Opaque session token
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    pub email: String,
    pub role: UserRole,
}

/// Current session info
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub email: String,
    pub role: UserRole,
    pub started_at: DateTime<Utc>,
}

impl From<SessionContext> for MeResponseDto {
    fn from(context: SessionContext) -> Self {
        Self {
            email: context.email,
            role: context.role,
            started_at: context.started_at,
        }
    }
}
