use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::clients::ReportStore;
use crate::features::session::models::{SessionContext, UserRole};

struct SessionEntry {
    context: SessionContext,
    created_at: Instant,
}

/// In-memory session store. Credentials are checked against the report
/// store; a successful login materializes a session context behind an
/// opaque token, logout removes it, and entries expire after the
/// configured TTL.
pub struct SessionService {
    store: Arc<dyn ReportStore>,
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionService {
    pub fn new(store: Arc<dyn ReportStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            ttl: config.ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Session init boundary: verify credentials upstream, then create the
    /// context
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, SessionContext)> {
        let response = self.store.login(email, password).await?;

        if !response.success {
            return Err(AppError::Unauthorized(
                response
                    .message
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            ));
        }

        let role = match response.user_type.as_deref() {
            Some("authority") => UserRole::Authority,
            _ => UserRole::Citizen,
        };

        let context = SessionContext {
            email: email.to_string(),
            role,
            started_at: Utc::now(),
        };

        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(
            token.clone(),
            SessionEntry {
                context: context.clone(),
                created_at: Instant::now(),
            },
        );

        tracing::info!("Session started for {} ({:?})", context.email, context.role);
        Ok((token, context))
    }

    /// Returns the context behind a token, removing it if expired
    pub async fn resolve(&self, token: &str) -> Option<SessionContext> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(entry) if entry.created_at.elapsed() < self.ttl => Some(entry.context.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Session teardown boundary. Returns false when the token was already
    /// gone.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);
        if let Some(entry) = &removed {
            tracing::info!("Session ended for {}", entry.context.email);
        }
        removed.is_some()
    }
}
