use std::env;
use std::time::Duration;

use crate::shared::constants::DEFAULT_FALLBACK_ADDRESS;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub report_store: ReportStoreConfig,
    pub classifier: ClassifierConfig,
    pub session: SessionConfig,
    pub reports: ReportsConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Upstream report store (source of truth for raw report records)
#[derive(Debug, Clone)]
pub struct ReportStoreConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Road damage classification service
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    /// Classification label that permits a report submission
    pub required_label: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct ReportsConfig {
    /// Display address substituted when a structured location has no
    /// address field
    pub fallback_address: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            report_store: ReportStoreConfig::from_env()?,
            classifier: ClassifierConfig::from_env()?,
            session: SessionConfig::from_env()?,
            reports: ReportsConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ReportStoreConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("REPORT_STORE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

        let request_timeout_secs = env::var("REPORT_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "REPORT_STORE_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

impl ClassifierConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("CLASSIFIER_URL").unwrap_or_else(|_| "http://localhost:5001".to_string());

        let request_timeout_secs = env::var("CLASSIFIER_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CLASSIFIER_TIMEOUT_SECS must be a valid number".to_string())?;

        let required_label =
            env::var("CLASSIFIER_REQUIRED_LABEL").unwrap_or_else(|_| "Road".to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(request_timeout_secs),
            required_label,
        })
    }
}

impl SessionConfig {
    const DEFAULT_TTL_SECS: u64 = 86400; // 24 hours

    pub fn from_env() -> Result<Self, String> {
        let ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl ReportsConfig {
    pub fn from_env() -> Result<Self, String> {
        let fallback_address = env::var("FALLBACK_ADDRESS")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_ADDRESS.to_string());

        Ok(Self { fallback_address })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "SafeStreet API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for SafeStreet".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
