use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures talking to the Football Data API
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resource not found at {url}")]
    NotFound { url: String },

    #[error("still rate limited after retry: {url}")]
    RateLimited { url: String },

    #[error("missing or invalid X-RequestCounter-Reset header on 429 from {url}")]
    InvalidRetryHeader { url: String },

    #[error("advertised rate-limit wait of {wait_secs}s on {url} exceeds the configured maximum")]
    RetryTooLong { url: String, wait_secs: u64 },

    #[error("invalid football API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: reqwest::StatusCode, url: String },

    #[error("invalid provider payload: {0}")]
    Decode(String),
}

/// Failures that abort a league import. Either variant rolls back the
/// import transaction.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("league code must not be empty")]
    EmptyLeagueCode,

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not in the correct format: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("football API client: {0}")]
    FootballApi(#[from] ProviderError),
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Conflict(String),
    /// Provider or storage failure on the import endpoints
    GatewayTimeout,
    DatabaseError(sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::GatewayTimeout => (StatusCode::GATEWAY_TIMEOUT, "Server Error".to_string()),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return ApiError::Conflict("Resource already exists".to_string());
            }
            if db_err.is_foreign_key_violation() {
                return ApiError::Conflict("Resource is referenced by imported data".to_string());
            }
        }
        ApiError::DatabaseError(err)
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::EmptyLeagueCode => ApiError::BadRequest(err.to_string()),
            ImportError::Provider(_) | ImportError::Storage(_) => {
                tracing::error!("League import failed: {}", err);
                ApiError::GatewayTimeout
            }
        }
    }
}
