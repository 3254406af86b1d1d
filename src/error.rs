use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;

/// Failures that stop the service from starting or running.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to configure database pool: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to build {client} client: {source}")]
    Client {
        client: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Errors returned from HTTP handlers, rendered as
/// `{"error": ..., "details": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// An upstream call (social graph, classifier, database) failed.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn upstream(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Upstream {
            message,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Upstream { source, .. } => Some(format!("{source:#}")),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Upstream { message, source } = &self {
            error!(error = %format!("{source:#}"), "{message}");
        }
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}
