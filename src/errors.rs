//! Error taxonomy for the record store.
//!
//! Four cases cover everything the store can report: a missing key on the
//! update path, a uniqueness violation on insert, a payload that failed
//! validation, and anything else the backend produced. Errors always surface
//! to the caller; nothing is logged-and-swallowed inside the store. Backend
//! details are logged (via `tracing`) only at the HTTP boundary and never
//! serialized into a response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

use crate::validation::ValidationErrors;

/// Error type returned by every store operation.
#[derive(Debug)]
pub enum StoreError {
    /// The requested key does not exist (update path only; lookups signal
    /// absence with `None` and deletes with `false`).
    NotFound {
        /// Resource type, e.g. "pet".
        resource: String,
        /// Key that was not found.
        id: Option<String>,
    },

    /// Insert or batch insert violated the unique-key invariant.
    DuplicateKey {
        /// Resource type, e.g. "pet".
        resource: String,
        /// Key that collided, when known.
        id: Option<String>,
    },

    /// The payload failed validation; the backend was never touched.
    Validation {
        /// One entry per failing field.
        errors: Vec<String>,
    },

    /// Any other storage-engine failure, propagated unchanged. No retry, no
    /// partial commit.
    Backend {
        /// Sanitized message sent to clients.
        message: String,
        /// The underlying error (logged, never sent to clients).
        internal: DbErr,
    },
}

impl StoreError {
    /// Create a `NotFound` error for a missing key.
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    /// Create a `DuplicateKey` error for a uniqueness violation.
    pub fn duplicate_key(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::DuplicateKey {
            resource: resource.into(),
            id,
        }
    }

    /// Create a `Validation` error from collected field failures.
    #[must_use]
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::Validation {
            errors: errors.errors().iter().map(ToString::to_string).collect(),
        }
    }

    /// Wrap a backend error. The `DbErr` is kept for logging but clients only
    /// ever see the generic message.
    #[must_use]
    pub fn backend(err: DbErr) -> Self {
        Self::Backend {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateKey { .. } => StatusCode::CONFLICT,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with key '{id}' not found"),
                None => format!("{resource} not found"),
            },
            Self::DuplicateKey { resource, id } => match id {
                Some(id) => format!("{resource} with key '{id}' already exists"),
                None => format!("{resource} already exists"),
            },
            Self::Validation { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::Backend { message, .. } => message.clone(),
        }
    }

    /// Log internal detail. Only backend errors carry anything worth hiding;
    /// the rest go out at debug level for visibility.
    fn log_internal(&self) {
        match self {
            Self::Backend { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Store error"
                );
            }
        }
    }
}

/// Sanitized error body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::Validation { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for StoreError {}

/// Convert a Sea-ORM error into a `StoreError`.
///
/// Unique-constraint violations become `DuplicateKey` so that batch inserts
/// can report the uniqueness invariant instead of a generic backend failure.
/// `RecordNotFound` becomes `NotFound`. Everything else is a `Backend` error.
impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return Self::DuplicateKey {
                resource: "record".to_string(),
                id: None,
            };
        }
        match &err {
            DbErr::RecordNotFound(_) => Self::not_found("record", None),
            _ => Self::backend(err),
        }
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}
