//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::error::Error as _;
use thiserror::Error;

/// Message reported in production for server faults that carry no application message.
pub const GENERIC_SERVER_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// `fail` for client faults (4xx), `error` for everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    Fail,
    Error,
}

impl ErrorStatus {
    pub fn from_code(code: StatusCode) -> Self {
        if code.as_str().starts_with('4') {
            ErrorStatus::Fail
        } else {
            ErrorStatus::Error
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) | AppError::Db(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn status(&self) -> ErrorStatus {
        ErrorStatus::from_code(self.status_code())
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::MethodNotAllowed(_) => "method_not_allowed",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Internal(_) => "internal",
            AppError::Db(_) => "database_error",
            AppError::Config(_) => "config_error",
        }
    }

    /// Expected failures raised deliberately by the application, as opposed to faults
    /// bubbling up from the driver or configuration.
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_)
                | AppError::NotFound(_)
                | AppError::MethodNotAllowed(_)
                | AppError::PayloadTooLarge(_)
                | AppError::Internal(_)
        )
    }

    pub fn report(&self) -> ErrorReport {
        let mut stack = vec![self.to_string()];
        let mut source = self.source();
        while let Some(err) = source {
            stack.push(err.to_string());
            source = err.source();
        }
        ErrorReport {
            status_code: self.status_code(),
            kind: self.kind(),
            message: self.to_string(),
            operational: self.is_operational(),
            stack,
            detail: format!("{:?}", self),
        }
    }
}

/// Snapshot of a failed request, attached to the response so the error responder
/// can render and log it in one place.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub status_code: StatusCode,
    pub kind: &'static str,
    pub message: String,
    pub operational: bool,
    pub stack: Vec<String>,
    pub detail: String,
}

impl ErrorReport {
    /// Report for a fault that never became an `AppError` (e.g. a handler panic).
    pub fn unclassified(detail: String) -> Self {
        ErrorReport {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "unclassified",
            message: GENERIC_SERVER_MESSAGE.into(),
            operational: false,
            stack: vec![detail.clone()],
            detail,
        }
    }

    pub fn status(&self) -> ErrorStatus {
        ErrorStatus::from_code(self.status_code)
    }

    /// Build the client-visible body. Diagnostics are only attached when `expose_details` is set.
    pub fn body(&self, expose_details: bool) -> ErrorBody {
        let message = if expose_details || self.operational {
            self.message.clone()
        } else {
            GENERIC_SERVER_MESSAGE.into()
        };
        ErrorBody {
            status: self.status(),
            message,
            stack: expose_details.then(|| self.stack.clone()),
            error: expose_details.then(|| ErrorDetail {
                kind: self.kind.to_string(),
                status_code: self.status_code.as_u16(),
                detail: self.detail.clone(),
            }),
        }
    }

    pub fn into_response(self, expose_details: bool) -> Response {
        let body = self.body(expose_details);
        let status = self.status_code;
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct ErrorBody {
    #[schema(value_type = String, example = "fail")]
    pub status: ErrorStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub kind: String,
    pub status_code: u16,
    pub detail: String,
}

impl IntoResponse for AppError {
    /// Renders the production-safe body; the error responder middleware re-renders it
    /// with diagnostics outside production and logs it.
    fn into_response(self) -> Response {
        self.report().into_response(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_leading_digit() {
        assert_eq!(ErrorStatus::from_code(StatusCode::BAD_REQUEST), ErrorStatus::Fail);
        assert_eq!(ErrorStatus::from_code(StatusCode::NOT_FOUND), ErrorStatus::Fail);
        assert_eq!(ErrorStatus::from_code(StatusCode::CONFLICT), ErrorStatus::Fail);
        assert_eq!(
            ErrorStatus::from_code(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorStatus::Error
        );
        assert_eq!(
            ErrorStatus::from_code(StatusCode::SERVICE_UNAVAILABLE),
            ErrorStatus::Error
        );
    }

    #[test]
    fn variants_map_to_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::PayloadTooLarge("x".into()).status(),
            ErrorStatus::Fail
        );
        assert_eq!(
            AppError::MethodNotAllowed("x".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Db(sqlx::Error::PoolClosed).status(),
            ErrorStatus::Error
        );
    }

    #[test]
    fn production_body_hides_driver_details() {
        let report = AppError::Db(sqlx::Error::PoolTimedOut).report();
        let body = report.body(false);
        assert_eq!(body.message, GENERIC_SERVER_MESSAGE);
        assert!(body.stack.is_none());
        assert!(body.error.is_none());
    }

    #[test]
    fn production_body_keeps_operational_messages() {
        let report = AppError::Internal("Failed to delete student with ID 3".into()).report();
        let body = report.body(false);
        assert_eq!(body.message, "Failed to delete student with ID 3");
        assert_eq!(body.status, ErrorStatus::Error);
    }

    #[test]
    fn development_body_includes_source_chain() {
        let report = AppError::Db(sqlx::Error::PoolTimedOut).report();
        let body = report.body(true);
        let stack = body.stack.unwrap_or_default();
        assert_eq!(stack.len(), 2);
        assert!(stack[0].starts_with("database: "));
        let detail = body.error.map(|e| e.kind).unwrap_or_default();
        assert_eq!(detail, "database_error");
    }
}
