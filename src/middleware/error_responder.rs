//! Single point producing client-visible error JSON.
//!
//! Handlers return `AppError`, whose `IntoResponse` attaches an [`ErrorReport`]
//! to the response. This layer picks the report up, logs it, and re-renders the
//! body for the configured environment.

use crate::config::Environment;
use crate::error::ErrorReport;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::any::Any;

pub async fn respond_with_error(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };
    tracing::error!(
        %method,
        %uri,
        status = report.status_code.as_u16(),
        kind = report.kind,
        stack = ?report.stack,
        "{}",
        report.message
    );
    report.into_response(environment.exposes_error_details())
}

/// Turns a handler panic into an unclassified 500 carrying the panic message.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "panic with non-string payload".to_string()
    };
    ErrorReport::unclassified(detail).into_response(false)
}
