//! Router assembly: routes, fallbacks, and the middleware stack.

use crate::config::Environment;
use crate::error::AppError;
use crate::middleware::{handle_panic, respond_with_error};
use crate::routes::{common_routes, student_routes};
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    http::{Method, Uri},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Can't find {} on this server", uri.path()))
}

async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::MethodNotAllowed(format!("Method {} is not allowed on {}", method, uri.path()))
}

/// Full application: common routes, student routes at `/api/students` and `/students`,
/// and the error responder wrapping everything.
pub fn build_app(state: AppState) -> Router {
    let environment = state.environment;
    let students = student_routes(state.clone());
    let routes = Router::new()
        .merge(common_routes(state))
        .nest("/api/students", students.clone())
        .nest("/students", students)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed);
    with_middleware(routes, environment)
}

/// Outermost first: tracing, error responder, panic catcher, body limit. Panics are
/// caught inside the responder so they are rendered like any other error.
fn with_middleware(routes: Router, environment: Environment) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(axum::middleware::from_fn_with_state(
                environment,
                respond_with_error,
            ))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("boom")
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn handler_panic_renders_through_the_error_responder() {
        let app = with_middleware(
            Router::new().route("/explode", get(explode)),
            Environment::Development,
        );
        let (status, body) = get_json(app, "/explode").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Something went wrong");
        assert_eq!(body["stack"], json!(["boom"]));
        assert_eq!(body["error"]["kind"], "unclassified");
        assert_eq!(body["error"]["status_code"], 500);
    }

    #[tokio::test]
    async fn handler_panic_in_production_shows_only_the_generic_message() {
        let app = with_middleware(
            Router::new().route("/explode", get(explode)),
            Environment::Production,
        );
        let (status, body) = get_json(app, "/explode").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"status": "error", "message": "Something went wrong"}));
    }
}
