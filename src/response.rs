//! Standard `{status: "success", ...}` envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Success<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Success<T> {
    fn new(data: Option<T>) -> Self {
        Success {
            status: "success",
            message: None,
            results: None,
            data,
        }
    }
}

/// 200 with `data`.
pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::OK, Json(Success::new(Some(data))))
}

/// 200 with `results` (item count) and `data`.
pub fn success_many<T: Serialize>(results: usize, data: T) -> (StatusCode, Json<Success<T>>) {
    let mut body = Success::new(Some(data));
    body.results = Some(results);
    (StatusCode::OK, Json(body))
}

/// 201 with `message` and `data`.
pub fn success_created<T: Serialize>(message: String, data: T) -> (StatusCode, Json<Success<T>>) {
    let mut body = Success::new(Some(data));
    body.message = Some(message);
    (StatusCode::CREATED, Json(body))
}

/// 200 with `message` only.
pub fn success_message(message: String) -> (StatusCode, Json<Success<()>>) {
    let mut body = Success::new(None);
    body.message = Some(message);
    (StatusCode::OK, Json(body))
}
