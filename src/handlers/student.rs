//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::model::{NewStudent, Student, StudentPatch};
use crate::response::{success_created, success_many, success_message, success_ok};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct StudentsData {
    pub students: Vec<Student>,
}

#[derive(Serialize)]
pub struct StudentData {
    pub student: Student,
}

fn invalid_id() -> AppError {
    AppError::BadRequest("Invalid student ID provided".into())
}

/// Whole segment must be an integer.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.trim().parse().map_err(|_| invalid_id())
}

/// A segment axum cannot decode (e.g. invalid UTF-8) is an invalid id too.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i32, AppError> {
    let Path(id_str) = path.map_err(|_| invalid_id())?;
    parse_id(&id_str)
}

/// Oversized bodies keep their 413; every other rejection is a 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students", body = [Student]),
        (status = 500, description = "Database unavailable", body = ErrorBody)
    ),
    tag = "students"
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = state.students.get_all().await?;
    Ok(success_many(students.len(), StudentsData { students }))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No such student", body = ErrorBody)
    ),
    tag = "students"
)]
pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let student = state.students.get_by_id(id).await?;
    Ok(success_ok(StudentData { student }))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = NewStudent,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 413, description = "Body over the size limit", body = ErrorBody)
    ),
    tag = "students"
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let data = json_body(payload)?;
    let student = state.students.create(data).await?;
    Ok(success_created(
        "Student created successfully".into(),
        StudentData { student },
    ))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    request_body = StudentPatch,
    responses(
        (status = 200, description = "Student updated"),
        (status = 400, description = "Invalid id, no or blank fields, or nothing changed", body = ErrorBody),
        (status = 404, description = "No such student", body = ErrorBody)
    ),
    tag = "students"
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let patch = json_body(payload)?;
    state.students.update(id, &patch).await?;
    Ok(success_message(format!(
        "Student with ID {} updated successfully",
        id
    )))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No such student", body = ErrorBody)
    ),
    tag = "students"
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
