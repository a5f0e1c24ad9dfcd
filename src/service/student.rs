//! Business rules for student records.

use crate::error::AppError;
use crate::model::{NewStudent, Student, StudentPatch};
use crate::repository::StudentRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        StudentService { repo }
    }

    pub fn repository(&self) -> &dyn StudentRepository {
        self.repo.as_ref()
    }

    pub async fn get_all(&self) -> Result<Vec<Student>, AppError> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Student, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with ID {} not found.", id)))
    }

    /// Insert and return the stored record as re-read from the repository.
    pub async fn create(&self, data: NewStudent) -> Result<Student, AppError> {
        let valid = data.validate().ok_or_else(|| {
            AppError::BadRequest("Missing required fields: s_name, s_course, or course_fee.".into())
        })?;
        let id = self.repo.create(&valid).await?;
        let student = self.repo.find_by_id(id).await?.ok_or_else(|| {
            tracing::error!(s_id = id, "created student could not be read back");
            AppError::Internal("Failed to create student. Please try again.".into())
        })?;
        tracing::info!(s_id = id, "student created");
        Ok(student)
    }

    /// Existence is checked before mutating; the check and the update are separate statements.
    pub async fn update(&self, id: i32, patch: &StudentPatch) -> Result<(), AppError> {
        if patch.is_empty() {
            return Err(AppError::BadRequest("No fields provided for update.".into()));
        }
        if patch.has_blank_text() {
            return Err(AppError::BadRequest("s_name and s_course cannot be empty.".into()));
        }
        self.get_by_id(id).await?;
        if !self.repo.update(id, patch).await? {
            return Err(AppError::BadRequest(format!(
                "Failed to update student with ID {}. No changes made.",
                id
            )));
        }
        tracing::info!(s_id = id, "student updated");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Student with ID {} not found", id)));
        }
        if !self.repo.delete(id).await? {
            return Err(AppError::Internal(format!("Failed to delete student with ID {}", id)));
        }
        tracing::info!(s_id = id, "student deleted");
        Ok(())
    }
}
