//! Data access for student records.

mod memory;
mod postgres;
pub use memory::MemoryStudentRepository;
pub use postgres::PgStudentRepository;

use crate::error::AppError;
use crate::model::{Student, StudentPatch, ValidStudent};
use async_trait::async_trait;

/// Single-statement operations against the student table. Absence is reported
/// as `None`/`false`, never as an error.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError>;

    /// Insert and return the assigned id.
    async fn create(&self, student: &ValidStudent) -> Result<i32, AppError>;

    /// Apply the supplied fields. Returns `false` without touching storage when
    /// the patch is empty, otherwise whether a row was affected.
    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, AppError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    /// Connectivity check for readiness.
    async fn ping(&self) -> Result<(), AppError>;
}
