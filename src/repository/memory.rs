//! In-process repository backing the test suite.

use super::StudentRepository;
use crate::error::AppError;
use crate::model::{Student, StudentPatch, ValidStudent};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Student>,
    last_id: i32,
}

/// Behaves like the SQL table: ids start at 1, are never reused, and rows come
/// back ordered by id.
#[derive(Default)]
pub struct MemoryStudentRepository {
    table: RwLock<Table>,
    unavailable: AtomicBool,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing the database: every call fails with a pool error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        self.check()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        self.check()?;
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, student: &ValidStudent) -> Result<i32, AppError> {
        self.check()?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let s_id = table.last_id;
        table.rows.insert(
            s_id,
            Student {
                s_id,
                s_name: student.s_name.clone(),
                s_course: student.s_course.clone(),
                course_fee: student.course_fee,
            },
        );
        Ok(s_id)
    }

    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, AppError> {
        self.check()?;
        if patch.is_empty() {
            return Ok(false);
        }
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(student) => {
                patch.apply_to(student);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(name: &str) -> ValidStudent {
        ValidStudent {
            s_name: name.into(),
            s_course: "CS".into(),
            course_fee: 100.0,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryStudentRepository::new();
        let first = repo.create(&valid("A")).await.unwrap();
        assert!(repo.delete(first).await.unwrap());
        let second = repo.create(&valid("B")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn update_reports_missing_rows_and_empty_patches() {
        let repo = MemoryStudentRepository::new();
        let id = repo.create(&valid("A")).await.unwrap();
        assert!(!repo.update(id, &StudentPatch::default()).await.unwrap());
        let patch = StudentPatch {
            s_name: Some("B".into()),
            ..Default::default()
        };
        assert!(!repo.update(id + 1, &patch).await.unwrap());
        assert!(repo.update(id, &patch).await.unwrap());
    }

    #[tokio::test]
    async fn unavailable_fails_every_call() {
        let repo = MemoryStudentRepository::new();
        repo.set_unavailable(true);
        assert!(matches!(repo.find_all().await, Err(AppError::Db(_))));
        assert!(repo.ping().await.is_err());
        repo.set_unavailable(false);
        assert!(repo.ping().await.is_ok());
    }
}
