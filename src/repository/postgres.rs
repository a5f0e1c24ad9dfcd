//! PostgreSQL-backed repository using the shared pool.

use super::StudentRepository;
use crate::error::AppError;
use crate::model::{Student, StudentPatch, ValidStudent};
use crate::sql::{self, to_arguments, QueryBuf};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        PgStudentRepository { pool }
    }
}

fn trace_query(q: &QueryBuf) {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let q = sql::select_all();
        trace_query(&q);
        let rows = sqlx::query_as_with::<Postgres, Student, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        let q = sql::select_by_id(id);
        trace_query(&q);
        let row = sqlx::query_as_with::<Postgres, Student, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, student: &ValidStudent) -> Result<i32, AppError> {
        let q = sql::insert(student);
        trace_query(&q);
        let id = sqlx::query_scalar_with::<Postgres, i32, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, AppError> {
        let Some(q) = sql::update(id, patch) else {
            return Ok(false);
        };
        trace_query(&q);
        let result = sqlx::query_with(&q.sql, to_arguments(&q.params)?)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let q = sql::delete(id);
        trace_query(&q);
        let result = sqlx::query_with(&q.sql, to_arguments(&q.params)?)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
