//! Connection pool lifecycle and table DDL.

use crate::config::DbConfig;
use crate::error::AppError;
use crate::sql;
use sqlx::postgres::PgPoolOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;

/// Open the bounded pool. Fails if no connection can be established.
pub async fn connect(config: &DbConfig) -> Result<PgPool, AppError> {
    let opts = config.connect_options()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect_with(opts)
        .await?;
    tracing::info!(pool_size = config.pool_size, "connected to the database pool");
    Ok(pool)
}

/// Create the configured database if it does not exist, connecting through the `postgres` maintenance database.
pub async fn ensure_database_exists(config: &DbConfig) -> Result<(), AppError> {
    let opts = config.connect_options()?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = opts.database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Create the `student` table if missing.
pub async fn ensure_student_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(&sql::create_table()).execute(pool).await?;
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("college_db"), "\"college_db\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
