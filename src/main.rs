//! Server binary: loads configuration, opens the pool, ensures the table, serves until shutdown.

use std::sync::Arc;
use student_api::{
    build_app, connect, ensure_database_exists, ensure_student_table, AppConfig, AppState,
    PgStudentRepository, StudentService,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_api=info,tower_http=info")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    ensure_database_exists(&config.db).await?;
    let pool = match connect(&config.db).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(
                error = %err,
                "failed to connect to the database pool; check the database configuration and that PostgreSQL is running"
            );
            return Err(err.into());
        }
    };
    ensure_student_table(&pool).await?;

    let state = AppState {
        students: StudentService::new(Arc::new(PgStudentRepository::new(pool.clone()))),
        environment: config.environment,
    };
    let app = build_app(state);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(
        environment = ?config.environment,
        "listening on http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
