//! Student API: CRUD REST backend for student records over PostgreSQL.

pub mod app;
pub mod config;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use app::build_app;
pub use config::{AppConfig, Environment};
pub use error::{AppError, ConfigError};
pub use model::{NewStudent, Student, StudentPatch};
pub use repository::{MemoryStudentRepository, PgStudentRepository, StudentRepository};
pub use service::StudentService;
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_student_table};
