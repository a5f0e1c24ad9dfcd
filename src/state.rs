//! Shared application state for all routes.

use crate::config::Environment;
use crate::service::StudentService;

#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub environment: Environment,
}
