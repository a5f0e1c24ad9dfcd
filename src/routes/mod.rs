//! Route tables.

mod common;
mod student;
pub use common::common_routes;
pub use student::student_routes;
