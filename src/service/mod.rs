//! StudentService: existence and required-field rules over a repository.

mod student;
pub use student::StudentService;
