//! OpenAPI document for the student routes.

use crate::error::{ErrorBody, ErrorDetail};
use crate::model::{NewStudent, Student, StudentPatch};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student API",
        description = "CRUD operations on student records."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::handlers::student::list,
        crate::handlers::student::read,
        crate::handlers::student::create,
        crate::handlers::student::update,
        crate::handlers::student::delete,
    ),
    components(schemas(Student, NewStudent, StudentPatch, ErrorBody, ErrorDetail)),
    tags((name = "students", description = "Student records"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_student_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/students"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/students/{id}"));
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("Student"));
        assert!(components.schemas.contains_key("ErrorBody"));
    }
}
