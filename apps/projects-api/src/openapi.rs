//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Projects API",
        version = "0.1.0",
        description = "REST API for managing projects over MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/projects", api = domain_projects::ApiDoc)
    ),
    tags(
        (name = "Projects", description = "Project management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
