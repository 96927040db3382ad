use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};
use axum_helpers::{
    ObjectIdPath, ResponseMode, ValidatedPayload,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProjectResult;
use crate::models::{Project, ProjectInput, blank_form};
use crate::repository::ProjectRepository;
use crate::service::ProjectService;

/// Where display-mode mutations redirect to; matches the `/api`
/// nesting applied by the router bootstrap.
const LISTING_PATH: &str = "/api/projects";

/// OpenAPI documentation for the Projects API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_projects,
        add_form,
        get_project,
        create_project,
        edit_project,
        update_project,
        delete_project,
    ),
    components(
        schemas(Project, ProjectInput),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Projects", description = "Project management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the projects router with all HTTP endpoints.
pub fn router<R: ProjectRepository + 'static>(service: ProjectService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_projects))
        .route("/add", get(add_form))
        .route("/{id}", get(get_project))
        .route("/create", post(create_project))
        .route("/edit/{id}", get(edit_project))
        .route("/update/{id}", put(update_project))
        .route("/delete/{id}", delete(delete_project))
        .with_state(shared_service)
}

/// On success, display-mode clients (browser form posts) get a redirect
/// back to the listing; structured clients get the given response.
fn mutation_response(mode: ResponseMode, structured: Response) -> Response {
    if mode.is_display() {
        Redirect::to(LISTING_PATH).into_response()
    } else {
        structured
    }
}

/// List all projects
#[utoipa::path(
    get,
    path = "",
    tag = "Projects",
    responses(
        (status = 200, description = "All projects, unfiltered", body = Vec<Project>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_projects<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
) -> ProjectResult<Json<Vec<Project>>> {
    let projects = service.list_projects().await?;
    Ok(Json(projects))
}

/// Blank create-form data
#[utoipa::path(
    get,
    path = "/add",
    tag = "Projects",
    responses(
        (status = 200, description = "External field names with empty values", body = serde_json::Value)
    )
)]
async fn add_form() -> Json<serde_json::Value> {
    Json(blank_form())
}

/// Get a project by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProjectResult<Json<Project>> {
    let project = service.get_project(id).await?;
    Ok(Json(project))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "/create",
    tag = "Projects",
    request_body = ProjectInput,
    responses(
        (status = 201, description = "Project created successfully", body = Project),
        (status = 303, description = "Created; redirect to the listing (display mode)"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    mode: ResponseMode,
    ValidatedPayload(input): ValidatedPayload<ProjectInput>,
) -> ProjectResult<Response> {
    let project = service.create_project(input).await?;
    Ok(mutation_response(
        mode,
        (StatusCode::CREATED, Json(project)).into_response(),
    ))
}

/// Get a project reformatted for an edit form
#[utoipa::path(
    get,
    path = "/edit/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "External field names, dates as YYYY-MM-DD", body = serde_json::Value),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn edit_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProjectResult<Json<serde_json::Value>> {
    let project = service.get_project(id).await?;
    let form = project.edit_form()?;
    Ok(Json(form))
}

/// Replace all fields of a project
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID (24 hex characters)")
    ),
    request_body = ProjectInput,
    responses(
        (status = 200, description = "Project replaced successfully", body = Project),
        (status = 303, description = "Replaced; redirect to the listing (display mode)"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    mode: ResponseMode,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedPayload(input): ValidatedPayload<ProjectInput>,
) -> ProjectResult<Response> {
    let project = service.update_project(id, input).await?;
    Ok(mutation_response(mode, Json(project).into_response()))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Project deleted successfully"),
        (status = 303, description = "Deleted; redirect to the listing (display mode)"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    mode: ResponseMode,
    ObjectIdPath(id): ObjectIdPath,
) -> ProjectResult<Response> {
    service.delete_project(id).await?;
    Ok(mutation_response(
        mode,
        StatusCode::NO_CONTENT.into_response(),
    ))
}
