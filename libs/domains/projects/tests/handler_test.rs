//! Handler tests for the Projects domain
//!
//! These drive the domain router directly with `oneshot` requests
//! against the in-memory repository: request deserialization, status
//! codes, response-mode negotiation, and error responses. The full
//! application wiring (CORS, docs, /api nesting) is not under test
//! here, except for the method-override middleware where noted.

use ::mongodb::bson::oid::ObjectId;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_projects::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::{Layer, ServiceExt};

fn app() -> axum::Router {
    let service = ProjectService::new(MemoryProjectRepository::new());
    handlers::router(service)
}

fn sample_body(name: &str) -> Value {
    json!({
        "project_name": name,
        "project_description": "Handler test project",
        "jobs_done": "Initial setup",
        "project_price": 1000.0,
        "start_date": "2023-01-01",
        "end_date": "2023-06-01",
        "members": ["alice", "bob"]
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn stored_id(body: &Value) -> String {
    body["_id"]["$oid"].as_str().unwrap().to_string()
}

async fn create_project(app: &axum::Router, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/create", &sample_body(name)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let app = app();

    let created = create_project(&app, "Round trip").await;
    assert_eq!(created["naziv_projekta"], "Round trip");
    assert_eq!(created["cijena_projekta"], 1000.0);
    assert_eq!(created["clanovi"], json!(["alice", "bob"]));

    let id = stored_id(&created);
    let response = app.oneshot(get_request(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = json_body(response.into_body()).await;
    assert_eq!(fetched["naziv_projekta"], created["naziv_projekta"]);
    assert_eq!(fetched["cijena_projekta"], created["cijena_projekta"]);
    assert_eq!(fetched["clanovi"], created["clanovi"]);
    assert_eq!(fetched["datum_pocetka"], created["datum_pocetka"]);
    assert_eq!(fetched["datum_zavrsetka"], created["datum_zavrsetka"]);
}

#[tokio::test]
async fn test_create_accepts_form_body_with_members_blob() {
    let app = app();

    let body = "project_name=Form+project&project_description=From+a+form\
                &jobs_done=Paperwork&project_price=250\
                &start_date=2023-01-01&end_date=2023-06-01\
                &members%5B%5D=%5B%22alice%22%2C%22bob%22%5D";
    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response.into_body()).await;
    assert_eq!(created["naziv_projekta"], "Form project");
    assert_eq!(created["clanovi"], json!(["alice", "bob"]));
}

#[tokio::test]
async fn test_create_rejects_missing_field() {
    let app = app();

    let mut body = sample_body("Invalid");
    body.as_object_mut().unwrap().remove("project_description");

    let response = app
        .oneshot(json_request("POST", "/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_unparseable_date() {
    let app = app();

    let mut body = sample_body("Bad date");
    body["start_date"] = json!("January 1st");

    let response = app
        .oneshot(json_request("POST", "/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_empty_name_with_details() {
    let app = app();

    let mut body = sample_body("x");
    body["project_name"] = json!("");

    let response = app
        .oneshot(json_request("POST", "/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert!(error["details"].get("project_name").is_some());
}

/// Repository that fails the test if any storage call is made.
struct UnreachableRepository;

#[async_trait]
impl ProjectRepository for UnreachableRepository {
    async fn find_all(&self) -> ProjectResult<Vec<Project>> {
        panic!("storage must not be reached");
    }
    async fn find_by_id(&self, _id: ObjectId) -> ProjectResult<Option<Project>> {
        panic!("storage must not be reached");
    }
    async fn insert(&self, _project: &Project) -> ProjectResult<()> {
        panic!("storage must not be reached");
    }
    async fn replace(&self, _project: &Project) -> ProjectResult<bool> {
        panic!("storage must not be reached");
    }
    async fn delete(&self, _id: ObjectId) -> ProjectResult<bool> {
        panic!("storage must not be reached");
    }
}

#[tokio::test]
async fn test_malformed_id_is_rejected_before_storage() {
    let service = ProjectService::new(UnreachableRepository);
    let app = handlers::router(service);

    for request in [
        get_request("/abc123"),
        get_request("/edit/abc123"),
        json_request("PUT", "/update/abc123", &sample_body("x")),
        Request::builder()
            .method("DELETE")
            .uri("/delete/abc123")
            .body(Body::empty())
            .unwrap(),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error = json_body(response.into_body()).await;
        assert_eq!(error["error"], "INVALID_OBJECT_ID");
    }
}

#[tokio::test]
async fn test_read_missing_project_returns_404() {
    let app = app();

    let id = ObjectId::new().to_hex();
    let response = app.oneshot(get_request(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error = json_body(response.into_body()).await;
    assert_eq!(error["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_replaces_every_editable_field() {
    let app = app();

    let created = create_project(&app, "Original").await;
    let id = stored_id(&created);

    let replacement = json!({
        "project_name": "Replaced",
        "project_description": "Entirely new",
        "jobs_done": "All of it",
        "project_price": 9999.5,
        "start_date": "2024-03-03",
        "end_date": "2024-09-09",
        "members": ["carol"]
    });

    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/update/{}", id), &replacement))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response.into_body()).await;
    assert_eq!(stored_id(&updated), id);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["naziv_projekta"], "Replaced");
    assert_eq!(updated["opis_projekta"], "Entirely new");
    assert_eq!(updated["obavljeni_poslovi"], "All of it");
    assert_eq!(updated["cijena_projekta"], 9999.5);
    assert_eq!(updated["clanovi"], json!(["carol"]));
    assert_ne!(updated["datum_pocetka"], created["datum_pocetka"]);
    assert_ne!(updated["datum_zavrsetka"], created["datum_zavrsetka"]);
}

#[tokio::test]
async fn test_update_missing_project_returns_404() {
    let app = app();

    let id = ObjectId::new().to_hex();
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/update/{}", id),
            &sample_body("x"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_terminal() {
    let app = app();

    let created = create_project(&app, "Doomed").await;
    let id = stored_id(&created);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/delete/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A second delete also reports not found
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/delete/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_reflects_created_projects_exactly() {
    let app = app();

    let mut ids = std::collections::HashSet::new();
    for name in ["One", "Two", "Three"] {
        ids.insert(stored_id(&create_project(&app, name).await));
    }

    let response = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = json_body(response.into_body()).await;
    let listed_ids: std::collections::HashSet<String> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(stored_id)
        .collect();
    assert_eq!(listed_ids, ids);
    assert_eq!(listed.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_repeated_create_never_deduplicates() {
    let app = app();

    create_project(&app, "Twin").await;
    create_project(&app, "Twin").await;

    let response = app.oneshot(get_request("/")).await.unwrap();
    let listed = json_body(response.into_body()).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_form_lists_blank_external_fields() {
    let app = app();

    let response = app.oneshot(get_request("/add")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let form = json_body(response.into_body()).await;
    assert_eq!(form["project_name"], "");
    assert_eq!(form["project_price"], "");
    assert_eq!(form["members"], json!([]));
}

#[tokio::test]
async fn test_edit_form_uses_external_names_and_plain_dates() {
    let app = app();

    let created = create_project(&app, "Editable").await;
    let id = stored_id(&created);

    let response = app
        .oneshot(get_request(&format!("/edit/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let form = json_body(response.into_body()).await;
    assert_eq!(form["project_name"], "Editable");
    assert_eq!(form["start_date"], "2023-01-01");
    assert_eq!(form["end_date"], "2023-06-01");
    assert_eq!(form["id"], id);
    assert!(form.get("naziv_projekta").is_none());
}

#[tokio::test]
async fn test_display_mode_create_redirects_to_listing() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .header("content-type", "application/json")
        .header(header::ACCEPT, "text/html")
        .body(Body::from(
            serde_json::to_string(&sample_body("Browser")).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/projects"
    );
}

#[tokio::test]
async fn test_display_mode_error_is_still_structured_json() {
    let app = app();

    let id = ObjectId::new().to_hex();
    let request = Request::builder()
        .uri(format!("/{}", id))
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error = json_body(response.into_body()).await;
    assert_eq!(error["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_form_post_with_method_override_drives_update() {
    // Browser forms can only POST; the override layer wraps the whole
    // router so _method=PUT is rewritten before routing. Layered inside
    // the router the PUT-only route would answer 405 first.
    let service = ProjectService::new(MemoryProjectRepository::new());
    let router = handlers::router(service);
    let app = axum::middleware::from_fn(axum_helpers::method_override).layer(router.clone());

    let created = create_project(&router, "Form target").await;
    let id = stored_id(&created);

    let body = "_method=PUT&project_name=Overridden&project_description=Via+form\
                &jobs_done=Everything&project_price=42\
                &start_date=2024-01-01&end_date=2024-02-01\
                &members%5B%5D=%5B%5D";
    let request = Request::builder()
        .method("POST")
        .uri(format!("/update/{}", id))
        .header("content-type", "application/x-www-form-urlencoded")
        .header(header::ACCEPT, "text/html")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = router
        .oneshot(get_request(&format!("/{}", id)))
        .await
        .unwrap();
    let fetched = json_body(response.into_body()).await;
    assert_eq!(fetched["naziv_projekta"], "Overridden");
}
