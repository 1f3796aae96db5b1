//! Integration tests for stockroom-core

use serde::Deserialize;
use stockroom_core::*;

#[derive(Debug, Deserialize)]
struct Lookup {
    id: Option<String>,
    #[serde(rename = "includePhoto")]
    include_photo: Option<String>,
}

fn form_request(method: &str, path: &str, content_type: &str, body: &[u8]) -> HttpRequest {
    let mut req = HttpRequest::new(method.to_string(), path.to_string());
    req.headers
        .insert("content-type".to_string(), content_type.to_string());
    req.body = body.to_vec();
    req
}

#[test]
fn test_http_request_creation() {
    let req = HttpRequest::new("GET".to_string(), "/inventory".to_string());
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/inventory");
    assert!(req.headers.is_empty());
    assert!(req.body.is_empty());
}

#[test]
fn test_http_response_creation() {
    assert_eq!(HttpResponse::ok().status, 200);
    assert_eq!(HttpResponse::new(201).status, 201);
    assert_eq!(HttpResponse::text("Deleted").with_status(404).status, 404);
    assert!(HttpResponse::new(500).is_server_error());
}

#[test]
fn test_http_response_with_json() {
    let res = HttpResponse::ok()
        .with_json(&serde_json::json!([{"id": "1", "photo": null}]))
        .unwrap();

    assert_eq!(
        res.headers.get("Content-Type").unwrap(),
        "application/json; charset=utf-8"
    );
    assert_eq!(res.body_text(), r#"[{"id":"1","photo":null}]"#);
}

#[test]
fn test_error_conversion() {
    let err = Error::BadRequest("Bad Request: inventory_name is required".to_string());
    assert_eq!(err.status_code(), 400);
    assert!(!err.is_server_error());

    let res = err.into_response();
    assert_eq!(res.body_text(), "Bad Request: inventory_name is required");
}

#[test]
fn test_search_form_fields() {
    let req = form_request(
        "POST",
        "/search",
        "application/x-www-form-urlencoded",
        b"id=1700000000000&includePhoto=on",
    );
    let lookup: Lookup = req.body_fields().unwrap();

    assert_eq!(lookup.id.as_deref(), Some("1700000000000"));
    assert_eq!(lookup.include_photo.as_deref(), Some("on"));
}

#[test]
fn test_search_json_fields() {
    let req = form_request(
        "POST",
        "/search",
        "application/json",
        br#"{"id":"42"}"#,
    );
    let lookup: Lookup = req.body_fields().unwrap();

    assert_eq!(lookup.id.as_deref(), Some("42"));
    assert!(lookup.include_photo.is_none());
}

#[tokio::test]
async fn test_router_end_to_end() {
    let mut router = Router::new();
    router
        .get("/inventory/:id", |req: HttpRequest| async move {
            match req.param("id").map(String::as_str) {
                Some("1") => Ok(HttpResponse::text("found")),
                _ => Err(Error::NotFound("Not found".to_string())),
            }
        })
        .unwrap();
    router
        .post("/search", |req: HttpRequest| async move {
            let lookup: Lookup = req.body_fields()?;
            Ok(HttpResponse::text(lookup.id.unwrap_or_default()))
        })
        .unwrap();

    let found = router
        .dispatch(HttpRequest::new("GET".to_string(), "/inventory/1".to_string()))
        .await;
    assert_eq!(found.status, 200);
    assert_eq!(found.body_text(), "found");

    let missing = router
        .dispatch(HttpRequest::new("GET".to_string(), "/inventory/2".to_string()))
        .await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body_text(), "Not found");

    let malformed = router
        .dispatch(form_request("POST", "/search", "application/json", b"{"))
        .await;
    assert_eq!(malformed.status, 400);

    let unknown = router
        .dispatch(HttpRequest::new("GET".to_string(), "/nowhere?x=1".to_string()))
        .await;
    assert_eq!(unknown.status, 404);
    assert_eq!(unknown.body_text(), "Cannot GET /nowhere");
}

#[tokio::test]
async fn test_static_file_response() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("SearchForm.html");
    std::fs::write(&page, "<html></html>").unwrap();

    let res = serve_file(&page, "Not found").await.unwrap();
    assert_eq!(
        res.headers.get("Content-Type").unwrap(),
        "text/html; charset=utf-8"
    );
}
