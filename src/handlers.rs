// Request handlers for the inventory endpoints

use crate::item::{InventoryItem, SearchQuery, UpdateItem, generate_id};
use crate::state::AppState;
use crate::upload::accept_upload;
use std::path::Path;
use stockroom_core::{Error, HttpRequest, HttpResponse, content_type_for, serve_file};
use stockroom_openapi::{spec_json_response, spec_yaml_response, swagger_ui_response};
use tracing::debug;

const NOT_FOUND: &str = "Not found";

fn not_found() -> Error {
    Error::NotFound(NOT_FOUND.to_string())
}

fn id_param(req: &HttpRequest) -> String {
    req.param("id").cloned().unwrap_or_default()
}

/// `POST /register`
pub async fn register(state: AppState, req: HttpRequest) -> Result<HttpResponse, Error> {
    let submission = accept_upload(req, state.storage.as_ref()).await?;

    let Some(name) = submission.form.name() else {
        return Err(Error::BadRequest(
            "Bad Request: inventory_name is required".to_string(),
        ));
    };

    let item = InventoryItem::new(
        generate_id(),
        name,
        submission.form.description(),
        submission.photo,
    );
    debug!(id = %item.id, photo = ?item.photo, "Registered item");
    state.store.append(item);

    Ok(HttpResponse::text("Created").with_status(201))
}

/// `GET /inventory`
pub async fn list_items(state: AppState, _req: HttpRequest) -> Result<HttpResponse, Error> {
    HttpResponse::json(&state.store.list())
}

/// `GET /inventory/:id`
pub async fn get_item(state: AppState, req: HttpRequest) -> Result<HttpResponse, Error> {
    let item = state.store.find_by_id(&id_param(&req)).ok_or_else(not_found)?;
    HttpResponse::json(&item)
}

/// `PUT /inventory/:id`: only non-empty `name`/`description` are applied
pub async fn update_item(state: AppState, req: HttpRequest) -> Result<HttpResponse, Error> {
    let update: UpdateItem = req.body_fields()?;
    let id = id_param(&req);

    if !state.store.update(&id, |item| update.apply(item)) {
        return Err(not_found());
    }
    debug!(id = %id, "Updated item");

    Ok(HttpResponse::text("Updated"))
}

/// `DELETE /inventory/:id`. The photo file stays in the cache.
pub async fn delete_item(state: AppState, req: HttpRequest) -> Result<HttpResponse, Error> {
    let removed = state
        .store
        .remove_by_id(&id_param(&req))
        .ok_or_else(not_found)?;
    debug!(id = %removed.id, photo = ?removed.photo, "Deleted item");

    Ok(HttpResponse::text("Deleted"))
}

/// `GET /inventory/:id/photo`
pub async fn get_photo(state: AppState, req: HttpRequest) -> Result<HttpResponse, Error> {
    let item = state.store.find_by_id(&id_param(&req)).ok_or_else(not_found)?;
    let photo = item.photo.ok_or_else(not_found)?;

    let data = state.storage.get(&photo).await.map_err(|e| {
        if e.is_not_found() {
            debug!(id = %item.id, photo = %photo, "Photo missing from cache");
            not_found()
        } else {
            Error::from(e)
        }
    })?;

    Ok(HttpResponse::ok()
        .content_type(content_type_for(Path::new(&photo)))
        .with_body(data.to_vec()))
}

/// `POST /search`. With `includePhoto=on` the returned copy's description
/// points at the photo; the stored item is left alone.
pub async fn search(state: AppState, req: HttpRequest) -> Result<HttpResponse, Error> {
    let query: SearchQuery = req.body_fields()?;

    let item = query
        .id()
        .and_then(|id| state.store.find_by_id(id))
        .ok_or_else(|| Error::NotFound("Not Found".to_string()))?;

    if query.wants_photo() {
        HttpResponse::json(&item.with_photo_reference())
    } else {
        HttpResponse::json(&item)
    }
}

/// `GET /RegisterForm.html`
pub async fn register_form(state: AppState, _req: HttpRequest) -> Result<HttpResponse, Error> {
    serve_file(&state.public_dir.join("RegisterForm.html"), NOT_FOUND).await
}

/// `GET /SearchForm.html`
pub async fn search_form(state: AppState, _req: HttpRequest) -> Result<HttpResponse, Error> {
    serve_file(&state.public_dir.join("SearchForm.html"), NOT_FOUND).await
}

/// `GET /docs`
pub async fn docs_ui(state: AppState, _req: HttpRequest) -> Result<HttpResponse, Error> {
    swagger_ui_response(&state.docs)
}

/// `GET /docs/openapi.json`
pub async fn docs_json(state: AppState, _req: HttpRequest) -> Result<HttpResponse, Error> {
    spec_json_response(&state.docs)
}

/// `GET /docs/openapi.yaml`
pub async fn docs_yaml(state: AppState, _req: HttpRequest) -> Result<HttpResponse, Error> {
    spec_yaml_response(&state.docs)
}
