// Route table

use crate::handlers;
use crate::state::AppState;
use std::future::Future;
use stockroom_core::{Error, HttpRequest, HttpResponse, Router};

/// Close a handler over the shared state
fn with_state<H, Fut>(
    state: &AppState,
    handler: H,
) -> impl Fn(HttpRequest) -> Fut + Send + Sync + 'static
where
    H: Fn(AppState, HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    let state = state.clone();
    move |req| handler(state.clone(), req)
}

/// Build the router for every endpoint of the service
pub fn build_router(state: AppState) -> Result<Router, Error> {
    let mut router = Router::new();
    let docs_path = state.docs.path.clone();

    router.get("/RegisterForm.html", with_state(&state, handlers::register_form))?;
    router.get("/SearchForm.html", with_state(&state, handlers::search_form))?;

    router.post("/register", with_state(&state, handlers::register))?;
    router.get("/inventory", with_state(&state, handlers::list_items))?;
    router.get("/inventory/:id", with_state(&state, handlers::get_item))?;
    router.put("/inventory/:id", with_state(&state, handlers::update_item))?;
    router.delete("/inventory/:id", with_state(&state, handlers::delete_item))?;
    router.get("/inventory/:id/photo", with_state(&state, handlers::get_photo))?;
    router.post("/search", with_state(&state, handlers::search))?;

    router.get(&docs_path, with_state(&state, handlers::docs_ui))?;
    router.get(&state.docs.json_path(), with_state(&state, handlers::docs_json))?;
    router.get(&state.docs.yaml_path(), with_state(&state, handlers::docs_yaml))?;

    Ok(router)
}
