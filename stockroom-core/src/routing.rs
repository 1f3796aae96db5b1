// Routing system for HTTP requests

use crate::{Error, HttpMethod, HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A route handler function type
pub type HandlerFn = Arc<
    dyn Fn(HttpRequest) -> Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>
        + Send
        + Sync,
>;

/// Route definition with handler
#[derive(Clone)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub handler: HandlerFn,
}

impl Route {
    /// Wrap an async function as a route
    pub fn new<F, Fut>(method: HttpMethod, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        Self {
            method,
            path: path.into(),
            handler: Arc::new(move |req| Box::pin(handler(req))),
        }
    }
}

/// Router for managing routes and dispatching requests
///
/// Paths use `:name` segments for parameters (`/inventory/:id`). Each method
/// gets its own matchit tree.
pub struct Router {
    routes: Vec<Route>,
    trees: HashMap<HttpMethod, matchit::Router<usize>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            trees: HashMap::new(),
        }
    }

    /// Add a route to the router
    pub fn add_route(&mut self, route: Route) -> Result<(), Error> {
        let pattern = to_matchit_pattern(&route.path);
        let index = self.routes.len();
        self.trees
            .entry(route.method)
            .or_insert_with(matchit::Router::new)
            .insert(pattern, index)
            .map_err(|e| {
                Error::Internal(format!(
                    "Invalid route {} {}: {}",
                    route.method, route.path, e
                ))
            })?;
        self.routes.push(route);
        Ok(())
    }

    pub fn get<F, Fut>(&mut self, path: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.add_route(Route::new(HttpMethod::GET, path, handler))
    }

    pub fn post<F, Fut>(&mut self, path: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.add_route(Route::new(HttpMethod::POST, path, handler))
    }

    pub fn put<F, Fut>(&mut self, path: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.add_route(Route::new(HttpMethod::PUT, path, handler))
    }

    pub fn delete<F, Fut>(&mut self, path: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.add_route(Route::new(HttpMethod::DELETE, path, handler))
    }

    /// Registered routes, in registration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find a route that matches the request and run its handler
    pub async fn route(&self, mut request: HttpRequest) -> Result<HttpResponse, Error> {
        // The query string takes no part in matching
        let path = match request.path.split_once('?') {
            Some((p, _)) => p.to_string(),
            None => request.path.clone(),
        };

        let method = HttpMethod::from_str(&request.method);
        let found = method.and_then(|m| {
            self.find(m, &path).or_else(|| {
                // HEAD falls back to the GET handler; the server drops the body
                if m == HttpMethod::HEAD {
                    self.find(HttpMethod::GET, &path)
                } else {
                    None
                }
            })
        });

        match found {
            Some((index, params)) => {
                request.path_params = params;
                (self.routes[index].handler)(request).await
            }
            None => Err(Error::RouteNotFound(format!(
                "Cannot {} {}",
                request.method, path
            ))),
        }
    }

    /// Route the request and turn any error into its plain-text response
    pub async fn dispatch(&self, request: HttpRequest) -> HttpResponse {
        match self.route(request).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }

    fn find(&self, method: HttpMethod, path: &str) -> Option<(usize, HashMap<String, String>)> {
        let tree = self.trees.get(&method)?;

        let matched = match tree.at(path) {
            Ok(matched) => matched,
            Err(_) if path.len() > 1 && path.ends_with('/') => {
                tree.at(path.trim_end_matches('/')).ok()?
            }
            Err(_) => return None,
        };

        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), decode_segment(v)))
            .collect();

        Some((*matched.value, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert `/inventory/:id` into matchit's `/inventory/{id}`
fn to_matchit_pattern(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{}}}", name),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-decode a path segment, keeping it raw if it is not valid UTF-8
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
