//! Radix-tree request router and pipeline composition.
//!
//! One tree per HTTP method, O(path-length) lookup. The router also owns the
//! middleware stack: [`Router::dispatch`] matches a handler, folds the
//! installed layers around it, runs the chain, and enforces that no
//! structured payload leaves unencoded. Build the router once at startup;
//! after [`Server::serve`](crate::Server::serve) takes it, it is shared
//! immutably across connections.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;
use tracing::error;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{Layered, Middleware};
use crate::request::Request;
use crate::response::{Body, Response};

/// The application router.
///
/// Each registration method returns `self` so composition chains naturally:
///
/// ```rust,no_run
/// # use kiso::middleware::JsonEncoding;
/// # use kiso::{JsonEncoder, Router, echo};
/// Router::new()
///     .get("/jsonify", echo::query)
///     .layer(JsonEncoding::new(JsonEncoder));
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    layers: Vec<Arc<dyn Middleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), layers: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves
    /// them.
    ///
    /// # Panics
    ///
    /// Panics at composition time on an invalid or conflicting route pattern.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PATCH, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    /// Install a middleware layer around every route.
    ///
    /// Layers apply outermost-first in installation order: the first layer
    /// installed sees the request first and the response last.
    pub fn layer(mut self, layer: impl Middleware) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    /// Routes one request through the full pipeline and returns the response.
    ///
    /// This is the in-process entry the server's hot path uses, and the one
    /// tests drive directly — no socket required. It never fails: a route
    /// miss is a 404, and a [`Body::Payload`] that survives every layer
    /// unencoded is a 500 (a payload is never written to the wire raw).
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let Some((handler, params)) = self.lookup(req.method(), req.path()) else {
            return Response::status(StatusCode::NOT_FOUND);
        };
        req.set_params(params);

        let path = req.path().to_owned();
        let mut chain = handler;
        for layer in self.layers.iter().rev() {
            chain = Arc::new(Layered { layer: Arc::clone(layer), inner: chain });
        }

        let resp = chain.call(req).await;
        if matches!(resp.body(), Body::Payload(_)) {
            error!(%path, "structured payload reached the wire with no encoding layer installed");
            return Response::status(StatusCode::INTERNAL_SERVER_ERROR);
        }
        resp
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(method: Method, uri: &str) -> Request {
        Request::from_http(
            http::Request::builder()
                .method(method)
                .uri(uri)
                .body(Vec::new())
                .unwrap(),
        )
    }

    async fn named(req: Request) -> Response {
        Response::text(req.param("name").unwrap_or("?").to_owned())
    }

    #[tokio::test]
    async fn route_miss_is_404() {
        let app = Router::new().get("/hello/{name}", named);
        let resp = app.dispatch(req(Method::GET, "/nope")).await;
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_method_is_404() {
        let app = Router::new().get("/hello/{name}", named);
        let resp = app.dispatch(req(Method::POST, "/hello/world")).await;
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn path_params_reach_the_handler() {
        let app = Router::new().get("/hello/{name}", named);
        let resp = app.dispatch(req(Method::GET, "/hello/world")).await;
        assert_eq!(resp.status_code(), StatusCode::OK);
        match resp.into_body() {
            Body::Bytes(b) => assert_eq!(b, b"world"),
            _ => panic!("expected bytes body"),
        }
    }
}
