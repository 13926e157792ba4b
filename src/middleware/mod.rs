//! Middleware layer.
//!
//! A middleware wraps the handler beneath it: it receives the request, calls
//! [`Next::run`] zero or one times, and returns a response — possibly the
//! downstream one transformed, possibly its own. Layers are installed with
//! [`Router::layer`](crate::Router::layer) and apply to every route,
//! outermost-first in installation order:
//!
//! ```rust,no_run
//! use kiso::middleware::{JsonEncoding, Trace};
//! use kiso::{JsonEncoder, Router, echo};
//!
//! let app = Router::new()
//!     .get("/jsonify", echo::query)
//!     .layer(Trace)                            // outermost: times the whole chain
//!     .layer(JsonEncoding::new(JsonEncoder));  // encodes payloads on the way out
//! ```
//!
//! Built-in layers:
//! - [`JsonEncoding`] — encodes structured payload bodies to wire bytes
//! - [`Trace`] — per-request span with method, path, status, latency

mod json;
mod trace;

pub use json::JsonEncoding;
pub use trace::Trace;

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;

/// A layer in the request pipeline.
///
/// Implementations must be cheap to share: one instance serves every request
/// concurrently, so any state belongs behind `Arc` and must not be mutated
/// per-request.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

/// The remainder of the chain below the current layer.
///
/// Consumed by [`run`](Next::run) — a layer invokes its downstream at most
/// once, which rules out accidental double-dispatch at compile time.
pub struct Next {
    pub(crate) inner: BoxedHandler,
}

impl Next {
    pub fn run(self, req: Request) -> BoxFuture {
        self.inner.call(req)
    }
}

/// A route handler wrapped by one layer. Dispatch folds the installed layers
/// over the matched handler, innermost-last, producing a chain of these.
pub(crate) struct Layered {
    pub(crate) layer: Arc<dyn Middleware>,
    pub(crate) inner: BoxedHandler,
}

impl ErasedHandler for Layered {
    fn call(&self, req: Request) -> BoxFuture {
        self.layer.handle(req, Next { inner: Arc::clone(&self.inner) })
    }
}
