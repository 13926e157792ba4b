//! # kiso
//!
//! A minimal HTTP framework whose one opinion is that handlers should hand
//! back *values*, not wire bytes, and that a middleware layer should decide
//! how those values hit the wire.
//!
//! ## The contract
//!
//! The fronting proxy handles TLS, rate limiting, slow clients, and body-size
//! limits. kiso does not — by design. What kiso owns is the part that changes
//! between applications:
//!
//! - Radix-tree routing — O(path-length) lookup via [`matchit`]
//! - Async I/O — tokio + hyper, HTTP/1.1 and HTTP/2, graceful shutdown
//! - A middleware chain — every route is wrapped by the layers you install,
//!   outermost-first, in registration order
//! - A payload-typed response body — a handler can return a structured
//!   [`serde_json::Value`] and let the [`JsonEncoding`](middleware::JsonEncoding)
//!   layer turn it into bytes. The encoder is an explicit dependency you hand
//!   to the layer at composition time; there is no global to configure and
//!   therefore no configure-before-serve race. A payload that reaches the
//!   wire with no encoding layer installed is a deterministic 500, never a
//!   silently unencoded body.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use kiso::middleware::JsonEncoding;
//! use kiso::{JsonEncoder, Router, Server, echo};
//!
//! #[tokio::main]
//! async fn main() {
//!     // GET /jsonify?a=1&b=2  →  200, application/json, {"a":"1","b":"2"}
//!     let app = Router::new()
//!         .get("/jsonify", echo::query)
//!         .layer(JsonEncoding::new(JsonEncoder));
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod echo;
pub mod encode;
pub mod health;
pub mod middleware;

pub use encode::{EncodeError, Encoder, JsonEncoder};
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use request::Request;
pub use response::{Body, IntoResponse, Response};
pub use router::Router;
pub use server::Server;

// Status codes and methods are the plain `http` types — no parallel enums.
pub use http::{Method, StatusCode};
