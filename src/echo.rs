//! Built-in query-echo handler.
//!
//! The canonical demonstration of the payload pipeline: the handler returns
//! the request's query parameters as a *structured* payload and never touches
//! serialization — that is the encoding layer's job.
//!
//! ```rust,no_run
//! use kiso::middleware::JsonEncoding;
//! use kiso::{JsonEncoder, Router, echo};
//!
//! let app = Router::new()
//!     .get("/jsonify", echo::query)
//!     .layer(JsonEncoding::new(JsonEncoder));
//! ```
//!
//! `GET /jsonify?a=1&b=2` then answers `200`, `content-type:
//! application/json`, body `{"a":"1","b":"2"}`. No query string yields `{}`.

use serde_json::Value;

use crate::request::Request;
use crate::response::Response;

/// Echoes the request's query parameters as a structured JSON object payload.
///
/// Repeated keys keep the last value, matching common web-framework query
/// semantics. Always 200; an empty query string is an empty object, not an
/// error.
pub async fn query(req: Request) -> Response {
    Response::payload(Value::Object(req.query_map()))
}
