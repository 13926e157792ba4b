//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! The body is an explicit [`Body`] — empty, raw bytes, or a structured
//! payload awaiting an encoding layer. There is no "sequence of one element"
//! convention to trip over: a payload is a single value by construction.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use serde_json::Value;
use tracing::error;

// ── Body ─────────────────────────────────────────────────────────────────────

/// The body of a [`Response`].
///
/// `Payload` is the interesting variant: a structured value that a handler
/// returns *unencoded*. An encoding middleware layer
/// ([`JsonEncoding`](crate::middleware::JsonEncoding)) converts it to `Bytes`
/// on the way out. If no layer does, dispatch answers 500 — the payload is
/// never serialized by some silent fallback.
pub enum Body {
    Empty,
    Bytes(Vec<u8>),
    Payload(Value),
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK)
///
/// ```rust
/// use kiso::Response;
/// use serde_json::json;
///
/// Response::payload(json!({"id": 1}));     // encoded by the JsonEncoding layer
/// Response::json(br#"{"id":1}"#.to_vec()); // already-encoded bytes
/// Response::text("hello");
/// Response::status(kiso::StatusCode::NO_CONTENT);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use kiso::{Response, StatusCode};
/// use serde_json::json;
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .payload(json!({"id": 42}));
/// ```
pub struct Response {
    pub(crate) status: StatusCode,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Body,
}

impl Response {
    /// `200 OK` — a structured payload, `content-type: application/json`.
    ///
    /// The payload stays a value until the encoding layer turns it into
    /// bytes. Status and headers are fixed here; the layer touches neither.
    pub fn payload(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![("content-type".to_owned(), "application/json".to_owned())],
            body: Body::Payload(value),
        }
    }

    /// `200 OK` — pre-encoded JSON bytes, `application/json`.
    ///
    /// Use this when you already hold wire bytes (e.g. from
    /// `serde_json::to_vec` in the handler) and want no layer involvement.
    pub fn json(body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![("content-type".to_owned(), "application/json".to_owned())],
            body: Body::Bytes(body),
        }
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![("content-type".to_owned(), "text/plain; charset=utf-8".to_owned())],
            body: Body::Bytes(body.into().into_bytes()),
        }
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { status: code, headers: Vec::new(), body: Body::Empty }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    /// Converts to the `http` representation hyper writes out. Dispatch has
    /// already replaced any unencoded payload with a 500 before this runs.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let bytes = match self.body {
            Body::Empty | Body::Payload(_) => Bytes::new(),
            Body::Bytes(b) => Bytes::from(b),
        };
        match builder.body(Full::new(bytes)) {
            Ok(resp) => resp,
            Err(e) => {
                error!("invalid response header: {e}");
                let mut resp = http::Response::new(Full::new(Bytes::new()));
                *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                resp
            }
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`]. Obtain via [`Response::builder()`].
/// Defaults to 200; terminated by a body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a structured payload (`application/json`, encoded by
    /// the encoding layer).
    pub fn payload(self, value: Value) -> Response {
        self.finish("application/json", Body::Payload(value))
    }

    /// Terminate with pre-encoded JSON bytes (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish("application/json", Body::Bytes(body))
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", Body::Bytes(body.into().into_bytes()))
    }

    /// Terminate with a typed body for anything else (XML, binary, …).
    pub fn bytes(self, content_type: &str, body: Vec<u8>) -> Response {
        self.finish(content_type, Body::Bytes(body))
    }

    /// Terminate with no body (e.g. `StatusCode::NO_CONTENT`).
    pub fn no_body(self) -> Response {
        Response { status: self.status, headers: self.headers, body: Body::Empty }
    }

    fn finish(self, content_type: &str, body: Body) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { status: self.status, headers, body }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`]. Implement on your own types to
/// return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

/// Return a bare status from a handler: `return StatusCode::NOT_FOUND`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

/// Return a structured value from a handler; the encoding layer does the rest.
impl IntoResponse for Value {
    fn into_response(self) -> Response {
        Response::payload(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_sets_json_content_type() {
        let resp = Response::payload(json!({}));
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert!(matches!(resp.body(), Body::Payload(_)));
    }

    #[test]
    fn builder_keeps_custom_status_and_headers() {
        let resp = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/users/42")
            .payload(json!({"id": 42}));
        assert_eq!(resp.status_code(), StatusCode::CREATED);
        assert_eq!(resp.header("location"), Some("/users/42"));
        assert_eq!(resp.header("content-type"), Some("application/json"));
    }

    #[test]
    fn into_http_writes_bytes_body() {
        let http = Response::json(b"{}".to_vec()).into_http();
        assert_eq!(http.status(), StatusCode::OK);
        assert_eq!(http.headers()["content-type"], "application/json");
    }
}
