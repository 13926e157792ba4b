//! Incoming HTTP request type.

use std::collections::HashMap;

use http::{HeaderMap, Method, Uri};
use serde_json::{Map, Value};

/// An incoming HTTP request.
///
/// Handlers receive this by value and read from it; kiso never mutates a
/// request on a handler's behalf.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Vec<u8>,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(method: Method, uri: Uri, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { method, uri, headers, body, params: HashMap::new() }
    }

    /// Builds a request from its `http` representation, e.g. for driving
    /// [`Router::dispatch`](crate::Router::dispatch) in tests without a
    /// listening socket. Path parameters are filled in by the router.
    pub fn from_http(req: http::Request<Vec<u8>>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(parts.method, parts.uri, parts.headers, body)
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Header lookup. `http::HeaderMap` is already case-insensitive.
    /// Returns `None` for values that are not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Query-string pairs, percent-decoded, in the order they appear.
    ///
    /// `?a=1&b=2` → `[("a","1"), ("b","2")]`. No query string → empty.
    pub fn query(&self) -> Vec<(String, String)> {
        match self.uri.query() {
            Some(q) => url::form_urlencoded::parse(q.as_bytes()).into_owned().collect(),
            None => Vec::new(),
        }
    }

    /// Query parameters as a JSON object map, last value winning on repeated
    /// keys. This is the shape [`echo::query`](crate::echo::query) returns.
    pub fn query_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (k, v) in self.query() {
            map.insert(k, Value::String(v));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(uri: &str) -> Request {
        Request::from_http(
            http::Request::builder().uri(uri).body(Vec::new()).unwrap(),
        )
    }

    #[test]
    fn query_preserves_order_and_decodes() {
        let r = req("/jsonify?b=2&a=hello%20world");
        assert_eq!(
            r.query(),
            vec![("b".to_owned(), "2".to_owned()), ("a".to_owned(), "hello world".to_owned())],
        );
    }

    #[test]
    fn query_map_last_value_wins() {
        let r = req("/jsonify?a=1&a=2");
        let map = r.query_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], Value::String("2".to_owned()));
    }

    #[test]
    fn no_query_string_is_empty() {
        let r = req("/jsonify");
        assert!(r.query().is_empty());
        assert!(r.query_map().is_empty());
    }

    #[test]
    fn valueless_key_maps_to_empty_string() {
        let r = req("/jsonify?flag");
        assert_eq!(r.query_map()["flag"], Value::String(String::new()));
    }
}
