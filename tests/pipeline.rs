//! End-to-end pipeline tests: router + middleware + echo handler, driven
//! through `Router::dispatch` without a listening socket.

use kiso::middleware::{JsonEncoding, Middleware, Next, Trace};
use kiso::{
    Body, BoxFuture, EncodeError, Encoder, JsonEncoder, Method, Request, Response, Router,
    StatusCode, echo,
};
use serde_json::{Value, json};

fn jsonify_app() -> Router {
    Router::new()
        .get("/jsonify", echo::query)
        .layer(JsonEncoding::new(JsonEncoder))
}

fn get(uri: &str) -> Request {
    Request::from_http(
        http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Vec::new())
            .unwrap(),
    )
}

fn body_bytes(resp: Response) -> Vec<u8> {
    match resp.into_body() {
        Body::Bytes(b) => b,
        Body::Empty => Vec::new(),
        Body::Payload(_) => panic!("payload body reached the test boundary"),
    }
}

#[tokio::test]
async fn echoes_query_parameters_as_json_object() {
    let app = jsonify_app();
    let resp = app.dispatch(get("/jsonify?a=1&b=2")).await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(resp.header("content-type"), Some("application/json"));

    let decoded: Value = serde_json::from_slice(&body_bytes(resp)).unwrap();
    assert_eq!(decoded, json!({"a": "1", "b": "2"}));
}

#[tokio::test]
async fn empty_query_string_yields_empty_object() {
    let app = jsonify_app();
    let resp = app.dispatch(get("/jsonify")).await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(body_bytes(resp), b"{}");
}

#[tokio::test]
async fn content_type_is_json_regardless_of_query() {
    let app = jsonify_app();
    for uri in ["/jsonify", "/jsonify?x=y", "/jsonify?a=1&a=2&b="] {
        let resp = app.dispatch(get(uri)).await;
        assert_eq!(resp.status_code(), StatusCode::OK, "uri: {uri}");
        assert_eq!(resp.header("content-type"), Some("application/json"), "uri: {uri}");
    }
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let app = jsonify_app();
    let first = app.dispatch(get("/jsonify?b=2&a=1")).await;
    let second = app.dispatch(get("/jsonify?b=2&a=1")).await;

    assert_eq!(first.status_code(), second.status_code());
    assert_eq!(body_bytes(first), body_bytes(second));
}

#[tokio::test]
async fn payload_without_encoding_layer_is_a_500() {
    // No JsonEncoding layer installed: the structured payload must fail
    // deterministically, never leave as an unencoded body.
    let app = Router::new().get("/jsonify", echo::query);
    let resp = app.dispatch(get("/jsonify?a=1")).await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(resp.into_body(), Body::Empty));
}

#[tokio::test]
async fn encoder_failure_is_a_500() {
    struct FailingEncoder;
    impl Encoder for FailingEncoder {
        fn encode(&self, _value: &Value) -> Result<Vec<u8>, EncodeError> {
            Err(EncodeError::new("encoder wired to fail"))
        }
    }

    let app = Router::new()
        .get("/jsonify", echo::query)
        .layer(JsonEncoding::new(FailingEncoder));
    let resp = app.dispatch(get("/jsonify?a=1")).await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn encoding_preserves_downstream_status_and_headers() {
    async fn created(_req: Request) -> Response {
        Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/things/7")
            .payload(json!({"id": 7}))
    }

    let app = Router::new()
        .post("/things", created)
        .layer(JsonEncoding::new(JsonEncoder));

    let req = Request::from_http(
        http::Request::builder()
            .method(Method::POST)
            .uri("/things")
            .body(Vec::new())
            .unwrap(),
    );
    let resp = app.dispatch(req).await;

    assert_eq!(resp.status_code(), StatusCode::CREATED);
    assert_eq!(resp.header("location"), Some("/things/7"));
    assert_eq!(resp.header("content-type"), Some("application/json"));

    let decoded: Value = serde_json::from_slice(&body_bytes(resp)).unwrap();
    assert_eq!(decoded, json!({"id": 7}));
}

#[tokio::test]
async fn bytes_and_empty_bodies_pass_through_the_encoding_layer() {
    async fn plain(_req: Request) -> Response {
        Response::text("not json")
    }

    let app = Router::new()
        .get("/plain", plain)
        .layer(JsonEncoding::new(JsonEncoder));
    let resp = app.dispatch(get("/plain")).await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(resp.header("content-type"), Some("text/plain; charset=utf-8"));
    assert_eq!(body_bytes(resp), b"not json");
}

#[tokio::test]
async fn layers_apply_outermost_first() {
    // Each layer appends its tag after running its downstream, so the
    // response records innermost-to-outermost completion order.
    struct Tag(&'static str);
    impl Middleware for Tag {
        fn handle(&self, req: Request, next: Next) -> BoxFuture {
            let tag = self.0;
            Box::pin(async move {
                let resp = next.run(req).await;
                let mut bytes = match resp.into_body() {
                    Body::Bytes(b) => b,
                    _ => Vec::new(),
                };
                bytes.extend_from_slice(tag.as_bytes());
                Response::json(bytes)
            })
        }
    }

    async fn leaf(_req: Request) -> Response {
        Response::json(b"leaf:".to_vec())
    }

    let app = Router::new()
        .get("/", leaf)
        .layer(Tag("outer"))
        .layer(Tag("inner"));
    let resp = app.dispatch(get("/")).await;

    assert_eq!(body_bytes(resp), b"leaf:innerouter");
}

#[tokio::test]
async fn trace_layer_is_transparent() {
    let app = Router::new()
        .get("/jsonify", echo::query)
        .layer(Trace)
        .layer(JsonEncoding::new(JsonEncoder));
    let resp = app.dispatch(get("/jsonify?a=1")).await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    let decoded: Value = serde_json::from_slice(&body_bytes(resp)).unwrap();
    assert_eq!(decoded, json!({"a": "1"}));
}

#[tokio::test]
async fn unknown_path_is_404_even_with_layers() {
    let app = jsonify_app();
    let resp = app.dispatch(get("/nope")).await;
    assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
}
