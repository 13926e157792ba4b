//! The jsonify demo — query echo through the payload-encoding pipeline.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example jsonify
//!
//! Try:
//!   curl 'http://localhost:3000/jsonify?a=1&b=2'   → {"a":"1","b":"2"}
//!   curl 'http://localhost:3000/jsonify'           → {}
//!   curl 'http://localhost:3000/healthz'           → ok
//!
//! Override the bind address with KISO_ADDR=127.0.0.1:8080.

use kiso::middleware::{JsonEncoding, Trace};
use kiso::{JsonEncoder, Request, Response, Router, Server, echo, health};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // One encoder for the whole pipeline, injected at composition time.
    // Trace is outermost so its status/latency record covers encoding too.
    let app = Router::new()
        .get("/jsonify", echo::query)
        .get("/greet/{name}", greet)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .layer(Trace)
        .layer(JsonEncoding::new(JsonEncoder));

    let addr = std::env::var("KISO_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());

    Server::bind(&addr).serve(app).await.expect("server error");
}

// GET /greet/{name} — a handler that builds its payload by hand instead of
// echoing the query. Same pipeline: the JsonEncoding layer does the bytes.
async fn greet(req: Request) -> Response {
    let name = req.param("name").unwrap_or("stranger");
    Response::payload(serde_json::json!({ "greeting": format!("hello, {name}") }))
}
