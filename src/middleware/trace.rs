//! Per-request tracing layer.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;

/// Emits one `request` span per dispatched request, recording method, path,
/// response status, and latency.
///
/// Install it outermost so the recorded status reflects what actually goes on
/// the wire — including 500s produced by layers beneath it.
pub struct Trace;

impl Middleware for Trace {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let span = info_span!("request", %method, %path);
        Box::pin(
            async move {
                let start = Instant::now();
                let resp = next.run(req).await;
                info!(
                    status = resp.status_code().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "handled"
                );
                resp
            }
            .instrument(span),
        )
    }
}
