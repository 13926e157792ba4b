//! The payload-encoding layer.

use std::sync::Arc;

use http::StatusCode;
use tracing::error;

use crate::encode::Encoder;
use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::{Body, Response};

/// Encodes structured payload bodies into wire bytes.
///
/// The layer invokes its downstream, then looks at the response body:
///
/// - [`Body::Payload`] — encoded with the injected [`Encoder`]; status and
///   headers pass through untouched, only the body changes.
/// - [`Body::Bytes`] / [`Body::Empty`] — passed through as-is.
///
/// The encoder is a constructor argument, fixed for the lifetime of the
/// pipeline. Encode failures answer 500 and log the cause.
pub struct JsonEncoding {
    encoder: Arc<dyn Encoder>,
}

impl JsonEncoding {
    pub fn new(encoder: impl Encoder + 'static) -> Self {
        Self { encoder: Arc::new(encoder) }
    }
}

impl Middleware for JsonEncoding {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let encoder = Arc::clone(&self.encoder);
        Box::pin(async move {
            let Response { status, headers, body } = next.run(req).await;
            let body = match body {
                Body::Payload(value) => match encoder.encode(&value) {
                    Ok(bytes) => Body::Bytes(bytes),
                    Err(e) => {
                        error!(error = %e, "payload encoding failed");
                        return Response::status(StatusCode::INTERNAL_SERVER_ERROR);
                    }
                },
                other => other,
            };
            Response { status, headers, body }
        })
    }
}
