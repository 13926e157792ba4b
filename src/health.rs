//! Built-in health-check handlers.
//!
//! Orchestrators ask two questions; these answer them:
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it serve traffic? Failure → pulled from the balancer. |
//!
//! Register them on your router:
//!
//! ```rust,no_run
//! use kiso::{Router, health};
//!
//! let app = Router::new()
//!     .get("/healthz", health::liveness)
//!     .get("/readyz", health::readiness);
//! ```
//!
//! Replace `readiness` with your own handler to gate on dependency
//! availability.

use crate::{Request, Response};

/// Liveness probe handler.
///
/// Always `200 OK`, body `"ok"`. If the process answers HTTP at all it is
/// alive; this handler deliberately has no dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler (default implementation).
///
/// Always `200 OK`, body `"ready"`. Override when your application needs a
/// warm-up period or must verify downstream health first.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
