use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness. Always 200 while the process
/// can answer at all.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness flag shared between startup code and the `/readyz` handler.
///
/// Starts not-ready; the service flips it once migrations have run and
/// the listener is about to accept traffic.
#[derive(Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ready(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Handler body for `GET /readyz`: 200 once ready, 503 before.
    pub fn status(&self) -> StatusCode {
        if self.is_ready() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
