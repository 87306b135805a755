//! Health endpoints reporting the server's lifecycle phase.
//!
//! The server starts in [`Phase::Starting`], serves once the user store is
//! wired and drains on shutdown. Readiness passes only while serving;
//! liveness passes until draining begins.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::debug;

/// Where the server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    /// Bound but the store is not wired yet.
    Starting = 0,
    /// Taking traffic.
    Serving = 1,
    /// Shutting down; never left once entered.
    Draining = 2,
}

impl Phase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Lifecycle phase shared between the health checks and the bootstrap code.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting as u8),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move from starting to serving. A draining server stays draining.
    pub fn mark_ready(&self) {
        if let Err(current) = self.phase.compare_exchange(
            Phase::Starting as u8,
            Phase::Serving as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            debug!(phase = ?Phase::from_u8(current), "ready mark ignored");
        }
    }

    /// Enter the draining phase so both checks fail.
    pub fn begin_draining(&self) {
        self.phase.store(Phase::Draining as u8, Ordering::Release);
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_ready(&self) -> bool {
        Check::Ready.passes(self.phase())
    }
}

#[derive(Debug, Clone, Copy)]
enum Check {
    Ready,
    Live,
}

impl Check {
    const fn passes(self, phase: Phase) -> bool {
        match self {
            Self::Ready => matches!(phase, Phase::Serving),
            Self::Live => !matches!(phase, Phase::Draining),
        }
    }

    fn respond(self, state: &HealthState) -> HttpResponse {
        let mut response = if self.passes(state.phase()) {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness check: 200 while serving, 503 while starting or draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving traffic"),
        (status = 503, description = "Starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    Check::Ready.respond(&state)
}

/// Liveness check: 200 until draining begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is alive"),
        (status = 503, description = "Draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    Check::Live.respond(&state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    async fn statuses(state: &web::Data<HealthState>) -> (StatusCode, StatusCode) {
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(ready)
                .service(live),
        )
        .await;
        let mut codes = Vec::with_capacity(2);
        for uri in ["/health/ready", "/health/live"] {
            let res =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(
                res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
                Some(&b"no-store"[..])
            );
            codes.push(res.status());
        }
        (codes[0], codes[1])
    }

    #[rstest]
    #[case::starting(&[], Phase::Starting, StatusCode::SERVICE_UNAVAILABLE, StatusCode::OK)]
    #[case::serving(&["ready"], Phase::Serving, StatusCode::OK, StatusCode::OK)]
    #[case::draining(
        &["ready", "drain"],
        Phase::Draining,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case::no_revival(
        &["drain", "ready"],
        Phase::Draining,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[actix_web::test]
    async fn health_checks_follow_the_lifecycle(
        #[case] transitions: &[&str],
        #[case] phase: Phase,
        #[case] ready_status: StatusCode,
        #[case] live_status: StatusCode,
    ) {
        let state = web::Data::new(HealthState::new());
        for transition in transitions {
            match *transition {
                "ready" => state.mark_ready(),
                "drain" => state.begin_draining(),
                other => panic!("unknown transition {other}"),
            }
        }

        assert_eq!(state.phase(), phase);
        assert_eq!(statuses(&state).await, (ready_status, live_status));
    }
}
