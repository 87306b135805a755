//! User dashboard backend.
//!
//! Hexagonal layout: `domain` holds the user model, error taxonomy and ports;
//! `inbound` adapts HTTP requests onto the ports; `outbound` implements the
//! user store in memory or on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
