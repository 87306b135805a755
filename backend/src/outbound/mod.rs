//! Outbound adapters implementing the user store port.
//!
//! - **memory**: process-local store, used when no database is configured
//! - **persistence**: PostgreSQL-backed store using Diesel ORM
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
