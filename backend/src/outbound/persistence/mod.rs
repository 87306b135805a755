//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the schema (`schema.rs`) never leave
//! this module, and every database failure is mapped to
//! [`UserPersistenceError`](crate::domain::ports::UserPersistenceError).

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
