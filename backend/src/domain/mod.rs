//! Domain primitives, aggregates and use-cases.
//!
//! Purpose: define the strongly typed user model, the error taxonomy shared
//! by every adapter, and the ports that separate the core from HTTP and
//! storage.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — stored user document.
//! - UserService — implements the user query and command ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AGE_MAX, Age, EmailAddress, NewUser, Role, User, UserId, UserName, UserPatch,
    UserValidationError,
};
pub use self::user_service::UserService;

