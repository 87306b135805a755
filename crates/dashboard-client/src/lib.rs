//! Client for the user dashboard REST API.
//!
//! The client keeps an explicit [`DashboardState`], changes it only through
//! the pure [`reduce`] function and renders it with the pure [`render`]
//! function. A [`Controller`] turns user intents into round trips through
//! the [`UsersApi`] port.
//!
//! # Example
//!
//! ```
//! use dashboard_client::{DashboardState, render};
//!
//! let view = render(&DashboardState::default());
//! assert!(view.to_string().contains("Loading users..."));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod form;
pub mod model;
pub mod state;
pub mod view;

pub use api::{ApiError, HttpUsersApi, UsersApi};
pub use config::{ClientSettings, InvalidApiUrl};
pub use controller::{AssumeYes, Confirmation, Controller, DELETE_PROMPT};
pub use form::{FormError, FormField, FormFields};
pub use model::{Role, UnknownRole, User, UserPayload};
pub use state::{Action, DashboardState, Operation, reduce};
pub use view::{View, render};
