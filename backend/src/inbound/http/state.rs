//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side of the user contract.
    pub users: Arc<dyn UsersQuery>,
    /// Write side of the user contract.
    pub commands: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Bundle the query and command ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::UserService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryUserRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(UserService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersQuery>, commands: Arc<dyn UsersCommand>) -> Self {
        Self { users, commands }
    }
}
