//! User intents, each performing at most one round trip plus a refresh.
//!
//! The controller owns the only [`DashboardState`]. Operations run one at a
//! time; every failure collapses into a single operation-specific message
//! and the underlying error is logged.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::UsersApi;
use crate::form::FormField;
use crate::model::User;
use crate::state::{Action, DashboardState, Operation, reduce};
use crate::view::{View, render};

/// Prompt shown before deleting a user.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// Asks the person at the dashboard to confirm a destructive action.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmation: Send + Sync {
    /// Return `true` when the person agrees to `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always agrees, for non-interactive use.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Drives the dashboard state through the users API.
pub struct Controller {
    api: Arc<dyn UsersApi>,
    confirmation: Arc<dyn Confirmation>,
    state: DashboardState,
}

impl Controller {
    /// Create a controller in the initial, not-yet-loaded state.
    pub fn new(api: Arc<dyn UsersApi>, confirmation: Arc<dyn Confirmation>) -> Self {
        Self {
            api,
            confirmation,
            state: DashboardState::default(),
        }
    }

    /// Current state snapshot.
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Render the current state.
    pub fn view(&self) -> View {
        render(&self.state)
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    /// Reload the user list.
    pub async fn refresh(&mut self) {
        self.dispatch(Action::LoadStarted);
        match self.api.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "users fetched");
                self.dispatch(Action::UsersLoaded(users));
            }
            Err(error) => {
                warn!(%error, "fetching users failed");
                self.dispatch(Action::Failed(Operation::Fetch));
            }
        }
        self.dispatch(Action::LoadFinished);
    }

    /// Send the form: an update when editing, a create otherwise.
    ///
    /// On success the list is refreshed and the form reset. On failure the
    /// form stays open with its contents.
    pub async fn submit(&mut self) {
        let editing_id = self.state.editing_user.as_ref().map(|user| user.id.clone());
        let operation = if editing_id.is_some() {
            Operation::Update
        } else {
            Operation::Create
        };

        let payload = match self.state.form.to_payload() {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "form rejected before sending");
                self.dispatch(Action::Failed(operation));
                return;
            }
        };

        let outcome = match editing_id.as_deref() {
            Some(id) => self.api.update_user(id, &payload).await,
            None => self.api.create_user(&payload).await,
        };
        match outcome {
            Ok(user) => {
                debug!(user_id = %user.id, ?operation, "user saved");
                self.refresh().await;
                self.reset_form();
            }
            Err(error) => {
                warn!(%error, ?operation, "saving user failed");
                self.dispatch(Action::Failed(operation));
            }
        }
    }

    /// Delete user `id` after confirmation. Declining changes nothing.
    pub async fn request_delete(&mut self, id: &str) {
        if !self.confirmation.confirm(DELETE_PROMPT) {
            debug!(user_id = id, "deletion declined");
            return;
        }
        match self.api.delete_user(id).await {
            Ok(()) => self.refresh().await,
            Err(error) => {
                warn!(%error, user_id = id, "deleting user failed");
                self.dispatch(Action::Failed(Operation::Delete));
            }
        }
    }

    /// Open the form pre-filled with `user`.
    pub fn begin_edit(&mut self, user: User) {
        self.dispatch(Action::EditStarted(user));
    }

    /// Clear and close the form.
    pub fn reset_form(&mut self) {
        self.dispatch(Action::FormReset);
    }

    /// Show or hide the form.
    pub fn toggle_form(&mut self) {
        self.dispatch(Action::FormToggled);
    }

    /// Record one input change.
    pub fn edit_field(&mut self, field: FormField) {
        self.dispatch(Action::FieldEdited(field));
    }
}

#[cfg(test)]
mod tests;
