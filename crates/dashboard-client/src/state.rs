//! Dashboard state and its pure reducer.
//!
//! Every transition goes through [`reduce`]; nothing else mutates a
//! [`DashboardState`].

use crate::form::{FormField, FormFields};
use crate::model::User;

/// The operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing users.
    Fetch,
    /// Creating a user.
    Create,
    /// Updating a user.
    Update,
    /// Deleting a user.
    Delete,
}

impl Operation {
    /// Message shown when the operation fails.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Fetch => "Failed to fetch users",
            Self::Create => "Failed to create user",
            Self::Update => "Failed to update user",
            Self::Delete => "Failed to delete user",
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    /// Users from the last successful fetch.
    pub users: Vec<User>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Message from the most recent failure.
    pub error: Option<String>,
    /// Whether the create/edit form is shown.
    pub form_visible: bool,
    /// User being edited; `None` means the form creates.
    pub editing_user: Option<User>,
    /// Current form inputs.
    pub form: FormFields,
}

impl Default for DashboardState {
    /// A dashboard that has not loaded yet.
    fn default() -> Self {
        Self {
            users: Vec::new(),
            loading: true,
            error: None,
            form_visible: false,
            editing_user: None,
            form: FormFields::default(),
        }
    }
}

impl DashboardState {
    /// Whether submitting the form updates an existing user.
    pub const fn is_editing(&self) -> bool {
        self.editing_user.is_some()
    }
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A fetch started.
    LoadStarted,
    /// A fetch returned these users.
    UsersLoaded(Vec<User>),
    /// A fetch ended, successfully or not.
    LoadFinished,
    /// An operation failed.
    Failed(Operation),
    /// The user chose to edit this record.
    EditStarted(User),
    /// The form was reset to its defaults and closed.
    FormReset,
    /// The form visibility flipped.
    FormToggled,
    /// One form input changed.
    FieldEdited(FormField),
}

/// Apply `action` to `state`.
///
/// # Examples
/// ```
/// use dashboard_client::{Action, DashboardState, Operation, reduce};
///
/// let state = reduce(DashboardState::default(), Action::Failed(Operation::Fetch));
/// assert_eq!(state.error.as_deref(), Some("Failed to fetch users"));
/// ```
#[must_use]
pub fn reduce(state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::LoadStarted => DashboardState {
            loading: true,
            ..state
        },
        Action::UsersLoaded(users) => DashboardState {
            users,
            error: None,
            ..state
        },
        Action::LoadFinished => DashboardState {
            loading: false,
            ..state
        },
        Action::Failed(operation) => DashboardState {
            error: Some(operation.failure_message().to_owned()),
            ..state
        },
        Action::EditStarted(user) => DashboardState {
            form: FormFields::from_user(&user),
            editing_user: Some(user),
            form_visible: true,
            ..state
        },
        Action::FormReset => DashboardState {
            form: FormFields::default(),
            editing_user: None,
            form_visible: false,
            ..state
        },
        Action::FormToggled => DashboardState {
            form_visible: !state.form_visible,
            ..state
        },
        Action::FieldEdited(field) => {
            let mut next = state;
            next.form.set(field);
            next
        }
    }
}
