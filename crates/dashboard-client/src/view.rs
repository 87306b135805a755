//! Pure rendering of dashboard state.
//!
//! [`render`] builds a [`View`] from a state snapshot; `View`'s `Display`
//! implementation is the plain-text dashboard the CLI prints.

use std::fmt;

use chrono::Local;

use crate::form::FormFields;
use crate::model::{Role, User};
use crate::state::DashboardState;

/// Dashboard heading.
pub const HEADER: &str = "User Dashboard";
/// Shown while a fetch is in flight.
pub const LOADING_TEXT: &str = "Loading users...";
/// Shown when there are no users.
pub const EMPTY_TEXT: &str = "No users found. Create one to get started!";

/// The whole dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Heading.
    pub header: &'static str,
    /// Error banner, when the last operation failed.
    pub error_banner: Option<String>,
    /// Label of the button that shows or hides the form.
    pub toggle_label: &'static str,
    /// The form, when visible.
    pub form: Option<FormView>,
    /// The users section.
    pub users: UsersSection,
}

/// The create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// "Edit User" or "Create New User".
    pub title: &'static str,
    /// "Update User" or "Create User".
    pub submit_label: &'static str,
    /// Current inputs.
    pub fields: FormFields,
}

/// Users heading plus its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersSection {
    /// "All Users (N)".
    pub title: String,
    /// Loading indicator, empty state or cards.
    pub body: UsersBody,
}

/// What the users section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersBody {
    /// A fetch is in flight.
    Loading,
    /// No users.
    Empty,
    /// One card per user.
    Cards(Vec<UserCard>),
}

/// One user as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    /// Identifier carried by the Edit and Delete controls.
    pub id: String,
    /// Name.
    pub name: String,
    /// Role badge.
    pub role: Role,
    /// Email.
    pub email: String,
    /// Age, or "N/A".
    pub age: String,
    /// Creation date in local time.
    pub created: String,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            email: user.email.clone(),
            age: user
                .age
                .map_or_else(|| "N/A".to_owned(), |age| age.to_string()),
            created: user
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string(),
        }
    }
}

/// Build the view for `state`.
pub fn render(state: &DashboardState) -> View {
    let editing = state.is_editing();
    let form = state.form_visible.then(|| FormView {
        title: if editing { "Edit User" } else { "Create New User" },
        submit_label: if editing { "Update User" } else { "Create User" },
        fields: state.form.clone(),
    });
    let body = if state.loading {
        UsersBody::Loading
    } else if state.users.is_empty() {
        UsersBody::Empty
    } else {
        UsersBody::Cards(state.users.iter().map(UserCard::from).collect())
    };

    View {
        header: HEADER,
        error_banner: state.error.clone().filter(|message| !message.is_empty()),
        toggle_label: if state.form_visible {
            "Cancel"
        } else {
            "+ Add New User"
        },
        form,
        users: UsersSection {
            title: format!("All Users ({})", state.users.len()),
            body,
        },
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        if let Some(message) = &self.error_banner {
            writeln!(f, "! {message}")?;
        }
        writeln!(f, "[{}]", self.toggle_label)?;
        if let Some(form) = &self.form {
            write!(f, "{form}")?;
        }
        write!(f, "{}", self.users)
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "== {} ==", self.title)?;
        writeln!(f, "  Name:  {}", self.fields.name)?;
        writeln!(f, "  Email: {}", self.fields.email)?;
        writeln!(f, "  Age:   {}", self.fields.age)?;
        writeln!(f, "  Role:  {}", self.fields.role)?;
        writeln!(f, "  [{}] [Cancel]", self.submit_label)
    }
}

impl fmt::Display for UsersSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.title)?;
        match &self.body {
            UsersBody::Loading => writeln!(f, "{LOADING_TEXT}"),
            UsersBody::Empty => writeln!(f, "{EMPTY_TEXT}"),
            UsersBody::Cards(cards) => cards.iter().try_for_each(|card| write!(f, "{card}")),
        }
    }
}

impl fmt::Display for UserCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{} [{}]", self.name, self.role)?;
        writeln!(f, "  Email:   {}", self.email)?;
        writeln!(f, "  Age:     {}", self.age)?;
        writeln!(f, "  Created: {}", self.created)?;
        writeln!(f, "  [Edit {id}] [Delete {id}]", id = self.id)
    }
}
