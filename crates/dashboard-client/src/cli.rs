//! Command-line surface of the dashboard.
//!
//! The `dashboard` binary parses [`Cli`] and hands the command to [`run`],
//! so the flow can be driven in tests against any [`UsersApi`] without
//! spawning a process.
//!
//! [`UsersApi`]: crate::UsersApi

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::controller::{AssumeYes, Confirmation, Controller};
use crate::form::FormField;
use crate::model::Role;

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(name = "dashboard", about = "Manage users through the dashboard API")]
pub struct Cli {
    /// Users collection URL; overrides DASHBOARD_CLIENT_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

/// One dashboard intent.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show all users.
    List,
    /// Create a user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Whole number of years; omit for none.
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    /// Edit a user; omitted flags keep their current values.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Whole number of years; an empty value clears the age.
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    /// Delete a user.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    /// Confirmation to use for this command: `delete --yes` never asks.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use dashboard_client::cli::Command;
    /// use dashboard_client::Confirmation;
    ///
    /// struct Never;
    /// impl Confirmation for Never {
    ///     fn confirm(&self, _prompt: &str) -> bool {
    ///         false
    ///     }
    /// }
    ///
    /// let command = Command::Delete { id: "u1".into(), yes: true };
    /// let confirmation = command.confirmation(Arc::new(Never));
    /// assert!(confirmation.confirm("Delete?"));
    /// ```
    #[must_use]
    pub fn confirmation(&self, interactive: Arc<dyn Confirmation>) -> Arc<dyn Confirmation> {
        match self {
            Self::Delete { yes: true, .. } => Arc::new(AssumeYes),
            _ => interactive,
        }
    }
}

/// Why a dashboard command exited unsuccessfully.
#[derive(Debug, Error)]
pub enum CliError {
    /// `edit` named an id that is not in the loaded list.
    #[error("no user with id {id}")]
    UnknownUser { id: String },
    /// The intent ran and the dashboard shows an error banner.
    #[error("{message}")]
    Failed { message: String },
    /// The dashboard could not be written out.
    #[error("failed to write dashboard: {0}")]
    Output(#[from] io::Error),
}

/// Load the list, perform `command` and write the dashboard to `out`.
///
/// Only `edit` depends on the loaded list; `create` and `delete` proceed
/// even when the initial fetch fails.
///
/// # Errors
///
/// Returns [`CliError::Failed`] carrying the banner text when the dashboard
/// ends in an error state, after the dashboard has been written.
pub async fn run(
    command: Command,
    controller: &mut Controller,
    out: &mut impl Write,
) -> Result<(), CliError> {
    controller.refresh().await;

    match command {
        Command::List => {}
        Command::Create {
            name,
            email,
            age,
            role,
        } => {
            controller.toggle_form();
            apply_fields(controller, Some(name), Some(email), age, role);
            controller.submit().await;
        }
        Command::Edit {
            id,
            name,
            email,
            age,
            role,
        } => {
            fail_on_banner(controller)?;
            let Some(user) = controller
                .state()
                .users
                .iter()
                .find(|user| user.id == id)
                .cloned()
            else {
                return Err(CliError::UnknownUser { id });
            };
            controller.begin_edit(user);
            apply_fields(controller, name, email, age, role);
            controller.submit().await;
        }
        Command::Delete { id, .. } => {
            debug!(user_id = %id, "delete requested");
            controller.request_delete(&id).await;
        }
    }

    write!(out, "{}", controller.view())?;
    fail_on_banner(controller)
}

fn apply_fields(
    controller: &mut Controller,
    name: Option<String>,
    email: Option<String>,
    age: Option<String>,
    role: Option<Role>,
) {
    let fields = [
        name.map(FormField::Name),
        email.map(FormField::Email),
        age.map(FormField::Age),
        role.map(FormField::Role),
    ];
    for field in fields.into_iter().flatten() {
        controller.edit_field(field);
    }
}

fn fail_on_banner(controller: &Controller) -> Result<(), CliError> {
    match &controller.state().error {
        Some(message) => Err(CliError::Failed {
            message: message.clone(),
        }),
        None => Ok(()),
    }
}
