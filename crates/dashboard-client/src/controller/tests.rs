//! Controller round trips against mocked ports.

use super::*;
use crate::api::{ApiError, MockUsersApi};
use crate::form::FormFields;
use crate::model::Role;
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn ann() -> User {
    User {
        id: "7d1f6f3e-2c7a-4f43-8a1b-0c9e5d6a4b21".to_owned(),
        name: "Ann".to_owned(),
        email: "ann@x.com".to_owned(),
        age: Some(30),
        role: Role::User,
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
            .single()
            .expect("valid time"),
    }
}

fn controller(api: MockUsersApi, confirmation: MockConfirmation) -> Controller {
    Controller::new(Arc::new(api), Arc::new(confirmation))
}

fn unused_confirmation() -> MockConfirmation {
    let mut confirmation = MockConfirmation::new();
    confirmation.expect_confirm().never();
    confirmation
}

fn confirming(answer: bool) -> MockConfirmation {
    let mut confirmation = MockConfirmation::new();
    confirmation
        .expect_confirm()
        .withf(|prompt| prompt == DELETE_PROMPT)
        .times(1)
        .return_const(answer);
    confirmation
}

#[rstest]
#[tokio::test]
async fn refresh_replaces_users_and_stops_loading(ann: User) {
    let mut api = MockUsersApi::new();
    let listed = ann.clone();
    api.expect_list_users()
        .times(1)
        .returning(move || Ok(vec![listed.clone()]));
    let mut controller = controller(api, unused_confirmation());

    controller.refresh().await;

    let state = controller.state();
    assert_eq!(state.users, vec![ann]);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[rstest]
#[tokio::test]
async fn refresh_failure_reports_and_keeps_previous_users(ann: User) {
    let mut api = MockUsersApi::new();
    let listed = ann.clone();
    let mut calls = 0;
    api.expect_list_users().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![listed.clone()])
        } else {
            Err(ApiError::transport("connection refused"))
        }
    });
    let mut controller = controller(api, unused_confirmation());

    controller.refresh().await;
    controller.refresh().await;

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some("Failed to fetch users"));
    assert_eq!(state.users, vec![ann]);
    assert!(!state.loading);
}

#[rstest]
#[tokio::test]
async fn create_success_refreshes_then_resets_form(ann: User) {
    let mut api = MockUsersApi::new();
    let created = ann.clone();
    api.expect_create_user()
        .withf(|payload| {
            payload.name == "Ann" && payload.email == "Ann@x.com" && payload.age.is_none()
        })
        .times(1)
        .returning(move |_| Ok(created.clone()));
    let listed = ann.clone();
    api.expect_list_users()
        .times(1)
        .returning(move || Ok(vec![listed.clone()]));
    api.expect_update_user().never();
    let mut controller = controller(api, unused_confirmation());

    controller.toggle_form();
    controller.edit_field(FormField::Name("Ann".to_owned()));
    controller.edit_field(FormField::Email("Ann@x.com".to_owned()));
    controller.submit().await;

    let state = controller.state();
    assert_eq!(state.users, vec![ann]);
    assert_eq!(state.form, FormFields::default());
    assert!(!state.form_visible);
    assert_eq!(state.error, None);
}

#[rstest]
#[tokio::test]
async fn editing_submits_an_update_for_that_id(ann: User) {
    let mut api = MockUsersApi::new();
    let id = ann.id.clone();
    let renamed = User {
        name: "Anne".to_owned(),
        ..ann.clone()
    };
    let returned = renamed.clone();
    api.expect_update_user()
        .withf(move |target, payload| {
            target == id && payload.name == "Anne" && payload.age == Some(30)
        })
        .times(1)
        .returning(move |_, _| Ok(returned.clone()));
    let listed = renamed.clone();
    api.expect_list_users()
        .times(1)
        .returning(move || Ok(vec![listed.clone()]));
    api.expect_create_user().never();
    let mut controller = controller(api, unused_confirmation());

    controller.begin_edit(ann);
    controller.edit_field(FormField::Name("Anne".to_owned()));
    controller.submit().await;

    assert_eq!(controller.state().users, vec![renamed]);
    assert!(!controller.state().is_editing());
}

#[rstest]
#[tokio::test]
async fn update_failure_keeps_the_form_open(ann: User) {
    let mut api = MockUsersApi::new();
    api.expect_update_user()
        .times(1)
        .returning(|_, _| Err(ApiError::status(400, "email bob@x.com is already in use")));
    api.expect_list_users().never();
    let mut controller = controller(api, unused_confirmation());

    controller.begin_edit(ann.clone());
    controller.edit_field(FormField::Email("bob@x.com".to_owned()));
    controller.submit().await;

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some("Failed to update user"));
    assert!(state.form_visible);
    assert_eq!(state.editing_user, Some(ann));
    assert_eq!(state.form.email, "bob@x.com");
}

#[rstest]
#[case(false, "Failed to create user")]
#[case(true, "Failed to update user")]
#[tokio::test]
async fn invalid_age_text_is_rejected_locally(
    ann: User,
    #[case] editing: bool,
    #[case] message: &str,
) {
    let mut api = MockUsersApi::new();
    api.expect_create_user().never();
    api.expect_update_user().never();
    api.expect_list_users().never();
    let mut controller = controller(api, unused_confirmation());

    if editing {
        controller.begin_edit(ann);
    } else {
        controller.toggle_form();
    }
    controller.edit_field(FormField::Age("-3".to_owned()));
    controller.submit().await;

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some(message));
    assert!(state.form_visible);
    assert_eq!(state.form.age, "-3");
}

#[rstest]
#[tokio::test]
async fn declined_deletion_issues_no_request() {
    let mut api = MockUsersApi::new();
    api.expect_delete_user().never();
    api.expect_list_users().never();
    let mut controller = controller(api, confirming(false));
    let before = controller.state().clone();

    controller.request_delete("some-id").await;

    assert_eq!(controller.state(), &before);
}

#[rstest]
#[tokio::test]
async fn confirmed_deletion_refreshes() {
    let mut api = MockUsersApi::new();
    api.expect_delete_user()
        .withf(|id| id == "some-id")
        .times(1)
        .returning(|_| Ok(()));
    api.expect_list_users().times(1).returning(|| Ok(Vec::new()));
    let mut controller = controller(api, confirming(true));

    controller.request_delete("some-id").await;

    assert!(controller.state().users.is_empty());
    assert!(!controller.state().loading);
}

#[rstest]
#[tokio::test]
async fn failed_deletion_reports_without_refreshing() {
    let mut api = MockUsersApi::new();
    api.expect_delete_user()
        .times(1)
        .returning(|_| Err(ApiError::status(404, "user some-id not found")));
    api.expect_list_users().never();
    let mut controller = controller(api, confirming(true));

    controller.request_delete("some-id").await;

    assert_eq!(
        controller.state().error.as_deref(),
        Some("Failed to delete user")
    );
}

#[rstest]
fn assume_yes_confirms_everything() {
    assert!(AssumeYes.confirm(DELETE_PROMPT));
}
