//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` unique index, so the
//! check and the write are a single statement. A unique violation surfaces as
//! [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Age, EmailAddress, NewUser, User, UserId};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Writes additionally translate the email unique index into a domain error.
fn map_write_error(error: DieselError, email: &EmailAddress) -> UserPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                "email unique index rejected write"
            );
            UserPersistenceError::duplicate_email(email.to_string())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        age,
        role,
        created_at,
    } = row;
    let draft = NewUser::try_from_parts(&name, &email, age.map(i64::from), Some(&role))
        .map_err(|err| UserPersistenceError::query(format!("stored user {id} is invalid: {err}")))?;
    Ok(User::create(UserId::from_uuid(id), draft, created_at))
}

fn age_column(age: Option<Age>) -> Result<Option<i32>, UserPersistenceError> {
    age.map(|age| i32::try_from(age.get()))
        .transpose()
        .map_err(|_| UserPersistenceError::query("age exceeds column range"))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            age: age_column(user.age())?,
            role: user.role().as_str(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, user.email()))
    }

    async fn replace(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserUpdate {
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            age: age_column(user.age())?,
            role: user.role().as_str(),
        };

        let updated = diesel::update(users::table.filter(users::id.eq(user.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user.email()))?;

        if updated == 0 {
            return Err(UserPersistenceError::not_found(user.id().to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(UserPersistenceError::not_found(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and row conversion coverage; queries need a live
    //! database and are exercised through the HTTP suite instead.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use crate::domain::Role;

    fn row(role: &str, age: Option<i32>) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            name: "Ann".to_owned(),
            email: "ann@x.com".to_owned(),
            age,
            role: role.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, UserPersistenceError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let email = EmailAddress::new("ann@x.com").expect("valid email");
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        );

        assert_eq!(
            map_write_error(diesel_err, &email),
            UserPersistenceError::duplicate_email("ann@x.com")
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, false)]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_string()),
        ),
        true
    )]
    fn other_errors_map_to_query_or_connection(
        #[case] error: DieselError,
        #[case] is_connection: bool,
    ) {
        let mapped = map_diesel_error(error);
        assert_eq!(
            matches!(mapped, UserPersistenceError::Connection { .. }),
            is_connection
        );
    }

    #[rstest]
    fn row_converts_into_domain_user() {
        let source = row("moderator", Some(41));
        let id = source.id;

        let user = row_to_user(source).expect("valid row");

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.role(), Role::Moderator);
        assert_eq!(user.age().map(Age::get), Some(41));
    }

    #[rstest]
    fn row_with_unknown_role_is_a_query_error() {
        let err = row_to_user(row("root", None)).expect_err("invalid role");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
