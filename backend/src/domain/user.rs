//! User data model and field validation.
//!
//! Every field constraint is expressed as a validating constructor on a
//! value type, so a [`User`], [`NewUser`] or [`UserPatch`] that exists has
//! already passed validation. Stores only ever see validated values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors raised by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The name is empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The email is empty once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The age is below zero.
    #[error("age must not be negative")]
    NegativeAge,
    /// The age does not fit the stored representation.
    #[error("age must be at most {max}")]
    AgeTooLarge {
        /// Largest accepted age.
        max: u32,
    },
    /// The role is outside the fixed enumeration.
    #[error("role must be one of user, admin, moderator")]
    UnknownRole {
        /// The rejected input.
        value: String,
    },
}

impl UserValidationError {
    /// Wire name of the field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
            Self::NegativeAge | Self::AgeTooLarge { .. } => "age",
            Self::UnknownRole { .. } => "role",
        }
    }

    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::EmptyEmail => "empty_email",
            Self::NegativeAge => "negative_age",
            Self::AgeTooLarge { .. } => "age_too_large",
            Self::UnknownRole { .. } => "unknown_role",
        }
    }
}

/// Opaque user identifier, a UUID assigned on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Display name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Email address, trimmed and lowercased.
///
/// Lowercasing on construction is what makes the store's uniqueness check
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim, lowercase and validate an email.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Largest accepted age; keeps the value representable as a signed 32-bit
/// database column.
pub const AGE_MAX: u32 = i32::MAX as u32;

/// Non-negative age in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u32);

impl Age {
    /// Validate an age received as a signed integer.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Age, UserValidationError};
    ///
    /// assert_eq!(Age::new(30).map(|age| age.get()), Ok(30));
    /// assert_eq!(Age::new(-1), Err(UserValidationError::NegativeAge));
    /// ```
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value < 0 {
            return Err(UserValidationError::NegativeAge);
        }
        u32::try_from(value)
            .ok()
            .filter(|age| *age <= AGE_MAX)
            .map(Self)
            .ok_or(UserValidationError::AgeTooLarge { max: AGE_MAX })
    }

    /// The age in years.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Fixed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular account; the default.
    #[default]
    User,
    /// Administrator.
    Admin,
    /// Moderator.
    Moderator,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Moderator];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UserValidationError::UnknownRole {
                value: s.to_owned(),
            })
    }
}

/// Validated input for creating a user.
///
/// The identifier and creation timestamp are assigned by the service, not
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: UserName,
    /// Normalised email address.
    pub email: EmailAddress,
    /// Optional age.
    pub age: Option<Age>,
    /// Role, defaulting to [`Role::User`].
    pub role: Role,
}

impl NewUser {
    /// Build a draft from raw inputs, applying every field rule.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{NewUser, Role};
    ///
    /// let draft = NewUser::try_from_parts("  Ann ", "Ann@X.com", None, None)
    ///     .expect("valid draft");
    /// assert_eq!(draft.name.as_ref(), "Ann");
    /// assert_eq!(draft.email.as_ref(), "ann@x.com");
    /// assert_eq!(draft.role, Role::User);
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        age: Option<i64>,
        role: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
            age: age.map(Age::new).transpose()?,
            role: role.map(Role::from_str).transpose()?.unwrap_or_default(),
        })
    }
}

/// Validated partial update.
///
/// `None` leaves a field unchanged. For `age`, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement name.
    pub name: Option<UserName>,
    /// Replacement email.
    pub email: Option<EmailAddress>,
    /// Replacement age; `Some(None)` clears it.
    pub age: Option<Option<Age>>,
    /// Replacement role.
    pub role: Option<Role>,
}

impl UserPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.role.is_none()
    }
}

/// Stored user document.
///
/// ## Invariants
/// - `id` and `created_at` never change after creation.
/// - Every field satisfies its value type's validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    age: Option<Age>,
    role: Role,
    created_at: DateTime<Utc>,
}

impl User {
    /// Materialise a new user from a validated draft.
    pub fn create(id: UserId, draft: NewUser, created_at: DateTime<Utc>) -> Self {
        let NewUser {
            name,
            email,
            age,
            role,
        } = draft;
        Self {
            id,
            name,
            email,
            age,
            role,
            created_at,
        }
    }

    /// Apply a patch, keeping identity and creation time.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{NewUser, User, UserId, UserName, UserPatch};
    /// use chrono::Utc;
    ///
    /// let draft = NewUser::try_from_parts("Ann", "ann@x.com", Some(30), None)
    ///     .expect("valid draft");
    /// let user = User::create(UserId::random(), draft, Utc::now());
    /// let patch = UserPatch {
    ///     name: Some(UserName::new("Anne").expect("valid name")),
    ///     age: Some(None),
    ///     ..UserPatch::default()
    /// };
    /// let updated = user.clone().apply(patch);
    /// assert_eq!(updated.name().as_ref(), "Anne");
    /// assert_eq!(updated.age(), None);
    /// assert_eq!(updated.id(), user.id());
    /// ```
    #[must_use]
    pub fn apply(self, patch: UserPatch) -> Self {
        let UserPatch {
            name,
            email,
            age,
            role,
        } = patch;
        Self {
            name: name.unwrap_or(self.name),
            email: email.unwrap_or(self.email),
            age: age.unwrap_or(self.age),
            role: role.unwrap_or(self.role),
            ..self
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Age, when known.
    pub fn age(&self) -> Option<Age> {
        self.age
    }

    /// Assigned role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
