//! Create/edit form contents and their conversion into request bodies.

use crate::model::{Role, User, UserPayload};

/// Raised when form contents cannot be sent as a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The age text is not a non-negative whole number.
    #[error("age must be a non-negative whole number, got '{value}'")]
    InvalidAge {
        /// The rejected text.
        value: String,
    },
}

/// Text the user has typed into the form.
///
/// Age is kept as text, exactly as entered, until submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    /// Name input.
    pub name: String,
    /// Email input.
    pub email: String,
    /// Age input; empty means no age.
    pub age: String,
    /// Selected role.
    pub role: Role,
}

/// A single input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    /// New name text.
    Name(String),
    /// New email text.
    Email(String),
    /// New age text.
    Age(String),
    /// New role selection.
    Role(Role),
}

impl FormFields {
    /// Pre-fill the form from a stored user.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age.map(|age| age.to_string()).unwrap_or_default(),
            role: user.role,
        }
    }

    /// Apply one input change.
    pub fn set(&mut self, field: FormField) {
        match field {
            FormField::Name(value) => self.name = value,
            FormField::Email(value) => self.email = value,
            FormField::Age(value) => self.age = value,
            FormField::Role(role) => self.role = role,
        }
    }

    /// Build the request body.
    ///
    /// Name and email are sent as typed; the server owns their rules.
    ///
    /// # Errors
    /// Returns [`FormError::InvalidAge`] when the age text is neither blank
    /// nor a non-negative whole number.
    pub fn to_payload(&self) -> Result<UserPayload, FormError> {
        let age_text = self.age.trim();
        let age = if age_text.is_empty() {
            None
        } else {
            Some(
                age_text
                    .parse::<u32>()
                    .map_err(|_| FormError::InvalidAge {
                        value: self.age.clone(),
                    })?,
            )
        };
        Ok(UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            age,
            role: self.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn fields_with_age(age: &str) -> FormFields {
        FormFields {
            name: "Ann".to_owned(),
            email: "ann@x.com".to_owned(),
            age: age.to_owned(),
            role: Role::User,
        }
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("0", Some(0))]
    #[case(" 42 ", Some(42))]
    fn accepts_blank_and_whole_ages(#[case] age: &str, #[case] expected: Option<u32>) {
        let payload = fields_with_age(age).to_payload().expect("payload builds");
        assert_eq!(payload.age, expected);
    }

    #[rstest]
    #[case("-1")]
    #[case("4.5")]
    #[case("abc")]
    #[case("99999999999")]
    fn rejects_other_age_text(#[case] age: &str) {
        assert_eq!(
            fields_with_age(age).to_payload(),
            Err(FormError::InvalidAge {
                value: age.to_owned()
            })
        );
    }

    #[rstest]
    fn defaults_select_the_user_role() {
        let fields = FormFields::default();
        assert_eq!(fields.role, Role::User);
        assert!(fields.name.is_empty() && fields.email.is_empty() && fields.age.is_empty());
    }

    #[rstest]
    #[case(None, "")]
    #[case(Some(31), "31")]
    fn prefills_from_user(#[case] age: Option<u32>, #[case] expected: &str) {
        let user = User {
            id: "id-1".to_owned(),
            name: "Ann".to_owned(),
            email: "ann@x.com".to_owned(),
            age,
            role: Role::Admin,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().expect("time"),
        };

        let fields = FormFields::from_user(&user);
        assert_eq!(fields.age, expected);
        assert_eq!(fields.role, Role::Admin);
    }

    #[rstest]
    fn set_replaces_one_field() {
        let mut fields = FormFields::default();
        fields.set(FormField::Email("bob@x.com".to_owned()));
        fields.set(FormField::Role(Role::Moderator));

        assert_eq!(fields.email, "bob@x.com");
        assert_eq!(fields.role, Role::Moderator);
        assert!(fields.name.is_empty());
    }
}
