use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PersonNameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// The password hash never leaves the domain layer: response types copy the
/// other fields and drop it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: Option<PersonName>,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type.
///
/// At most 50 characters; letters (any script), spaces, hyphens and
/// apostrophes only. The empty name is handled above this type: handlers map
/// a blank form field to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 50;

    /// Create a validated display name.
    ///
    /// # Errors
    /// * `TooLong` - more than 50 characters
    /// * `InvalidCharacters` - anything other than letters, spaces, hyphens
    ///   and apostrophes
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if !name
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
        {
            return Err(PersonNameError::InvalidCharacters);
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to update a user's account details.
///
/// Only the display name and email are mutable; password change is a stated
/// future action with no contract yet.
#[derive(Debug)]
pub struct UpdateAccountCommand {
    pub name: Option<PersonName>,
    pub email: EmailAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_accepts_letters_spaces_hyphens_apostrophes() {
        for name in ["Mary-Jane O'Neil", "José", "", "Anne Marie"] {
            assert!(PersonName::new(name.to_string()).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_person_name_rejects_digits_and_symbols() {
        for name in ["root1", "a@b", "x_y"] {
            assert_eq!(
                PersonName::new(name.to_string()),
                Err(PersonNameError::InvalidCharacters),
                "{name}"
            );
        }
    }

    #[test]
    fn test_person_name_rejects_over_fifty_characters() {
        let name = "a".repeat(51);
        assert!(matches!(
            PersonName::new(name),
            Err(PersonNameError::TooLong { max: 50, actual: 51 })
        ));
    }

    #[test]
    fn test_email_address_validation() {
        assert!(EmailAddress::new("root@gmail.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_user_id_round_trips_through_string() {
        let id = UserId::new();
        let parsed = UserId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        assert!(UserId::from_string("not-a-uuid").is_err());
    }
}
