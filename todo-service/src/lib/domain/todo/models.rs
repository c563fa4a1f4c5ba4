use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;
use crate::todo::errors::TodoIdError;
use crate::todo::errors::TodoNameError;

/// Todo aggregate entity.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub name: TodoName,
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Todo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo name value type; the only constraint is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoName(String);

impl TodoName {
    /// Create a validated todo name.
    ///
    /// # Errors
    /// * `Empty` - name is empty or whitespace only
    pub fn new(name: String) -> Result<Self, TodoNameError> {
        if name.trim().is_empty() {
            return Err(TodoNameError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo priority, stored as an integer code.
///
/// Codes outside the known domain collapse to `Unspecified` with a neutral
/// label instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Unspecified,
}

impl Priority {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Priority::High,
            2 => Priority::Medium,
            3 => Priority::Low,
            _ => Priority::Unspecified,
        }
    }

    /// Parse a submitted form value. Non-numeric input maps to
    /// `Unspecified` rather than erroring, matching the deadline tolerance.
    pub fn from_form_value(value: &str) -> Self {
        Self::from_code(value.trim().parse().unwrap_or(0))
    }

    pub fn code(&self) -> i32 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Unspecified => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Unspecified => "None",
        }
    }
}

/// Parse a submitted deadline string.
///
/// Dates arrive as `YYYY-MM-DD` from the date picker. Empty or unparseable
/// input yields `None`; a bad date must not fail the request.
pub fn parse_deadline(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Command to create a new todo for an owner.
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub name: TodoName,
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
}

/// Command to replace a todo's mutable fields.
///
/// Edits are a full replace, not a patch: every mutable field is set from
/// the submitted form.
#[derive(Debug)]
pub struct UpdateTodoCommand {
    pub name: TodoName,
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_name_rejects_empty_and_whitespace() {
        assert_eq!(TodoName::new("".to_string()), Err(TodoNameError::Empty));
        assert_eq!(TodoName::new("   ".to_string()), Err(TodoNameError::Empty));
        assert!(TodoName::new("Buy groceries".to_string()).is_ok());
    }

    #[test]
    fn test_priority_codes_and_labels() {
        assert_eq!(Priority::from_code(1), Priority::High);
        assert_eq!(Priority::from_code(2), Priority::Medium);
        assert_eq!(Priority::from_code(3), Priority::Low);
        assert_eq!(Priority::from_code(42), Priority::Unspecified);
        assert_eq!(Priority::Unspecified.label(), "None");
        assert_eq!(Priority::High.code(), 1);
    }

    #[test]
    fn test_priority_form_value_is_tolerant() {
        assert_eq!(Priority::from_form_value("2"), Priority::Medium);
        assert_eq!(Priority::from_form_value("high"), Priority::Unspecified);
        assert_eq!(Priority::from_form_value(""), Priority::Unspecified);
    }

    #[test]
    fn test_parse_deadline_accepts_iso_dates() {
        assert_eq!(
            parse_deadline("2025-12-01"),
            NaiveDate::from_ymd_opt(2025, 12, 1)
        );
    }

    #[test]
    fn test_parse_deadline_tolerates_garbage() {
        assert_eq!(parse_deadline("not-a-date"), None);
        assert_eq!(parse_deadline(""), None);
        assert_eq!(parse_deadline("2025-13-40"), None);
    }
}
