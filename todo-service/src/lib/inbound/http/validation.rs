use std::collections::BTreeMap;
use std::str::FromStr;

/// Field-keyed validation messages; an empty map means the input passed.
///
/// Keys are the submitted form field names so the client can render each
/// message next to its input.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

const REQUIRED: &str = "Required";
const NAME_TOO_LONG: &str = "Cannot exceed 50 characters";
const NAME_BAD_CHARS: &str = "Can only include letters, spaces, hyphens and apostrophes";
const INVALID_EMAIL: &str = "Invalid email";

fn push(errors: &mut FieldErrors, field: &'static str, message: &str) {
    errors.entry(field).or_default().push(message.to_string());
}

/// Sign-in form rules: both fields non-empty, nothing else.
///
/// Deliberately permissive so existing users can attempt login with any
/// stored password; credential correctness is checked separately.
pub fn validate_sign_in(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if email.is_empty() {
        push(&mut errors, "email", REQUIRED);
    }
    if password.is_empty() {
        push(&mut errors, "password", REQUIRED);
    }

    errors
}

/// Todo form rules: name and priority non-empty; description and deadline
/// are free-form.
pub fn validate_todo_form(name: &str, priority: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if name.trim().is_empty() {
        push(&mut errors, "todoName", REQUIRED);
    }
    if priority.trim().is_empty() {
        push(&mut errors, "todoPriority", REQUIRED);
    }

    errors
}

/// Account form rules: name optional but constrained, email required and
/// syntactically valid.
pub fn validate_account_info(name: &str, email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if name.chars().count() > 50 {
        push(&mut errors, "name", NAME_TOO_LONG);
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
    {
        push(&mut errors, "name", NAME_BAD_CHARS);
    }

    if email.is_empty() {
        push(&mut errors, "email", REQUIRED);
    } else if email_address::EmailAddress::from_str(email).is_err() {
        push(&mut errors, "email", INVALID_EMAIL);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_empty_email_errors_on_email_only() {
        let errors = validate_sign_in("", "x");

        assert_eq!(errors.get("email"), Some(&vec!["Required".to_string()]));
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_sign_in_both_fields_empty() {
        let errors = validate_sign_in("", "");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_sign_in_permissive_about_email_format() {
        assert!(validate_sign_in("not-an-email", "pw").is_empty());
    }

    #[test]
    fn test_todo_form_requires_name_and_priority() {
        let errors = validate_todo_form("", " ");

        assert!(errors.contains_key("todoName"));
        assert!(errors.contains_key("todoPriority"));

        assert!(validate_todo_form("Buy groceries", "1").is_empty());
    }

    #[test]
    fn test_account_info_accepts_empty_name() {
        assert!(validate_account_info("", "root@gmail.com").is_empty());
    }

    #[test]
    fn test_account_info_rejects_bad_name_characters() {
        let errors = validate_account_info("root1", "root@gmail.com");
        assert_eq!(
            errors.get("name"),
            Some(&vec![NAME_BAD_CHARS.to_string()])
        );
    }

    #[test]
    fn test_account_info_rejects_long_name() {
        let errors = validate_account_info(&"a".repeat(51), "root@gmail.com");
        assert_eq!(errors.get("name"), Some(&vec![NAME_TOO_LONG.to_string()]));
    }

    #[test]
    fn test_account_info_email_rules() {
        let errors = validate_account_info("Root", "");
        assert_eq!(errors.get("email"), Some(&vec![REQUIRED.to_string()]));

        let errors = validate_account_info("Root", "nope");
        assert_eq!(errors.get("email"), Some(&vec![INVALID_EMAIL.to_string()]));
    }
}
