use engage_ui::validation::{FormErrors, ValidationResult, Validator};
use regex::Regex;

#[test]
fn test_valid_form() {
    let result = Validator::new()
        .field("email", "agent@example.com")
        .required("Email is required")
        .email("Enter a valid email address")
        .field("password", "hunter22")
        .required("Password is required")
        .min_length(8, "Password must be at least 8 characters")
        .validate();

    assert!(result.is_valid());
    assert!(result.errors().is_empty());
}

#[test]
fn test_first_failing_rule_per_field() {
    let result = Validator::new()
        .field("email", "")
        .required("Email is required")
        .email("Enter a valid email address")
        .field("password", "short")
        .required("Password is required")
        .min_length(8, "Password must be at least 8 characters")
        .max_length(4, "too long")
        .validate();

    assert_eq!(result.errors().len(), 2);
    assert_eq!(result.error_for("email"), Some("Email is required"));
    assert_eq!(
        result.error_for("password"),
        Some("Password must be at least 8 characters")
    );
}

#[test]
fn test_email_rule() {
    let result = Validator::new()
        .field("email", "not-an-email")
        .email("Enter a valid email address")
        .validate();

    assert_eq!(
        result.first_error().map(|e| e.message.as_str()),
        Some("Enter a valid email address")
    );
}

#[test]
fn test_pattern_and_equals() {
    let code = Regex::new(r"^[A-Z]{3}$").unwrap();
    let result = Validator::new()
        .field("code", "ab1")
        .pattern(&code, "Use three capital letters")
        .field("password_confirmation", "secret1")
        .equals("secret2", "Passwords do not match")
        .validate();

    assert_eq!(result.error_for("code"), Some("Use three capital letters"));
    assert_eq!(
        result.error_for("password_confirmation"),
        Some("Passwords do not match")
    );
}

#[test]
fn test_whitespace_fails_required() {
    let result = Validator::new().field("name", "   ").required("Name is required").validate();
    assert!(matches!(result, ValidationResult::Invalid(_)));
}

#[test]
fn test_form_errors_from_result() {
    let result = Validator::new()
        .field("name", "")
        .required("Name is required")
        .validate();

    let mut errors = FormErrors::from_result(&result);
    assert_eq!(errors.get("name"), Some("Name is required"));
    assert_eq!(errors.message(), None);

    errors.set_message("Could not save");
    errors.clear_field("name");
    assert!(!errors.is_empty());

    errors.clear();
    assert!(errors.is_empty());
}
