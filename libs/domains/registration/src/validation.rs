use validator::{Validate, ValidationError};
use zeroize::Zeroizing;

use crate::error::ValidationErrors;
use crate::models::RegistrationRequest;

/// Characters besides ASCII letters and digits that survive email sanitizing.
const EMAIL_SYMBOLS: &str = "!#$%&'*+-=?^_`{|}~@.[]";

/// Field order for reported messages.
const FIELD_ORDER: [&str; 3] = ["username", "email", "password"];

/// Drop every character that cannot appear in an email address.
///
/// This only strips characters; it does not check the address shape.
pub fn sanitize_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || EMAIL_SYMBOLS.contains(*c))
        .collect()
}

/// A submission after normalization that passed every rule.
///
/// The plaintext password is wiped when this value is dropped, whether or
/// not validation passed.
#[derive(Validate)]
pub struct NewRegistration {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
    #[validate(custom(function = "not_empty", message = "Password must not be empty"))]
    pub password: Zeroizing<String>,
}

fn not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("length"));
    }
    Ok(())
}

/// Normalize and validate a submission.
///
/// The username is trimmed and the email sanitized; the password is taken
/// as-is. Every field is checked, so a submission with three empty fields
/// yields three messages.
pub fn validate(request: RegistrationRequest) -> Result<NewRegistration, ValidationErrors> {
    let RegistrationRequest {
        username,
        email,
        password,
    } = request;

    let candidate = NewRegistration {
        username: username.trim().to_string(),
        email: sanitize_email(&email),
        password,
    };

    match candidate.validate() {
        Ok(()) => Ok(candidate),
        Err(errors) => Err(ordered_messages(&errors)),
    }
}

fn ordered_messages(errors: &validator::ValidationErrors) -> ValidationErrors {
    let field_errors = errors.field_errors();

    let messages = FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errs| errs.iter())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .collect();

    ValidationErrors::new(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_email_strips_disallowed_characters() {
        assert_eq!(sanitize_email(" amy@x.com "), "amy@x.com");
        assert_eq!(sanitize_email("a(m)y<>@x.com"), "amy@x.com");
        assert_eq!(sanitize_email("zoë@x.com"), "zo@x.com");
        assert_eq!(sanitize_email("o'brien+tag@x.com"), "o'brien+tag@x.com");
    }

    #[test]
    fn test_sanitize_email_can_empty_the_field() {
        assert_eq!(sanitize_email("   "), "");
        assert_eq!(sanitize_email("()<>"), "");
    }

    #[test]
    fn test_valid_submission_is_normalized() {
        let valid = validate(RegistrationRequest::new("  amy  ", " amy@x.com", " pw ")).unwrap();

        assert_eq!(valid.username, "amy");
        assert_eq!(valid.email, "amy@x.com");
        // Passwords are never trimmed
        assert_eq!(valid.password.as_str(), " pw ");
    }

    #[test]
    fn test_all_empty_fields_reported_in_order() {
        let errors = validate(RegistrationRequest::new("", "", ""))
            .err()
            .unwrap();

        assert_eq!(
            errors.messages(),
            [
                "Username must not be empty",
                "Email must not be empty",
                "Password must not be empty",
            ]
        );
    }

    #[test]
    fn test_whitespace_username_is_empty() {
        let errors = validate(RegistrationRequest::new(" \t ", "amy@x.com", "secret123"))
            .err()
            .unwrap();

        assert_eq!(errors.messages(), ["Username must not be empty"]);
    }

    #[test]
    fn test_email_emptied_by_sanitizing_is_empty() {
        let errors = validate(RegistrationRequest::new("amy", "<>", "secret123"))
            .err()
            .unwrap();

        assert_eq!(errors.messages(), ["Email must not be empty"]);
    }

    #[test]
    fn test_only_password_missing() {
        let errors = validate(RegistrationRequest::new("amy", "amy@x.com", ""))
            .err()
            .unwrap();

        assert_eq!(errors.messages(), ["Password must not be empty"]);
    }

    #[test]
    fn test_whitespace_password_is_not_empty() {
        assert!(validate(RegistrationRequest::new("amy", "amy@x.com", "   ")).is_ok());
    }

    fn wiped_on_drop<T: zeroize::ZeroizeOnDrop>(_: &T) {}

    #[test]
    fn test_password_buffers_are_wiped_on_drop() {
        let request = RegistrationRequest::new("", "", "secret123");
        wiped_on_drop(&request.password);

        let valid = validate(RegistrationRequest::new("amy", "amy@x.com", "secret123")).unwrap();
        wiped_on_drop(&valid.password);
    }

    #[test]
    fn test_rejected_submission_keeps_no_plaintext_in_messages() {
        let errors = validate(RegistrationRequest::new("", "amy@x.com", "secret123"))
            .err()
            .unwrap();

        assert!(!errors.to_string().contains("secret123"));
    }
}
