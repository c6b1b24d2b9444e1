//! Sign-up and sign-in inputs with field-level validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ValidationErrors;

/// Errors that can occur during user input validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email is not a valid address")]
    InvalidEmail,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

impl UserValidationError {
    /// Input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong(_) => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::PasswordTooShort(_) | Self::PasswordTooLong(_) => "password",
        }
    }
}

const MAX_NAME_LENGTH: usize = 100;
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !EMAIL_RE.is_match(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 6 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    let len = password.chars().count();

    if len < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if len > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

fn collect(
    checks: impl IntoIterator<Item = Result<(), UserValidationError>>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for err in checks.into_iter().filter_map(Result::err) {
        errors.add(err.field(), err.to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl SignUpInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        collect([
            validate_name(&self.name),
            validate_email(&self.email),
            validate_password(&self.password),
        ])
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInInput {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl SignInInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        collect([validate_email(&self.email), validate_password(&self.password)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(name: &str, email: &str, password: &str) -> SignUpInput {
        SignUpInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("ann@x.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.org").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
        assert_eq!(validate_email("ann"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("ann@x"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("a nn@x.com"), Err(UserValidationError::InvalidEmail));
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Ann").is_ok());
        assert_eq!(validate_name("   "), Err(UserValidationError::EmptyName));
        assert_eq!(
            validate_name(&"a".repeat(101)),
            Err(UserValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("secret1").is_ok());
        assert_eq!(
            validate_password("12345"),
            Err(UserValidationError::PasswordTooShort(6))
        );
        assert_eq!(
            validate_password(&"a".repeat(129)),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }

    #[test]
    fn test_sign_up_valid() {
        assert!(sign_up("Ann", "ann@x.com", "secret1").validate().is_ok());
    }

    #[test]
    fn test_sign_up_collects_every_field() {
        let errors = sign_up("", "not-an-email", "123").validate().unwrap_err();

        let fields: Vec<&str> = errors.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
    }

    #[test]
    fn test_sign_in_validation() {
        let input = SignInInput {
            email: "ann@x.com".to_string(),
            password: "".to_string(),
        };

        let errors = input.validate().unwrap_err();
        assert!(errors.fields().contains_key("password"));
        assert!(!errors.fields().contains_key("email"));
    }

    #[test]
    fn test_password_is_not_serialized() {
        let json = serde_json::to_string(&sign_up("Ann", "ann@x.com", "secret1")).unwrap();
        assert!(!json.contains("secret1"));
    }
}
