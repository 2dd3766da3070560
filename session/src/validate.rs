//! Input validation run before any network call.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::error::ValidationError;

/// Validated sign-in input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginInput {
    pub identifier: String,
    pub password: String,
}

/// Validated registration input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterInput {
    pub username: String,
    pub identifier: String,
    pub password: String,
}

/// Identifier is trimmed; the password is kept verbatim but must not be empty.
///
/// # Errors
///
/// Returns the first missing field.
pub fn login_input(identifier: &str, password: &str) -> Result<LoginInput, ValidationError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(ValidationError::MissingIdentifier);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(LoginInput { identifier: identifier.to_owned(), password: password.to_owned() })
}

/// Username and identifier are trimmed; all three are required.
///
/// # Errors
///
/// Returns the first missing field.
pub fn register_input(username: &str, identifier: &str, password: &str) -> Result<RegisterInput, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    let LoginInput { identifier, password } = login_input(identifier, password)?;
    Ok(RegisterInput { username: username.to_owned(), identifier, password })
}

/// Trim `value` and require it to be non-empty.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] naming `field`.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_owned())
}
