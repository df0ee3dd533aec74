//! Input validation and normalisation
//!
//! Field presence and email format are declared on the request types with
//! the `validator` derive; the helpers here cover what a derive cannot
//! express (normalisation and bcrypt's input limit).

use validator::ValidationErrors;

/// bcrypt ignores everything past 72 bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Canonical form of a username: trimmed and lowercased
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Canonical form of an email address: trimmed, case preserved
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Validate a normalised username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if username.chars().any(char::is_whitespace) {
        return Err("Username must not contain whitespace".to_string());
    }
    Ok(())
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        ));
    }
    Ok(())
}

/// Collapse derive-generated errors into one message, stable across runs
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .unwrap_or_else(|| "Invalid input".to_string())
}
