//! Submitted credentials and their presence validation.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Both fields are required; the message is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please enter both Unique Code and Password.")]
pub struct ValidationError {
    pub identifier_missing: bool,
    pub secret_missing: bool,
}

/// A unique code and password for exactly one login attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    identifier: String,
    secret: SecretString,
}

impl Credentials {
    /// Trims both values and rejects either being empty.
    pub fn parse(identifier: &str, secret: &str) -> Result<Self, ValidationError> {
        let identifier = identifier.trim();
        let secret = secret.trim();

        if identifier.is_empty() || secret.is_empty() {
            return Err(ValidationError {
                identifier_missing: identifier.is_empty(),
                secret_missing: secret.is_empty(),
            });
        }

        Ok(Self {
            identifier: identifier.to_string(),
            secret: SecretString::new(secret.to_string().into_boxed_str()),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_both_fields() {
        let creds = Credentials::parse("  ABC123\t", " hunter2 ").unwrap();
        assert_eq!(creds.identifier(), "ABC123");
        assert_eq!(creds.secret(), "hunter2");
    }

    #[test]
    fn test_empty_fields_rejected() {
        let err = Credentials::parse("", "x").unwrap_err();
        assert!(err.identifier_missing);
        assert!(!err.secret_missing);

        let err = Credentials::parse("ABC123", "").unwrap_err();
        assert!(!err.identifier_missing);
        assert!(err.secret_missing);

        let err = Credentials::parse("", "").unwrap_err();
        assert!(err.identifier_missing && err.secret_missing);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        assert!(Credentials::parse("   ", "hunter2").is_err());
        assert!(Credentials::parse("ABC123", " \t ").is_err());
    }

    #[test]
    fn test_no_format_constraints() {
        let creds = Credentials::parse("' OR '1'='1", "ü∑ 密码").unwrap();
        assert_eq!(creds.identifier(), "' OR '1'='1");
        assert_eq!(creds.secret(), "ü∑ 密码");
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let creds = Credentials::parse("ABC123", "hunter2").unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("ABC123"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_validation_message() {
        let err = Credentials::parse("", "").unwrap_err();
        assert_eq!(err.to_string(), "Please enter both Unique Code and Password.");
    }
}
