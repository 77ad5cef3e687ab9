//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Not found errors
    UsernameNotFound,
    EmailNotFound,
    UserNotFound,
    HeroNotFound,
    HeroTypeNotFound,

    // Uniqueness conflicts
    UsernameExists,
    EmailExists,
    HeroExists,

    // Invalid arguments
    PasswordMissing,
    IllegalPasswordArgument,
    ValidationFailed,

    // Failed operations
    ResetPasswordFailed,

    // Infrastructure errors
    DatabaseError,
    HashingError,
    EventPublishError,
    InternalError,
}

/// Coarse classification of error codes, used by transport layers to map
/// failures to status codes without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidArgument,
    OperationFailed,
    Internal,
}

impl ErrorCode {
    /// Returns the coarse kind this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::UsernameNotFound
            | ErrorCode::EmailNotFound
            | ErrorCode::UserNotFound
            | ErrorCode::HeroNotFound
            | ErrorCode::HeroTypeNotFound => ErrorKind::NotFound,
            ErrorCode::UsernameExists | ErrorCode::EmailExists | ErrorCode::HeroExists => {
                ErrorKind::Conflict
            }
            ErrorCode::PasswordMissing
            | ErrorCode::IllegalPasswordArgument
            | ErrorCode::ValidationFailed => ErrorKind::InvalidArgument,
            ErrorCode::ResetPasswordFailed => ErrorKind::OperationFailed,
            ErrorCode::DatabaseError
            | ErrorCode::HashingError
            | ErrorCode::EventPublishError
            | ErrorCode::InternalError => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::UsernameNotFound => "USERNAME_NOT_FOUND",
            ErrorCode::EmailNotFound => "EMAIL_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::HeroNotFound => "HERO_NOT_FOUND",
            ErrorCode::HeroTypeNotFound => "HERO_TYPE_NOT_FOUND",
            ErrorCode::UsernameExists => "USERNAME_EXISTS",
            ErrorCode::EmailExists => "EMAIL_EXISTS",
            ErrorCode::HeroExists => "HERO_EXISTS",
            ErrorCode::PasswordMissing => "PASSWORD_MISSING",
            ErrorCode::IllegalPasswordArgument => "ILLEGAL_PASSWORD_ARGUMENT",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ResetPasswordFailed => "RESET_PASSWORD_FAILED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::HashingError => "HASHING_ERROR",
            ErrorCode::EventPublishError => "EVENT_PUBLISH_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Details carry the offending key (username, email, hero name) so a
/// transport layer can build structured responses without parsing messages.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Creates an unknown-username error carrying the looked-up name.
    pub fn username_not_found(username: &str) -> Self {
        Self::new(
            ErrorCode::UsernameNotFound,
            format!("Username '{}' not found", username),
        )
        .with_detail("username", username)
    }

    /// Creates an unknown-hero error carrying the looked-up name.
    pub fn hero_not_found(name: &str) -> Self {
        Self::new(ErrorCode::HeroNotFound, format!("Hero '{}' not found", name))
            .with_detail("name", name)
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::HeroNotFound, "Hero 'frostmourne' not found");
        assert_eq!(
            format!("{}", err),
            "[HERO_NOT_FOUND] Hero 'frostmourne' not found"
        );
    }

    #[test]
    fn username_not_found_carries_offending_key() {
        let err = DomainError::username_not_found("arthas");
        assert_eq!(err.code, ErrorCode::UsernameNotFound);
        assert_eq!(err.details.get("username"), Some(&"arthas".to_string()));
    }

    #[test]
    fn codes_classify_into_kinds() {
        assert_eq!(ErrorCode::UsernameExists.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::HeroTypeNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            ErrorCode::IllegalPasswordArgument.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ErrorCode::ResetPasswordFailed.kind(),
            ErrorKind::OperationFailed
        );
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Internal);
    }

    #[test]
    fn with_detail_accumulates() {
        let err = DomainError::new(ErrorCode::EmailExists, "email taken")
            .with_detail("email", "a@x.com")
            .with_detail("username", "arthas");
        assert_eq!(err.details.len(), 2);
    }
}
