//! Error types reported by the backend services
//!
//! Service failures carry a structured code alongside the human-readable message the
//! service produced. Panels branch on the code and fall back to the message verbatim
//! for anything they do not recognize.

use std::fmt;
use thiserror::Error;

/// Structured auth error code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    /// Email/password sign-in is not enabled for the project
    ConfigurationNotFound,
    InvalidCredential,
    EmailAlreadyInUse,
    WeakPassword,
    /// Any other code, kept in wire form (e.g. `auth/invalid-email`)
    Other(String),
}

impl AuthErrorCode {
    /// Parse a wire code such as `auth/weak-password`
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/configuration-not-found" => AuthErrorCode::ConfigurationNotFound,
            "auth/invalid-credential" => AuthErrorCode::InvalidCredential,
            "auth/email-already-in-use" => AuthErrorCode::EmailAlreadyInUse,
            "auth/weak-password" => AuthErrorCode::WeakPassword,
            other => AuthErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AuthErrorCode::ConfigurationNotFound => "auth/configuration-not-found",
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::Other(code) => code,
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure from the authentication service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        AuthError {
            code,
            message: message.into(),
        }
    }

    /// Build an error whose message follows the `Firebase: Error (<code>).` shape
    pub fn from_code(code: AuthErrorCode) -> Self {
        let message = format!("Firebase: Error ({}).", code);
        AuthError { code, message }
    }
}

/// Structured document store error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorCode {
    PermissionDenied,
    NotFound,
    InvalidArgument,
    Unavailable,
}

impl StoreErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreErrorCode::PermissionDenied => "permission-denied",
            StoreErrorCode::NotFound => "not-found",
            StoreErrorCode::InvalidArgument => "invalid-argument",
            StoreErrorCode::Unavailable => "unavailable",
        }
    }
}

/// Failure from the document store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        StoreError {
            code,
            message: message.into(),
        }
    }

    pub fn permission_denied() -> Self {
        StoreError::new(
            StoreErrorCode::PermissionDenied,
            "Missing or insufficient permissions.",
        )
    }
}

/// Failure while bringing the backend up
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Invalid project id \"{0}\": use 6-30 lowercase letters, digits or hyphens")]
    InvalidProjectId(String),
}
