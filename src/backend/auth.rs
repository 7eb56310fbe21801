//! Authentication service contract

use super::error::AuthError;
use super::ListenerId;

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: String,
}

/// Callback invoked with the current session whenever it changes
pub type AuthListener = Box<dyn FnMut(Option<User>)>;

/// Email/password authentication.
///
/// Every call is a single request; nothing is retried.
pub trait AuthService {
    /// Create an account and sign it in
    fn create_account(&self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_out(&self) -> Result<(), AuthError>;

    fn current_user(&self) -> Option<User>;

    /// Register a session listener. It is invoked once immediately with the current
    /// session and again after every change until removed.
    fn on_auth_state_changed(&self, listener: AuthListener) -> ListenerId;

    fn remove_auth_listener(&self, id: ListenerId);
}
