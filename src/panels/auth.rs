//! Sign-in, registration and sign-out

use super::input::TextInput;
use super::setup::SetupBanner;
use super::PanelEvent;
use crate::backend::{AuthError, AuthErrorCode, Backend};
use crate::snippets::SnippetKey;

/// Shown instead of the forms when the backend is unconfigured
pub const AUTH_UNAVAILABLE: &str =
    "Auth is not available. Check the configuration and enable Email/Password in the console.";

pub const AUTH_NOT_ENABLED: &str =
    "Auth is not enabled in the console: Authentication → Get started → Email/Password";
pub const WRONG_CREDENTIALS: &str = "Wrong email or password";
pub const EMAIL_TAKEN: &str = "Email is already registered";
pub const WEAK_PASSWORD: &str = "Password must be at least 6 characters";
pub const FIELDS_REQUIRED: &str = "Email and password are required";

/// Guidance for a failed sign-in
pub fn describe_sign_in_error(err: &AuthError) -> String {
    match err.code {
        AuthErrorCode::ConfigurationNotFound => AUTH_NOT_ENABLED.to_string(),
        AuthErrorCode::InvalidCredential => WRONG_CREDENTIALS.to_string(),
        _ => err.message.clone(),
    }
}

/// Guidance for a failed registration
pub fn describe_register_error(err: &AuthError) -> String {
    match err.code {
        AuthErrorCode::ConfigurationNotFound => AUTH_NOT_ENABLED.to_string(),
        AuthErrorCode::EmailAlreadyInUse => EMAIL_TAKEN.to_string(),
        AuthErrorCode::WeakPassword => WEAK_PASSWORD.to_string(),
        _ => err.message.clone(),
    }
}

/// Focusable controls, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    SignInEmail,
    SignInPassword,
    SignInButton,
    RegisterEmail,
    RegisterPassword,
    RegisterButton,
    SignOutButton,
}

impl AuthField {
    const ORDER: [AuthField; 7] = [
        AuthField::SignInEmail,
        AuthField::SignInPassword,
        AuthField::SignInButton,
        AuthField::RegisterEmail,
        AuthField::RegisterPassword,
        AuthField::RegisterButton,
        AuthField::SignOutButton,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            AuthField::SignInEmail
                | AuthField::SignInPassword
                | AuthField::RegisterEmail
                | AuthField::RegisterPassword
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AuthRequest {
    SignIn { email: String, password: String },
    Register { email: String, password: String },
    SignOut,
}

/// State of the Auth tab
pub struct AuthPanel {
    backend: Backend,
    pub sign_in_email: TextInput,
    pub sign_in_password: TextInput,
    pub register_email: TextInput,
    pub register_password: TextInput,
    focus: AuthField,
    pending: Option<AuthRequest>,
    error: Option<String>,
}

impl AuthPanel {
    pub fn new(backend: Backend) -> Self {
        AuthPanel {
            backend,
            sign_in_email: TextInput::new(),
            sign_in_password: TextInput::masked(),
            register_email: TextInput::new(),
            register_password: TextInput::masked(),
            focus: AuthField::SignInEmail,
            pending: None,
            error: None,
        }
    }

    /// Notice to render instead of the forms, if the backend is unconfigured
    pub fn setup_banner(&self) -> Option<SetupBanner> {
        match self.backend {
            Backend::Connected(_) => None,
            Backend::Unconfigured { .. } => Some(SetupBanner::new(AUTH_UNAVAILABLE)),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn focus(&self) -> AuthField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// The text field under focus, if focus is on a text field
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            AuthField::SignInEmail => Some(&mut self.sign_in_email),
            AuthField::SignInPassword => Some(&mut self.sign_in_password),
            AuthField::RegisterEmail => Some(&mut self.register_email),
            AuthField::RegisterPassword => Some(&mut self.register_password),
            _ => None,
        }
    }

    /// Enter on the focused control submits the form it belongs to
    pub fn activate(&mut self) -> bool {
        match self.focus {
            AuthField::SignInEmail | AuthField::SignInPassword | AuthField::SignInButton => {
                self.submit_sign_in()
            }
            AuthField::RegisterEmail
            | AuthField::RegisterPassword
            | AuthField::RegisterButton => self.submit_register(),
            AuthField::SignOutButton => self.request_sign_out(),
        }
    }

    fn queue(&mut self, request: AuthRequest) -> bool {
        if self.pending.is_some() || self.setup_banner().is_some() {
            return false;
        }
        self.error = None;
        self.pending = Some(request);
        true
    }

    /// Queue a sign-in with the form contents. Returns false if nothing was queued.
    pub fn submit_sign_in(&mut self) -> bool {
        if self.sign_in_email.is_blank() || self.sign_in_password.value().is_empty() {
            self.error = Some(FIELDS_REQUIRED.to_string());
            return false;
        }
        self.queue(AuthRequest::SignIn {
            email: self.sign_in_email.value().trim().to_string(),
            password: self.sign_in_password.value().to_string(),
        })
    }

    /// Queue a registration with the form contents. Returns false if nothing was queued.
    pub fn submit_register(&mut self) -> bool {
        if self.register_email.is_blank() || self.register_password.value().is_empty() {
            self.error = Some(FIELDS_REQUIRED.to_string());
            return false;
        }
        self.queue(AuthRequest::Register {
            email: self.register_email.value().trim().to_string(),
            password: self.register_password.value().to_string(),
        })
    }

    pub fn request_sign_out(&mut self) -> bool {
        self.queue(AuthRequest::SignOut)
    }

    /// Execute the queued request, if any
    pub fn run_pending(&mut self) -> Vec<PanelEvent> {
        let Some(request) = self.pending.take() else {
            return Vec::new();
        };
        match request {
            AuthRequest::SignIn { email, password } => self.sign_in(&email, &password),
            AuthRequest::Register { email, password } => self.register(&email, &password),
            AuthRequest::SignOut => self.sign_out(),
        }
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Vec<PanelEvent> {
        let Some(services) = self.backend.services() else {
            return Vec::new();
        };
        self.error = None;
        log::debug!("Signing in {}", email);

        match services.auth.sign_in(email, password) {
            Ok(user) => {
                self.sign_in_password.clear();
                vec![
                    PanelEvent::ShowSnippet(SnippetKey::Login),
                    PanelEvent::Notice(format!("Signed in as {}", user.email)),
                ]
            }
            Err(e) => {
                log::warn!("Sign-in failed ({}): {}", e.code, e);
                self.error = Some(describe_sign_in_error(&e));
                Vec::new()
            }
        }
    }

    pub fn register(&mut self, email: &str, password: &str) -> Vec<PanelEvent> {
        let Some(services) = self.backend.services() else {
            return Vec::new();
        };
        self.error = None;
        log::debug!("Registering {}", email);

        match services.auth.create_account(email, password) {
            Ok(user) => {
                self.register_password.clear();
                vec![
                    PanelEvent::ShowSnippet(SnippetKey::Register),
                    PanelEvent::Notice(format!("Account created for {}", user.email)),
                ]
            }
            Err(e) => {
                log::warn!("Registration failed ({}): {}", e.code, e);
                self.error = Some(describe_register_error(&e));
                Vec::new()
            }
        }
    }

    pub fn sign_out(&mut self) -> Vec<PanelEvent> {
        let Some(services) = self.backend.services() else {
            return Vec::new();
        };
        self.error = None;

        match services.auth.sign_out() {
            Ok(()) => vec![
                PanelEvent::ShowSnippet(SnippetKey::SignOut),
                PanelEvent::Notice("Signed out".to_string()),
            ],
            Err(e) => {
                log::warn!("Sign-out failed: {}", e);
                self.error = Some(e.message);
                Vec::new()
            }
        }
    }
}
