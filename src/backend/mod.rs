//! Backend services consumed by the panels
//!
//! The demo talks to two external collaborators through traits:
//! - [`auth`]: [`AuthService`] (accounts, sessions, session-change listeners)
//! - [`store`]: [`DocumentStore`] (message CRUD and live queries)
//!
//! [`emulator`] provides an in-process implementation of both, and [`error`] holds
//! the structured failures they report.
//!
//! # Configuration state
//!
//! There is no global client. [`Backend::connect`] produces either
//! [`Backend::Connected`] with shared service handles or [`Backend::Unconfigured`]
//! carrying the reason, and every consumer matches on it explicitly.

pub mod auth;
pub mod emulator;
pub mod error;
pub mod store;

pub use auth::{AuthListener, AuthService, User};
pub use emulator::EmulatorBackend;
pub use error::{AuthError, AuthErrorCode, BackendError, StoreError, StoreErrorCode};
pub use store::{
    DocumentStore, Message, MessagePatch, NewMessage, OrderBy, SnapshotListener,
    TimestampField, MESSAGES_COLLECTION,
};

use crate::config::{Config, MISSING_CONFIG_MESSAGE};
use std::rc::Rc;

/// Handle identifying a registered listener, used to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Shared handles to a configured backend
#[derive(Clone)]
pub struct Services {
    pub project_id: String,
    pub auth: Rc<dyn AuthService>,
    pub store: Rc<dyn DocumentStore>,
}

impl Services {
    /// Bundle one emulator instance as both services
    pub fn from_emulator(emulator: Rc<EmulatorBackend>) -> Self {
        Services {
            project_id: emulator.project_id().to_string(),
            auth: emulator.clone(),
            store: emulator,
        }
    }
}

/// Connection status shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Connected,
    Error,
}

/// Process-wide backend handle, injected into every component that needs it
#[derive(Clone)]
pub enum Backend {
    Connected(Services),
    /// Setup-required state: settings missing or initialization failed
    Unconfigured { reason: String },
}

impl Backend {
    /// Bring the backend up from configuration.
    ///
    /// Never fails: missing settings or an initialization error yield
    /// [`Backend::Unconfigured`].
    pub fn connect(config: &Config) -> Self {
        let missing = config.firebase.missing_required();
        if !missing.is_empty() {
            log::warn!("Backend not configured, missing: {}", missing.join(", "));
            return Backend::Unconfigured {
                reason: MISSING_CONFIG_MESSAGE.to_string(),
            };
        }

        let project_id = config.firebase.project_id.as_deref().unwrap_or_default();
        match EmulatorBackend::new(project_id, config.emulator.clone()) {
            Ok(emulator) => Backend::Connected(Services::from_emulator(Rc::new(emulator))),
            Err(e) => {
                log::error!("Backend initialization failed: {}", e);
                Backend::Unconfigured {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn services(&self) -> Option<&Services> {
        match self {
            Backend::Connected(services) => Some(services),
            Backend::Unconfigured { .. } => None,
        }
    }

    /// Why the backend is unavailable, if it is
    pub fn setup_reason(&self) -> Option<&str> {
        match self {
            Backend::Connected(_) => None,
            Backend::Unconfigured { reason } => Some(reason),
        }
    }

    pub fn status(&self) -> BackendStatus {
        match self {
            Backend::Connected(_) => BackendStatus::Connected,
            Backend::Unconfigured { .. } => BackendStatus::Error,
        }
    }
}
