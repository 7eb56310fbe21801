//! Demo panel state
//!
//! Each panel owns its inputs, its latest error and at most one queued request, and
//! talks to the backend only through the [`Backend`](crate::backend::Backend) handle it
//! was given. Nothing here draws; the `ui` module renders this state.
//!
//! # Panels
//!
//! - [`auth`]: sign-in, registration and sign-out forms
//! - [`messages`]: message collection in CRUD or Realtime mode
//! - [`toast`]: transient notification with auto-dismiss
//! - [`setup`]: setup-required notice for an unconfigured backend
//! - [`input`]: single-line text field state shared by the forms
//!
//! # Requests
//!
//! User actions queue a request (`submit_*`) and the shell executes it on its next
//! tick with `run_pending`, after one frame has shown the pending state. The direct
//! methods (`sign_in`, `add`, ...) perform the call immediately. Results come back
//! as [`PanelEvent`]s for the shell to act on.

pub mod auth;
pub mod input;
pub mod messages;
pub mod setup;
pub mod toast;

pub use auth::{AuthField, AuthPanel};
pub use input::TextInput;
pub use messages::{EditTarget, MessagesFocus, MessagesMode, MessagesPanel};
pub use setup::SetupBanner;
pub use toast::{Toast, ToastKind, DEFAULT_TOAST_DURATION};

use crate::snippets::SnippetKey;

/// Something a panel asks the shell to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Display this snippet in the code pane
    ShowSnippet(SnippetKey),
    /// A live query delivered a result set
    SnapshotReceived,
    /// Report a successful action to the user
    Notice(String),
}
