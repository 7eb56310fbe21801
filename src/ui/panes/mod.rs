//! TUI pane rendering modules
//!
//! Each pane is a stateless `render_*` function over the panel state it shows.
//!
//! # Pane Modules
//!
//! - [`code`]: snippet display with syntax highlighting and line numbers
//! - [`auth`]: sign-in/registration forms and the current session
//! - [`messages`]: message list for the CRUD and Realtime tabs
//! - [`info`]: Overview, Init and Security tabs
//! - [`status`]: status bar with session, backend state and keybindings
//! - [`overlay`]: toast and setup banner drawn over the layout
//! - `widgets`: field, button and notice spans shared by the panes

mod widgets;

pub mod auth;
pub mod code;
pub mod info;
pub mod messages;
pub mod overlay;
pub mod status;

pub use auth::render_auth_pane;
pub use code::{highlight_line, render_code_pane};
pub use info::{render_init_pane, render_overview_pane, render_security_pane, SECURITY_OPTIONS};
pub use messages::render_messages_pane;
pub use overlay::{render_setup_banner, render_toast};
pub use status::render_status_bar;
