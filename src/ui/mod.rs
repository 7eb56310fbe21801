//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: shell state, tab routing, session mirroring, keyboard event loop
//! - **[`tabs`]**: the demo tabs and which snippet each one shows
//! - **[`panes`]**: stateless render functions for each visible pane (demo panel,
//!   code, status bar, overlays)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`Backend`](crate::backend::Backend) and call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod tabs;
pub mod theme;

pub use app::App;
pub use tabs::Tab;
