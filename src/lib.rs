//! # Introduction
//!
//! spojen is a terminal walkthrough of integrating a client with a hosted
//! backend-as-a-service: email/password authentication, CRUD over a `messages`
//! collection, and realtime queries. Every action shows the reference client
//! snippet for it in a syntax-highlighted code pane.
//!
//! ## Data flow
//!
//! ```text
//! Key → Shell → Panel → Backend service → PanelEvent → Shell → Code pane
//! ```
//!
//! 1. [`config`]: settings from `spojen.toml` and the environment.
//! 2. [`backend`]: the [`backend::AuthService`] and [`backend::DocumentStore`] seams,
//!    the explicit [`backend::Backend`] handle and an in-process emulator.
//! 3. [`panels`]: auth and message panel state, toast, setup notice.
//! 4. [`highlight`]: single-line tokenizer feeding the code pane.
//! 5. [`snippets`]: the fixed reference snippets.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//! 7. [`logging`]: file sink for the `log` facade.

pub mod backend;
pub mod config;
pub mod highlight;
pub mod logging;
pub mod panels;
pub mod snippets;
pub mod ui;
