//! Transient notification with auto-dismiss
//!
//! A [`Toast`] schedules exactly one close callback at creation. The owner drives it
//! with [`Toast::tick`] from its event loop; dropping or replacing the toast before the
//! deadline drops the callback unfired, so nothing runs after teardown.

use std::fmt;
use std::time::{Duration, Instant};

/// Time a toast stays up unless told otherwise
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

pub struct Toast {
    message: String,
    kind: ToastKind,
    deadline: Instant,
    on_close: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("deadline", &self.deadline)
            .field("pending_close", &self.on_close.is_some())
            .finish()
    }
}

impl Toast {
    /// Show a toast now with [`DEFAULT_TOAST_DURATION`]
    pub fn new<F>(message: impl Into<String>, kind: ToastKind, on_close: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self::shown_at(message, kind, DEFAULT_TOAST_DURATION, Instant::now(), on_close)
    }

    /// Show a toast created at `shown_at` that closes after `duration`
    pub fn shown_at<F>(
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
        shown_at: Instant,
        on_close: F,
    ) -> Self
    where
        F: FnOnce() + 'static,
    {
        Toast {
            message: message.into(),
            kind,
            deadline: shown_at + duration,
            on_close: Some(Box::new(on_close)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time until the close callback fires
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Fire the close callback if the deadline has passed.
    ///
    /// Returns true on the tick that closed the toast; later ticks return false.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_expired(now) {
            return false;
        }
        match self.on_close.take() {
            Some(on_close) => {
                on_close();
                true
            }
            None => false,
        }
    }
}
