//! Setup-required notice

/// Follow-up hint printed under every setup notice
pub const SETUP_HINT: &str = "Console → Authentication → Get started → Email/Password";

/// Notice shown instead of a panel (or above the tabs) when the backend is unconfigured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupBanner {
    pub message: String,
    /// Single-row variant used above the tab bar
    pub compact: bool,
}

impl SetupBanner {
    pub fn new(message: impl Into<String>) -> Self {
        SetupBanner {
            message: message.into(),
            compact: false,
        }
    }

    pub fn compact(message: impl Into<String>) -> Self {
        SetupBanner {
            message: message.into(),
            compact: true,
        }
    }

    pub fn title(&self) -> &'static str {
        "Setup required:"
    }

    pub fn hint(&self) -> &'static str {
        SETUP_HINT
    }
}
