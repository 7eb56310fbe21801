//! Demo tabs and the snippet each one shows

use crate::snippets::SnippetKey;

/// A demo tab, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Init,
    Auth,
    Crud,
    Realtime,
    Security,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Init,
        Tab::Auth,
        Tab::Crud,
        Tab::Realtime,
        Tab::Security,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Init => "Init",
            Tab::Auth => "Auth",
            Tab::Crud => "CRUD",
            Tab::Realtime => "Realtime",
            Tab::Security => "Security rules",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Tab for a `1`-based number key
    pub fn from_number(n: u32) -> Option<Self> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Snippet stored when the tab is entered, if the tab uses the stored snippet
    pub fn entry_snippet(self) -> Option<SnippetKey> {
        match self {
            Tab::Auth => Some(SnippetKey::Login),
            Tab::Crud => Some(SnippetKey::AddDoc),
            Tab::Security => Some(SnippetKey::RulesSecure),
            Tab::Overview | Tab::Init | Tab::Realtime => None,
        }
    }

    /// Snippet displayed for the tab given the currently stored one
    pub fn visible_snippet(self, stored: SnippetKey) -> SnippetKey {
        match self {
            Tab::Overview | Tab::Init => SnippetKey::Init,
            Tab::Realtime => SnippetKey::OnSnapshot,
            Tab::Auth | Tab::Crud | Tab::Security => stored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys() {
        assert_eq!(Tab::from_number(1), Some(Tab::Overview));
        assert_eq!(Tab::from_number(6), Some(Tab::Security));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(7), None);
    }

    #[test]
    fn test_cycle() {
        assert_eq!(Tab::Security.next(), Tab::Overview);
        assert_eq!(Tab::Overview.prev(), Tab::Security);
    }

    #[test]
    fn test_snippet_routing() {
        assert_eq!(Tab::Overview.visible_snippet(SnippetKey::Login), SnippetKey::Init);
        assert_eq!(Tab::Realtime.visible_snippet(SnippetKey::AddDoc), SnippetKey::OnSnapshot);
        assert_eq!(Tab::Crud.visible_snippet(SnippetKey::DeleteDoc), SnippetKey::DeleteDoc);
        assert_eq!(Tab::Security.entry_snippet(), Some(SnippetKey::RulesSecure));
        assert_eq!(Tab::Init.entry_snippet(), None);
    }
}
