//! Message collection panel
//!
//! One component, two mutually exclusive modes:
//!
//! - **CRUD**: pull-based. Activation fetches the collection; every successful
//!   mutation re-fetches it, the result replaces local state and the read snippet
//!   is shown again.
//! - **Realtime**: activation registers one live query ordered by creation time.
//!   Each push replaces local state and yields [`PanelEvent::SnapshotReceived`].
//!
//! The live query is delivered through an `mpsc` channel drained by
//! [`MessagesPanel::poll_live`]. [`MessagesPanel::teardown`] unsubscribes and drops
//! the receiver, so a push arriving afterwards cannot touch the panel.

use super::input::TextInput;
use super::setup::SetupBanner;
use super::PanelEvent;
use crate::backend::{
    Backend, ListenerId, Message, MessagePatch, NewMessage, OrderBy, StoreError,
    TimestampField, MESSAGES_COLLECTION,
};
use crate::snippets::SnippetKey;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Shown instead of the panel when the backend is unconfigured
pub const STORE_UNAVAILABLE: &str =
    "The document store is not available. Check the configuration and create the database in the console.";

/// Replacement text for any permission failure
pub const SIGN_IN_FIRST: &str = "Sign in (Auth tab) to access messages.";

/// Author recorded when nobody is signed in
pub const ANONYMOUS_AUTHOR: &str = "anon";

/// Rewrite permission failures into the sign-in instruction, pass others through
pub fn describe_data_error(message: &str) -> String {
    if message.to_lowercase().contains("permission") {
        SIGN_IN_FIRST.to_string()
    } else {
        message.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagesMode {
    Crud,
    Realtime,
}

/// Which part of the panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagesFocus {
    Draft,
    List,
    Edit,
}

/// The record currently being edited inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub id: String,
    pub text: TextInput,
}

impl EditTarget {
    pub fn for_message(message: &Message) -> Self {
        EditTarget {
            id: message.id.clone(),
            text: TextInput::with_value(&message.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MessagesRequest {
    Add(String),
    Update,
    Delete(String),
    Refresh,
}

struct LiveQuery {
    id: ListenerId,
    receiver: Receiver<Result<Vec<Message>, StoreError>>,
}

/// State of the CRUD and Realtime tabs
pub struct MessagesPanel {
    backend: Backend,
    mode: MessagesMode,
    pub draft: TextInput,
    items: Vec<Message>,
    error: Option<String>,
    edit: Option<EditTarget>,
    live: Option<LiveQuery>,
    pending: Option<MessagesRequest>,
    focus: MessagesFocus,
    selected: usize,
}

impl MessagesPanel {
    /// Create an inactive panel; call [`MessagesPanel::activate`] to mount it
    pub fn new(backend: Backend, mode: MessagesMode) -> Self {
        MessagesPanel {
            backend,
            mode,
            draft: TextInput::new(),
            items: Vec::new(),
            error: None,
            edit: None,
            live: None,
            pending: None,
            focus: MessagesFocus::Draft,
            selected: 0,
        }
    }

    pub fn mode(&self) -> MessagesMode {
        self.mode
    }

    pub fn items(&self) -> &[Message] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn edit_target(&self) -> Option<&EditTarget> {
        self.edit.as_ref()
    }

    pub fn focus(&self) -> MessagesFocus {
        self.focus
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.items.is_empty()).then(|| self.selected.min(self.items.len() - 1))
    }

    pub fn selected_message(&self) -> Option<&Message> {
        self.selected().and_then(|i| self.items.get(i))
    }

    /// Notice to render instead of the panel, if the backend is unconfigured
    pub fn setup_banner(&self) -> Option<SetupBanner> {
        match self.backend {
            Backend::Connected(_) => None,
            Backend::Unconfigured { .. } => Some(SetupBanner::new(STORE_UNAVAILABLE)),
        }
    }

    /// Mount: fetch the collection (CRUD) or start the live query (Realtime)
    pub fn activate(&mut self) -> Vec<PanelEvent> {
        match self.mode {
            MessagesMode::Crud => self.load(),
            MessagesMode::Realtime => {
                self.subscribe();
                self.poll_live()
            }
        }
    }

    fn subscribe(&mut self) {
        let Some(services) = self.backend.services() else {
            return;
        };
        if self.live.is_some() {
            return;
        }

        let (sender, receiver) = mpsc::channel();
        let id = services.store.subscribe(
            MESSAGES_COLLECTION,
            OrderBy::CreatedAt,
            Box::new(move |result| {
                // The receiver is gone once the panel is torn down
                let _ = sender.send(result);
            }),
        );
        log::info!("Realtime panel subscribed ({:?})", id);
        self.live = Some(LiveQuery { id, receiver });
    }

    /// Release the live query. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(live) = self.live.take() {
            if let Some(services) = self.backend.services() {
                services.store.unsubscribe(live.id);
            }
            log::info!("Realtime panel unsubscribed ({:?})", live.id);
        }
    }

    /// Apply every push received since the last poll
    pub fn poll_live(&mut self) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        loop {
            let received = match &self.live {
                Some(live) => live.receiver.try_recv(),
                None => break,
            };
            match received {
                Ok(Ok(items)) => {
                    self.set_items(items);
                    self.error = None;
                    events.push(PanelEvent::SnapshotReceived);
                }
                Ok(Err(e)) => {
                    log::warn!("Live query failed: {}", e);
                    self.error = Some(describe_data_error(&e.message));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.live = None;
                    break;
                }
            }
        }
        events
    }

    /// Single point where the inline edit target changes.
    ///
    /// Any edit in progress is replaced without confirmation.
    pub fn set_edit_target(&mut self, target: Option<EditTarget>) {
        self.focus = if target.is_some() {
            MessagesFocus::Edit
        } else if self.focus == MessagesFocus::Edit {
            MessagesFocus::List
        } else {
            self.focus
        };
        self.edit = target;
    }

    pub fn start_edit(&mut self, message: &Message) {
        self.set_edit_target(Some(EditTarget::for_message(message)));
    }

    /// Start editing the selected message
    pub fn start_edit_selected(&mut self) {
        if let Some(message) = self.selected_message().cloned() {
            self.start_edit(&message);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.set_edit_target(None);
    }

    pub fn edit_input_mut(&mut self) -> Option<&mut TextInput> {
        self.edit.as_mut().map(|e| &mut e.text)
    }

    /// Move focus between the draft field and the list (the edit field is entered
    /// through [`MessagesPanel::start_edit`])
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            MessagesFocus::Draft => MessagesFocus::List,
            MessagesFocus::List | MessagesFocus::Edit => MessagesFocus::Draft,
        };
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self
            .selected
            .min(self.items.len().saturating_sub(1))
            .saturating_sub(1);
    }

    /// Replace the list, keeping the selection on a row that still exists
    fn set_items(&mut self, items: Vec<Message>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    fn queue(&mut self, request: MessagesRequest) -> bool {
        if self.pending.is_some() || self.setup_banner().is_some() {
            return false;
        }
        self.pending = Some(request);
        true
    }

    /// Queue an insert of the draft text. Blank drafts are ignored.
    pub fn submit_draft(&mut self) -> bool {
        if self.draft.is_blank() {
            return false;
        }
        let text = self.draft.value().to_string();
        self.queue(MessagesRequest::Add(text))
    }

    /// Queue saving the edit target. Blank edits are ignored.
    pub fn submit_edit(&mut self) -> bool {
        match &self.edit {
            Some(edit) if !edit.text.is_blank() => self.queue(MessagesRequest::Update),
            _ => false,
        }
    }

    pub fn request_delete(&mut self, id: &str) -> bool {
        self.queue(MessagesRequest::Delete(id.to_string()))
    }

    pub fn request_delete_selected(&mut self) -> bool {
        match self.selected_message().map(|m| m.id.clone()) {
            Some(id) => self.request_delete(&id),
            None => false,
        }
    }

    /// Queue a manual re-fetch (CRUD mode only)
    pub fn request_refresh(&mut self) -> bool {
        self.mode == MessagesMode::Crud && self.queue(MessagesRequest::Refresh)
    }

    /// Execute the queued request, if any
    pub fn run_pending(&mut self) -> Vec<PanelEvent> {
        let Some(request) = self.pending.take() else {
            return Vec::new();
        };
        match request {
            MessagesRequest::Add(text) => self.add(&text),
            MessagesRequest::Update => self.update(),
            MessagesRequest::Delete(id) => self.delete(&id),
            MessagesRequest::Refresh => self.load(),
        }
    }

    /// Replace local state with a fresh fetch
    pub fn load(&mut self) -> Vec<PanelEvent> {
        if self.fetch() {
            vec![PanelEvent::ShowSnippet(SnippetKey::GetDocs)]
        } else {
            Vec::new()
        }
    }

    fn fetch(&mut self) -> bool {
        let Some(services) = self.backend.services() else {
            return false;
        };
        self.error = None;

        match services.store.fetch_all(MESSAGES_COLLECTION) {
            Ok(items) => {
                self.set_items(items);
                true
            }
            Err(e) => {
                log::warn!("Fetching messages failed: {}", e);
                self.error = Some(describe_data_error(&e.message));
                false
            }
        }
    }

    /// Events for a successful mutation. CRUD mode shows the mutation's snippet
    /// and then re-fetches, which shows the read snippet.
    fn after_mutation(&mut self, snippet: SnippetKey) -> Vec<PanelEvent> {
        match self.mode {
            MessagesMode::Crud => {
                let mut events = vec![PanelEvent::ShowSnippet(snippet)];
                events.extend(self.load());
                events
            }
            MessagesMode::Realtime => Vec::new(),
        }
    }

    /// Insert a message authored by the current session (or [`ANONYMOUS_AUTHOR`])
    pub fn add(&mut self, text: &str) -> Vec<PanelEvent> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let Some(services) = self.backend.services() else {
            return Vec::new();
        };
        self.error = None;

        let author_email = services
            .auth
            .current_user()
            .map(|user| user.email)
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());
        let message = NewMessage {
            text: text.to_string(),
            author_email,
            created_at: TimestampField::Server,
        };

        match services.store.insert(MESSAGES_COLLECTION, message) {
            Ok(id) => {
                log::debug!("Added message {}", id);
                self.draft.clear();
                self.after_mutation(SnippetKey::AddDoc)
            }
            Err(e) => {
                log::warn!("Adding message failed: {}", e);
                self.error = Some(describe_data_error(&e.message));
                Vec::new()
            }
        }
    }

    /// Save the edit target's text
    pub fn update(&mut self) -> Vec<PanelEvent> {
        let Some(edit) = self.edit.as_ref() else {
            return Vec::new();
        };
        let text = edit.text.value().trim().to_string();
        if text.is_empty() {
            return Vec::new();
        }
        let id = edit.id.clone();
        let Some(services) = self.backend.services() else {
            return Vec::new();
        };
        self.error = None;

        match services
            .store
            .update(MESSAGES_COLLECTION, &id, MessagePatch::text(text))
        {
            Ok(()) => {
                log::debug!("Updated message {}", id);
                self.set_edit_target(None);
                self.after_mutation(SnippetKey::UpdateDoc)
            }
            Err(e) => {
                log::warn!("Updating message {} failed: {}", id, e);
                self.error = Some(describe_data_error(&e.message));
                Vec::new()
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> Vec<PanelEvent> {
        let Some(services) = self.backend.services() else {
            return Vec::new();
        };
        self.error = None;

        match services.store.delete(MESSAGES_COLLECTION, id) {
            Ok(()) => {
                log::debug!("Deleted message {}", id);
                self.after_mutation(SnippetKey::DeleteDoc)
            }
            Err(e) => {
                log::warn!("Deleting message {} failed: {}", id, e);
                self.error = Some(describe_data_error(&e.message));
                Vec::new()
            }
        }
    }
}

impl Drop for MessagesPanel {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, text: &str) -> Message {
        Message {
            id: id.to_string(),
            text: text.to_string(),
            author_email: ANONYMOUS_AUTHOR.to_string(),
            created_at: None,
        }
    }

    fn offline_panel() -> MessagesPanel {
        MessagesPanel::new(
            Backend::Unconfigured {
                reason: "missing".to_string(),
            },
            MessagesMode::Crud,
        )
    }

    #[test]
    fn test_permission_rewrite() {
        assert_eq!(
            describe_data_error("Missing or insufficient permissions."),
            SIGN_IN_FIRST
        );
        assert_eq!(describe_data_error("PERMISSION_DENIED"), SIGN_IN_FIRST);
        assert_eq!(describe_data_error("quota exceeded"), "quota exceeded");
    }

    #[test]
    fn test_new_edit_replaces_previous() {
        let mut panel = offline_panel();
        panel.start_edit(&message("a", "first"));
        panel.start_edit(&message("b", "second"));

        let edit = panel.edit_target().unwrap();
        assert_eq!(edit.id, "b");
        assert_eq!(edit.text.value(), "second");
        assert_eq!(panel.focus(), MessagesFocus::Edit);

        panel.cancel_edit();
        assert!(panel.edit_target().is_none());
        assert_eq!(panel.focus(), MessagesFocus::List);
    }

    #[test]
    fn test_unconfigured_panel() {
        let mut panel = offline_panel();
        assert_eq!(panel.setup_banner().unwrap().message, STORE_UNAVAILABLE);
        assert!(panel.activate().is_empty());
        panel.draft.set("hello");
        assert!(!panel.submit_draft());
        assert!(panel.add("hello").is_empty());
    }

    #[test]
    fn test_selection_clamps() {
        let mut panel = offline_panel();
        assert_eq!(panel.selected(), None);
        panel.set_items(vec![message("a", "1"), message("b", "2")]);
        panel.select_next();
        panel.select_next();
        assert_eq!(panel.selected(), Some(1));
        panel.set_items(vec![message("a", "1")]);
        assert_eq!(panel.selected(), Some(0));
        panel.select_prev();
        assert_eq!(panel.selected_message().map(|m| m.id.as_str()), Some("a"));
    }
}
