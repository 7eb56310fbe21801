//! Main TUI application state and logic

use super::panes;
use super::tabs::Tab;
use super::theme::DEFAULT_THEME;
use crate::backend::{Backend, ListenerId, User};
use crate::panels::{
    AuthPanel, MessagesFocus, MessagesMode, MessagesPanel, PanelEvent, SetupBanner, TextInput,
    Toast, ToastKind,
};
use crate::snippets::{snippet, SnippetKey};
use arboard::Clipboard;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend as TerminalBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::Tabs,
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Lines moved by PageUp/PageDown in the code pane
const CODE_PAGE: usize = 10;

/// The shell's session subscription
struct SessionWatch {
    id: ListenerId,
    receiver: Receiver<Option<User>>,
}

/// The main application state
pub struct App {
    backend: Backend,
    tab: Tab,

    /// Latest session reported by the auth service
    user: Option<User>,

    /// Snippet selected by the last panel action
    snippet: SnippetKey,

    toast: Option<Toast>,

    /// Live-query deliveries seen by the Realtime tab, for the app's lifetime
    snapshot_events: usize,

    /// Mounted only while the Auth tab is active
    auth_panel: Option<AuthPanel>,

    /// Mounted only while the CRUD or Realtime tab is active
    messages_panel: Option<MessagesPanel>,

    session: Option<SessionWatch>,

    /// Highlighted button on the Security tab
    security_option: usize,

    code_scroll: usize,

    /// Keys go to the demo panel instead of the tab bar
    panel_focused: bool,

    should_quit: bool,

    /// Created on first copy
    clipboard: Option<Clipboard>,
}

impl App {
    /// Create the shell and subscribe to session changes for its lifetime
    pub fn new(backend: Backend) -> Self {
        let session = backend.services().map(|services| {
            let (sender, receiver) = mpsc::channel();
            let id = services.auth.on_auth_state_changed(Box::new(move |user| {
                let _ = sender.send(user);
            }));
            log::info!("Session listener registered ({:?})", id);
            SessionWatch { id, receiver }
        });

        let mut app = App {
            backend,
            tab: Tab::Overview,
            user: None,
            snippet: SnippetKey::Init,
            toast: None,
            snapshot_events: 0,
            auth_panel: None,
            messages_panel: None,
            session,
            security_option: 1,
            code_scroll: 0,
            panel_focused: false,
            should_quit: false,
            clipboard: None,
        };
        app.poll_session();
        app
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn stored_snippet(&self) -> SnippetKey {
        self.snippet
    }

    /// Snippet the code pane shows for the active tab
    pub fn visible_snippet(&self) -> SnippetKey {
        self.tab.visible_snippet(self.snippet)
    }

    pub fn snapshot_events(&self) -> usize {
        self.snapshot_events
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn auth_panel(&self) -> Option<&AuthPanel> {
        self.auth_panel.as_ref()
    }

    pub fn auth_panel_mut(&mut self) -> Option<&mut AuthPanel> {
        self.auth_panel.as_mut()
    }

    pub fn messages_panel(&self) -> Option<&MessagesPanel> {
        self.messages_panel.as_ref()
    }

    pub fn messages_panel_mut(&mut self) -> Option<&mut MessagesPanel> {
        self.messages_panel.as_mut()
    }

    pub fn is_panel_focused(&self) -> bool {
        self.panel_focused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether keystrokes are currently going into a text field
    pub fn is_typing(&self) -> bool {
        if !self.panel_focused {
            return false;
        }
        match self.tab {
            Tab::Auth => self.auth_panel.as_ref().is_some_and(|p| p.focus().is_text()),
            Tab::Crud | Tab::Realtime => self
                .messages_panel
                .as_ref()
                .is_some_and(|p| p.focus() != MessagesFocus::List),
            Tab::Overview | Tab::Init | Tab::Security => false,
        }
    }

    /// Whether the active tab has controls that can take focus right now
    fn panel_accepts_focus(&self) -> bool {
        match self.tab {
            Tab::Security => true,
            Tab::Auth | Tab::Crud | Tab::Realtime => self.backend.services().is_some(),
            Tab::Overview | Tab::Init => false,
        }
    }

    /// Switch tabs: unmount the old panel, store the entry snippet, mount the new one
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        log::debug!("Tab {} -> {}", self.tab.label(), tab.label());

        // Dropping a messages panel tears down its live query
        self.auth_panel = None;
        self.messages_panel = None;

        self.tab = tab;
        self.panel_focused = false;
        self.code_scroll = 0;
        if let Some(key) = tab.entry_snippet() {
            self.snippet = key;
        }

        let events = match tab {
            Tab::Auth => {
                self.auth_panel = Some(AuthPanel::new(self.backend.clone()));
                Vec::new()
            }
            Tab::Crud | Tab::Realtime => {
                let mode = if tab == Tab::Crud {
                    MessagesMode::Crud
                } else {
                    MessagesMode::Realtime
                };
                let mut panel = MessagesPanel::new(self.backend.clone(), mode);
                let events = panel.activate();
                self.messages_panel = Some(panel);
                events
            }
            Tab::Overview | Tab::Init | Tab::Security => Vec::new(),
        };
        self.apply_events(events);
    }

    fn apply_events(&mut self, events: Vec<PanelEvent>) {
        for event in events {
            match event {
                PanelEvent::ShowSnippet(key) => {
                    self.snippet = key;
                    self.code_scroll = 0;
                }
                PanelEvent::SnapshotReceived => self.snapshot_events += 1,
                PanelEvent::Notice(message) => self.show_toast(message, ToastKind::Success),
            }
        }
    }

    /// Show a toast, replacing (and cancelling) any current one
    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        let message = message.into();
        let logged = message.clone();
        self.toast = Some(Toast::new(message, kind, move || {
            log::debug!("Toast dismissed: {}", logged);
        }));
    }

    fn poll_session(&mut self) {
        let Some(watch) = &self.session else {
            return;
        };
        let mut latest = None;
        while let Ok(user) = watch.receiver.try_recv() {
            latest = Some(user);
        }
        if let Some(user) = latest {
            match &user {
                Some(u) => log::info!("Session: {}", u.email),
                None => log::info!("Session: signed out"),
            }
            self.user = user;
        }
    }

    /// Advance background work: queued requests, live pushes, session changes, toast
    pub fn tick(&mut self, now: Instant) {
        let mut events = Vec::new();
        if let Some(panel) = self.auth_panel.as_mut() {
            events.extend(panel.run_pending());
        }
        if let Some(panel) = self.messages_panel.as_mut() {
            events.extend(panel.run_pending());
            events.extend(panel.poll_live());
        }
        self.apply_events(events);
        self.poll_session();

        if self.toast.as_mut().is_some_and(|toast| toast.tick(now)) {
            self.toast = None;
        }
    }

    /// Release the session subscription and unmount panels. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(watch) = self.session.take() {
            if let Some(services) = self.backend.services() {
                services.auth.remove_auth_listener(watch.id);
            }
            log::info!("Session listener removed ({:?})", watch.id);
        }
        self.auth_panel = None;
        self.messages_panel = None;
        self.toast = None;
    }

    /// Run the TUI application
    pub fn run<B: TerminalBackend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Requests queued by the previous key run after one frame has shown them
            self.tick(Instant::now());

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let banner = self.backend.setup_reason().map(SetupBanner::compact);

        // Banner (when unconfigured), tab bar, panes, status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if banner.is_some() { 1 } else { 0 }),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        if let Some(banner) = &banner {
            panes::render_setup_banner(frame, chunks[0], banner);
        }
        self.render_tabs(frame, chunks[1]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_demo(frame, columns[0]);

        let key = self.visible_snippet();
        panes::render_code_pane(
            frame,
            columns[1],
            key,
            !self.panel_focused,
            &mut self.code_scroll,
        );

        panes::render_status_bar(
            frame,
            chunks[3],
            self.user.as_ref(),
            self.backend.status(),
            self.is_typing(),
        );

        if let Some(toast) = &self.toast {
            panes::render_toast(frame, size, toast);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<String> = Tab::ALL
            .iter()
            .map(|t| format!(" {} {} ", t.index() + 1, t.label()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .bg(DEFAULT_THEME.current_line_bg),
            )
            .highlight_style(
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        frame.render_widget(tabs, area);
    }

    fn render_demo(&self, frame: &mut Frame, area: Rect) {
        let focused = self.panel_focused;
        match self.tab {
            Tab::Overview => panes::render_overview_pane(frame, area, focused),
            Tab::Init => panes::render_init_pane(
                frame,
                area,
                self.backend.services().map(|s| s.project_id.as_str()),
                focused,
            ),
            Tab::Auth => {
                if let Some(panel) = &self.auth_panel {
                    panes::render_auth_pane(frame, area, panel, self.user.as_ref(), focused);
                }
            }
            Tab::Crud | Tab::Realtime => {
                if let Some(panel) = &self.messages_panel {
                    panes::render_messages_pane(
                        frame,
                        area,
                        panel,
                        self.snapshot_events,
                        focused,
                    );
                }
            }
            Tab::Security => panes::render_security_pane(
                frame,
                area,
                self.snippet,
                self.security_option,
                focused,
            ),
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::PageUp => {
                self.code_scroll = self.code_scroll.saturating_sub(CODE_PAGE);
                return;
            }
            KeyCode::PageDown => {
                self.code_scroll = self.code_scroll.saturating_add(CODE_PAGE);
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if self.panel_focused && self.handle_panel_key(key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(tab) = c.to_digit(10).and_then(Tab::from_number) {
                    self.select_tab(tab);
                }
            }
            KeyCode::Tab | KeyCode::Right => self.select_tab(self.tab.next()),
            KeyCode::BackTab | KeyCode::Left => self.select_tab(self.tab.prev()),
            KeyCode::Char('c') => self.copy_snippet(),
            KeyCode::Enter | KeyCode::Down => {
                if self.panel_accepts_focus() {
                    self.panel_focused = true;
                }
            }
            KeyCode::Esc => self.panel_focused = false,
            _ => {}
        }
    }

    /// Route a key to the active panel. Returns false if the panel did not use it.
    fn handle_panel_key(&mut self, key: KeyEvent) -> bool {
        match self.tab {
            Tab::Auth => self.handle_auth_key(key),
            Tab::Crud | Tab::Realtime => self.handle_messages_key(key),
            Tab::Security => self.handle_security_key(key),
            Tab::Overview | Tab::Init => false,
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) -> bool {
        let Some(panel) = self.auth_panel.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => panel.focus_next(),
            KeyCode::BackTab | KeyCode::Up => panel.focus_prev(),
            KeyCode::Enter => {
                panel.activate();
            }
            KeyCode::Esc => self.panel_focused = false,
            _ => {
                return panel
                    .focused_input_mut()
                    .is_some_and(|input| edit_input(input, key));
            }
        }
        true
    }

    fn handle_messages_key(&mut self, key: KeyEvent) -> bool {
        let Some(panel) = self.messages_panel.as_mut() else {
            return false;
        };
        match panel.focus() {
            MessagesFocus::Draft => match key.code {
                KeyCode::Enter => {
                    panel.submit_draft();
                }
                KeyCode::Tab | KeyCode::Down => panel.toggle_focus(),
                KeyCode::Esc => self.panel_focused = false,
                _ => return edit_input(&mut panel.draft, key),
            },
            MessagesFocus::List => match key.code {
                KeyCode::Up => panel.select_prev(),
                KeyCode::Down => panel.select_next(),
                KeyCode::Enter | KeyCode::Char('e') => panel.start_edit_selected(),
                KeyCode::Char('d') | KeyCode::Delete => {
                    panel.request_delete_selected();
                }
                KeyCode::Char('r') => {
                    panel.request_refresh();
                }
                KeyCode::Tab | KeyCode::BackTab => panel.toggle_focus(),
                KeyCode::Esc => self.panel_focused = false,
                _ => return false,
            },
            MessagesFocus::Edit => match key.code {
                KeyCode::Enter => {
                    panel.submit_edit();
                }
                KeyCode::Esc => panel.cancel_edit(),
                KeyCode::Tab | KeyCode::BackTab => panel.toggle_focus(),
                _ => {
                    return panel
                        .edit_input_mut()
                        .is_some_and(|input| edit_input(input, key));
                }
            },
        }
        true
    }

    fn handle_security_key(&mut self, key: KeyEvent) -> bool {
        let count = panes::SECURITY_OPTIONS.len();
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => {
                self.security_option = (self.security_option + 1) % count;
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => {
                self.security_option = (self.security_option + count - 1) % count;
            }
            KeyCode::Enter => self.choose_rules(panes::SECURITY_OPTIONS[self.security_option].0),
            KeyCode::Esc => self.panel_focused = false,
            _ => return false,
        }
        true
    }

    /// Security tab action: show one of the two rule sets
    pub fn choose_rules(&mut self, key: SnippetKey) {
        if matches!(key, SnippetKey::RulesInsecure | SnippetKey::RulesSecure) {
            self.snippet = key;
            self.code_scroll = 0;
        }
    }

    /// Copy the visible snippet and report the outcome in a toast
    fn copy_snippet(&mut self) {
        let text = snippet(self.visible_snippet());

        if self.clipboard.is_none() {
            self.clipboard = match Clipboard::new() {
                Ok(clipboard) => Some(clipboard),
                Err(e) => {
                    log::warn!("Clipboard not available: {}", e);
                    None
                }
            };
        }

        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| format!("Failed to set clipboard text: {}", e)),
            None => Err("Clipboard not available".to_string()),
        };

        match result {
            Ok(()) => self.show_toast("Snippet copied", ToastKind::Success),
            Err(e) => {
                log::warn!("{}", e);
                self.show_toast(e, ToastKind::Error);
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Apply an editing key to a text field. Returns false for keys a field ignores.
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn offline_app() -> App {
        App::new(Backend::Unconfigured {
            reason: "missing".to_string(),
        })
    }

    #[test]
    fn test_edit_input_keys() {
        let mut input = TextInput::new();
        assert!(edit_input(&mut input, press(KeyCode::Char('h'))));
        assert!(edit_input(&mut input, press(KeyCode::Char('i'))));
        assert!(edit_input(&mut input, press(KeyCode::Left)));
        assert!(edit_input(&mut input, press(KeyCode::Backspace)));
        assert_eq!(input.value(), "i");
        assert!(!edit_input(&mut input, press(KeyCode::Enter)));
        assert!(!edit_input(
            &mut input,
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_number_keys_and_arrows_switch_tabs() {
        let mut app = offline_app();
        app.handle_key_event(press(KeyCode::Char('6')));
        assert_eq!(app.tab(), Tab::Security);
        app.handle_key_event(press(KeyCode::Right));
        assert_eq!(app.tab(), Tab::Overview);
        app.handle_key_event(press(KeyCode::BackTab));
        assert_eq!(app.tab(), Tab::Security);
    }

    #[test]
    fn test_unconfigured_panels_do_not_take_focus() {
        let mut app = offline_app();
        app.select_tab(Tab::Auth);
        app.handle_key_event(press(KeyCode::Enter));
        assert!(!app.is_panel_focused());

        app.select_tab(Tab::Security);
        app.handle_key_event(press(KeyCode::Enter));
        assert!(app.is_panel_focused());
    }

    #[test]
    fn test_security_buttons_choose_rules() {
        let mut app = offline_app();
        app.select_tab(Tab::Security);
        assert_eq!(app.visible_snippet(), SnippetKey::RulesSecure);

        app.handle_key_event(press(KeyCode::Enter));
        app.handle_key_event(press(KeyCode::Left));
        app.handle_key_event(press(KeyCode::Enter));
        assert_eq!(app.visible_snippet(), SnippetKey::RulesInsecure);

        app.choose_rules(SnippetKey::RulesSecure);
        assert_eq!(app.visible_snippet(), SnippetKey::RulesSecure);
    }

    #[test]
    fn test_q_quits_only_outside_text_fields() {
        let mut app = offline_app();
        app.handle_key_event(press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_toast_replaced_and_expired() {
        let mut app = offline_app();
        app.show_toast("first", ToastKind::Success);
        app.show_toast("second", ToastKind::Error);
        assert_eq!(app.toast().map(|t| t.message()), Some("second"));

        app.tick(Instant::now() + Duration::from_secs(4));
        assert!(app.toast().is_none());
    }
}
