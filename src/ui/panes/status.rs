//! Status bar rendering with session, backend state and keybindings

use crate::backend::{BackendStatus, User};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Text of the session indicator
pub fn session_label(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Auth: {}", user.email),
        None => "Auth: Signed out".to_string(),
    }
}

pub fn backend_label(status: BackendStatus) -> &'static str {
    match status {
        BackendStatus::Connected => "Backend: Connected",
        BackendStatus::Error => "Backend: Error",
    }
}

/// Render the status bar at the bottom.
///
/// `is_typing` swaps the key hints for the ones that apply inside a text field.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    user: Option<&User>,
    status: BackendStatus,
    is_typing: bool,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let bar_bg = DEFAULT_THEME.current_line_bg;
    let status_bg = match status {
        BackendStatus::Connected => DEFAULT_THEME.success,
        BackendStatus::Error => DEFAULT_THEME.error,
    };

    let left_spans = vec![
        Span::styled(
            format!(" {} ", backend_label(status)),
            Style::default()
                .bg(status_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!(" {} ", session_label(user)),
            Style::default().bg(bar_bg).fg(if user.is_some() {
                DEFAULT_THEME.fg
            } else {
                DEFAULT_THEME.comment
            }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg);
    let sep_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (idx, (key, desc)) in key_hints(is_typing).iter().enumerate() {
        if idx > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

const TYPING_HINTS: [(&str, &str); 3] = [("↵", "submit"), ("↑/↓", "field"), ("Esc", "leave")];

const BROWSING_HINTS: [(&str, &str); 5] = [
    ("1-6", "tab"),
    ("Tab", "next tab"),
    ("↵", "focus"),
    ("c", "copy"),
    ("q", "quit"),
];

/// Key/description pairs shown on the right of the status bar
pub fn key_hints(is_typing: bool) -> &'static [(&'static str, &'static str)] {
    if is_typing {
        &TYPING_HINTS
    } else {
        &BROWSING_HINTS
    }
}
