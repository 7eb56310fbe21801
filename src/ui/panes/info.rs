//! Static tabs: overview diagram, client initialization, security rules

use super::widgets::{button_span, muted_line};
use crate::snippets::SnippetKey;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Placeholder when there is no project to show
pub const NO_PROJECT: &str = "—";

const OVERVIEW: [&str; 9] = [
    "┌────────────┐        ┌──────────────────┐",
    "│  terminal  │ ─────▶ │  Authentication  │",
    "│   client   │        └──────────────────┘",
    "│            │        ┌──────────────────┐",
    "│            │ ◀────▶ │    Firestore     │",
    "└────────────┘        │  (collection:    │",
    "                      │     messages)    │",
    "                      └──────────────────┘",
    "",
];

fn block(title: &str, is_focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused))
}

pub fn render_overview_pane(frame: &mut Frame, area: Rect, is_focused: bool) {
    let diagram_style = Style::default().fg(DEFAULT_THEME.primary);
    let mut lines: Vec<Line> = OVERVIEW
        .iter()
        .map(|row| Line::from(Span::styled(*row, diagram_style)))
        .collect();
    lines.push(Line::from(
        "The client signs users in, then reads and writes documents.",
    ));
    lines.push(Line::from(
        "Security rules on the server decide who may touch which document.",
    ));
    lines.push(Line::default());
    lines.push(muted_line("1-6 or ←/→ switch tabs · Tab focus panel · q quit"));

    let paragraph = Paragraph::new(lines)
        .block(block(" Overview ", is_focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Render the Init tab. `project_id` is `None` when the backend is unconfigured.
pub fn render_init_pane(frame: &mut Frame, area: Rect, project_id: Option<&str>, is_focused: bool) {
    let lines = vec![
        Line::from("initializeApp(config) creates the client once at startup."),
        Line::from("Auth and Firestore handles are derived from it."),
        Line::default(),
        Line::from(vec![
            Span::styled("Project: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                project_id.unwrap_or(NO_PROJECT).to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block(" Init ", is_focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// The two rule sets the Security tab offers, in display order
pub const SECURITY_OPTIONS: [(SnippetKey, &str); 2] = [
    (SnippetKey::RulesInsecure, "Insecure (anyone)"),
    (SnippetKey::RulesSecure, "Signed-in only"),
];

/// Render the Security tab
pub fn render_security_pane(
    frame: &mut Frame,
    area: Rect,
    shown: SnippetKey,
    focused_option: usize,
    is_focused: bool,
) {
    let mut lines = vec![
        Line::from("Rules run on the server for every read and write."),
        Line::from("Compare an open database with one that requires a session."),
        Line::default(),
    ];

    let mut buttons = Vec::new();
    for (idx, (key, label)) in SECURITY_OPTIONS.iter().enumerate() {
        let marker = if *key == shown { "● " } else { "○ " };
        buttons.push(Span::styled(
            marker,
            Style::default().fg(DEFAULT_THEME.secondary),
        ));
        buttons.push(button_span(label, is_focused && idx == focused_option, false));
        buttons.push(Span::raw("  "));
    }
    lines.push(Line::from(buttons));

    let paragraph = Paragraph::new(lines)
        .block(block(" Security rules ", is_focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
