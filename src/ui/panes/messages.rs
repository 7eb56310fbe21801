//! CRUD and Realtime tabs: message list with draft and inline edit rows

use super::widgets::{banner_lines, button_span, error_line, field_line, muted_line};
use crate::backend::{Message, MESSAGES_COLLECTION};
use crate::panels::{MessagesFocus, MessagesMode, MessagesPanel};
use crate::ui::theme::DEFAULT_THEME;
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const EMPTY_LIST: &str = "No messages. Add the first one!";

/// Creation time as local `HH:MM`, blank while the server stamp is pending
pub fn format_time(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

fn message_line(message: &Message, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "▶ " } else { "  " };
    let row_style = if is_selected {
        Style::default().bg(DEFAULT_THEME.current_line_bg)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(
            marker.to_string(),
            row_style.fg(DEFAULT_THEME.border_focused),
        ),
        Span::styled(
            format!("{}: ", message.author_email),
            row_style
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(message.text.clone(), row_style.fg(DEFAULT_THEME.fg)),
        Span::styled(
            format!("  {}", format_time(message.created_at)),
            row_style.fg(DEFAULT_THEME.comment),
        ),
    ])
}

/// First line to draw so that `focus_line` stays inside a window of
/// `visible_height` lines
pub fn list_scroll(focus_line: Option<usize>, total_lines: usize, visible_height: usize) -> usize {
    let visible_height = visible_height.max(1);
    if total_lines <= visible_height {
        return 0;
    }
    match focus_line {
        Some(line) if line >= visible_height => {
            (line + 1 - visible_height).min(total_lines - visible_height)
        }
        _ => 0,
    }
}

/// Render a message panel in either mode.
///
/// `snapshot_events` is only shown in Realtime mode.
pub fn render_messages_pane(
    frame: &mut Frame,
    area: Rect,
    panel: &MessagesPanel,
    snapshot_events: usize,
    is_focused: bool,
) {
    let title = match panel.mode() {
        MessagesMode::Crud => " Messages (CRUD) ",
        MessagesMode::Realtime => " Messages (Realtime) ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if let Some(banner) = panel.setup_banner() {
        let paragraph = Paragraph::new(banner_lines(&banner))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let focus = panel.focus();
    let mut lines = Vec::new();

    let mut draft = field_line(
        "New",
        &panel.draft,
        is_focused && focus == MessagesFocus::Draft,
    );
    draft.spans.push(Span::raw(" "));
    draft
        .spans
        .push(button_span("Add", false, panel.is_pending()));
    lines.push(draft);

    match panel.mode() {
        MessagesMode::Crud => lines.push(muted_line("r refresh · e edit · d delete")),
        MessagesMode::Realtime => lines.push(Line::from(vec![
            Span::styled(
                "onSnapshot calls: ",
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(
                snapshot_events.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
    }

    if let Some(error) = panel.error() {
        lines.push(error_line(error));
    }
    lines.push(Line::default());

    if panel.is_pending() && panel.items().is_empty() {
        lines.push(muted_line("Loading..."));
    } else if panel.items().is_empty() {
        lines.push(muted_line(EMPTY_LIST));
        lines.push(muted_line(format!(
            "Messages are stored in the \"{}\" collection.",
            MESSAGES_COLLECTION
        )));
    }

    let selected = if focus == MessagesFocus::List {
        panel.selected()
    } else {
        None
    };
    let edit = panel.edit_target();
    let mut focus_line = None;

    for (idx, message) in panel.items().iter().enumerate() {
        match edit {
            Some(target) if target.id == message.id => {
                focus_line = Some(lines.len());
                let mut row = field_line(
                    "  Edit",
                    &target.text,
                    is_focused && focus == MessagesFocus::Edit,
                );
                row.spans.push(Span::raw(" "));
                row.spans
                    .push(button_span("Save", false, panel.is_pending()));
                row.spans.push(Span::styled(
                    " Esc cancel",
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
                lines.push(row);
            }
            _ => {
                if selected == Some(idx) {
                    focus_line = Some(lines.len());
                }
                lines.push(message_line(message, selected == Some(idx)));
            }
        }
    }

    // Rows are not wrapped so that one message is one line
    let visible_height = area.height.saturating_sub(2) as usize;
    let offset = list_scroll(focus_line, lines.len(), visible_height);
    let visible_lines: Vec<Line> = lines.into_iter().skip(offset).collect();
    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
