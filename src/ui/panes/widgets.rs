//! Shared span builders for form fields, buttons and notices

use crate::panels::{SetupBanner, TextInput};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Label plus field contents; a focused field shows a block cursor
pub(crate) fn field_line<'a>(label: &'a str, input: &TextInput, is_focused: bool) -> Line<'a> {
    let label_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };
    let value_style = Style::default()
        .fg(DEFAULT_THEME.fg)
        .bg(DEFAULT_THEME.current_line_bg);

    let mut spans = vec![Span::styled(format!("{:<10}", label), label_style)];
    let shown: Vec<char> = input.display().chars().collect();

    if is_focused {
        let cursor = input.cursor().min(shown.len());
        let before: String = shown[..cursor].iter().collect();
        let at: String = shown.get(cursor).map_or(" ".to_string(), |c| c.to_string());
        let after: String = shown.get(cursor + 1..).map_or(String::new(), |s| s.iter().collect());
        spans.push(Span::styled(before, value_style));
        spans.push(Span::styled(
            at,
            value_style.add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(after, value_style));
    } else if shown.is_empty() {
        spans.push(Span::styled(" ", value_style));
    } else {
        spans.push(Span::styled(shown.into_iter().collect::<String>(), value_style));
    }

    Line::from(spans)
}

/// A button; pending buttons read `...` like a disabled submit
pub(crate) fn button_span(label: &str, is_focused: bool, is_pending: bool) -> Span<'static> {
    let text = if is_pending {
        " ... ".to_string()
    } else {
        format!(" {} ", label)
    };
    let style = if is_focused {
        Style::default()
            .bg(DEFAULT_THEME.border_focused)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.primary)
            .fg(Color::Black)
    };
    Span::styled(text, style)
}

pub(crate) fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("✗ {}", message),
        Style::default().fg(DEFAULT_THEME.error),
    ))
}

pub(crate) fn muted_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(DEFAULT_THEME.comment),
    ))
}

/// Lines for a setup-required notice
pub(crate) fn banner_lines(banner: &SetupBanner) -> Vec<Line<'static>> {
    let title_style = Style::default()
        .fg(DEFAULT_THEME.error)
        .add_modifier(Modifier::BOLD);
    let message_style = Style::default().fg(DEFAULT_THEME.error);

    let headline = Line::from(vec![
        Span::styled(banner.title(), title_style),
        Span::styled(format!(" {}", banner.message), message_style),
    ]);
    if banner.compact {
        return vec![headline];
    }
    vec![
        headline,
        Line::from(Span::styled(
            banner.hint(),
            message_style.add_modifier(Modifier::DIM),
        )),
    ]
}
