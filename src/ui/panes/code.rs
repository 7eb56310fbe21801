//! Code pane rendering with syntax highlighting
//!
//! This module renders the reference snippet for the active tab.
//!
//! # Features
//!
//! - Highlighting for keywords, API calls, string literals and comments
//! - Line numbering in a separate gutter
//! - Scroll offset clamped to the snippet length
//!
//! # Rendering
//!
//! Each line is passed through [`tokenize`](crate::highlight::tokenize); every token
//! becomes one styled span, so the rendered row reproduces the line exactly.

use crate::highlight::tokenize;
use crate::snippets::{snippet, SnippetKey};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Build the highlighted spans for one snippet line
pub fn highlight_line(line: &str) -> Line<'_> {
    let spans: Vec<Span> = tokenize(line)
        .into_iter()
        .map(|token| Span::styled(token.text, DEFAULT_THEME.token_style(token.kind)))
        .collect();
    Line::from(spans)
}

/// Render the code pane
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    key: SnippetKey,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", key.filename()))
        .title_bottom(Line::from(" c copy · PgUp/PgDn scroll ").alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let code = snippet(key);
    let lines: Vec<&str> = code.split('\n').collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let gutter_style = Style::default()
        .fg(DEFAULT_THEME.comment)
        .bg(DEFAULT_THEME.gutter_bg);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![
                Span::styled(format!("{:4} ", idx + 1), gutter_style),
                Span::raw(" "),
            ];
            spans.extend(highlight_line(line).spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_line_preserves_text() {
        let line = "const q = query(collection(db, \"messages\"))";
        let rendered: String = highlight_line(line)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(rendered, line);
    }

    #[test]
    fn test_every_snippet_line_renders() {
        for key in SnippetKey::ALL {
            for line in snippet(key).split('\n') {
                assert!(!highlight_line(line).spans.is_empty());
            }
        }
    }
}
