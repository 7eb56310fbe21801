//! Floating toast and the compact setup banner

use super::widgets::banner_lines;
use crate::panels::{SetupBanner, Toast, ToastKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Area for a toast anchored to the top-right corner of `area`
pub fn toast_area(area: Rect, message: &str) -> Rect {
    let width = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .max(20)
        .min(area.width);
    let height = 3u16.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width.saturating_add(1)),
        y: area.y + 1u16.min(area.height.saturating_sub(height)),
        width,
        height,
    }
}

pub fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let (accent, title) = match toast.kind() {
        ToastKind::Success => (DEFAULT_THEME.success, " ✓ "),
        ToastKind::Error => (DEFAULT_THEME.error, " ✗ "),
    };
    let rect = toast_area(area, toast.message());

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(DEFAULT_THEME.bg));
    let paragraph = Paragraph::new(Line::from(toast.message().to_string()))
        .style(Style::default().fg(Color::White))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}

/// One-row banner above the tabs
pub fn render_setup_banner(frame: &mut Frame, area: Rect, banner: &SetupBanner) {
    let paragraph =
        Paragraph::new(banner_lines(banner)).style(Style::default().bg(DEFAULT_THEME.current_line_bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_area_fits_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = toast_area(area, &"x".repeat(100));
        assert!(rect.width <= area.width);
        assert!(rect.x + rect.width <= area.width);

        let rect = toast_area(area, "Copied");
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 3);
    }

    #[test]
    fn test_huge_message_stays_inside_area() {
        let area = Rect::new(0, 0, 120, 40);
        let message = format!("Signed in as {}", "a".repeat(70_000));
        let rect = toast_area(area, &message);
        assert_eq!(rect.width, 120);
        assert_eq!(rect.x, 0);
    }
}
