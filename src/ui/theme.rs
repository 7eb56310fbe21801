use crate::highlight::TokenKind;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub function: Color,
    pub code_text: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub gutter_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(152, 195, 121),
    error: Color::Rgb(224, 108, 117),
    keyword: Color::Rgb(198, 120, 221),        // Purple for keywords
    string: Color::Rgb(152, 195, 121),         // Green for strings
    function: Color::Rgb(97, 175, 239),        // Blue for API calls
    code_text: Color::Rgb(171, 178, 191),      // Plain snippet text
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for bars
    gutter_bg: Color::Rgb(24, 24, 37),         // Line number gutter
};

impl Theme {
    /// Style for a highlighted snippet token
    pub fn token_style(&self, kind: TokenKind) -> Style {
        match kind {
            TokenKind::Keyword => Style::default().fg(self.keyword),
            TokenKind::Function => Style::default().fg(self.function),
            TokenKind::String => Style::default().fg(self.string),
            TokenKind::Comment => Style::default()
                .fg(self.comment)
                .add_modifier(Modifier::ITALIC),
            TokenKind::Default => Style::default().fg(self.code_text),
        }
    }

    /// Border style for a pane, brighter when it has focus
    pub fn border_style(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }
}
