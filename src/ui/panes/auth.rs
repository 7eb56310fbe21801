//! Auth tab: sign-in and registration forms, session summary

use super::widgets::{banner_lines, button_span, error_line, field_line, muted_line};
use crate::backend::User;
use crate::panels::{AuthField, AuthPanel};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Render the Auth tab
pub fn render_auth_pane(
    frame: &mut Frame,
    area: Rect,
    panel: &AuthPanel,
    user: Option<&User>,
    is_focused: bool,
) {
    let block = Block::default()
        .title(" Auth ")
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
    let focused = |field: AuthField| is_focused && focus == field;
    let pending = panel.is_pending();

    let mut lines = Vec::new();

    if let Some(user) = user {
        lines.push(Line::from(vec![
            Span::styled("Hello, ", Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled(
                user.email.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(muted_line(format!("uid {}", user.uid)));
        lines.push(Line::from(button_span(
            "Sign out",
            focused(AuthField::SignOutButton),
            pending,
        )));
    } else {
        lines.push(muted_line("Signed out"));
    }
    lines.push(Line::default());

    lines.push(heading("Sign in"));
    lines.push(field_line(
        "Email",
        &panel.sign_in_email,
        focused(AuthField::SignInEmail),
    ));
    lines.push(field_line(
        "Password",
        &panel.sign_in_password,
        focused(AuthField::SignInPassword),
    ));
    lines.push(Line::from(button_span(
        "Sign in",
        focused(AuthField::SignInButton),
        pending,
    )));
    lines.push(Line::default());

    lines.push(heading("Register"));
    lines.push(field_line(
        "Email",
        &panel.register_email,
        focused(AuthField::RegisterEmail),
    ));
    lines.push(field_line(
        "Password",
        &panel.register_password,
        focused(AuthField::RegisterPassword),
    ));
    lines.push(Line::from(button_span(
        "Register",
        focused(AuthField::RegisterButton),
        pending,
    )));

    if user.is_none() && focus == AuthField::SignOutButton && is_focused {
        lines.push(Line::default());
        lines.push(muted_line("Nobody is signed in"));
    }

    if let Some(error) = panel.error() {
        lines.push(Line::default());
        lines.push(error_line(error));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
