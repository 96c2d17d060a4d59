use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::spans_width;
use crate::tui::app::{App, Mode, Screen};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, hint) = match app.mode {
        Mode::Search => (
            prompt(app, "/", app.projects.search.text()),
            "Enter keep  Esc clear",
        ),
        Mode::AddCard => (
            prompt(app, "new card: ", app.new_card.text()),
            "Enter add  Esc cancel",
        ),
        Mode::Palette => (Vec::new(), "\u{2191}\u{2193} select  Enter open  Esc close"),
        Mode::Navigate => {
            let message = app
                .message
                .as_ref()
                .map(|m| {
                    vec![Span::styled(
                        format!(" {}", m),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    )]
                })
                .unwrap_or_default();
            (message, navigate_hint(app.screen))
        }
    };

    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// `label` + text + block cursor
fn prompt<'a>(app: &App, label: &str, text: &str) -> Vec<Span<'a>> {
    let bg = app.theme.background;
    vec![
        Span::styled(
            format!("{}{}", label, text),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
    ]
}

fn navigate_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "Tab switch field  Enter sign in  Esc quit",
        Screen::Projects => "Enter open  f status  s sort  / search  : palette",
        Screen::Board => "hjkl move  <> column  space done  a add  d delete",
        Screen::Notifications => "r read  R all read  d delete  u unread only",
    }
}
