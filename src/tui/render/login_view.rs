use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::helpers::pad_spans;
use crate::ops::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::tui::app::{App, LoginField};
use crate::util::unicode::LineEditor;

const FORM_WIDTH: u16 = 48;
const LABEL_WIDTH: usize = 10;

/// Render the sign-in form centered in `area`
pub fn render_login_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let inner_w = FORM_WIDTH.min(area.width.saturating_sub(2)).saturating_sub(2) as usize;
    let blank = Style::default().bg(bg);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(" ".repeat(inner_w), blank))];
    lines.push(field_line(
        app,
        "Email",
        app.login.email.text().to_string(),
        &app.login.email,
        app.login.focus == LoginField::Email,
        inner_w,
    ));
    let masked = "\u{2022}".repeat(app.login.password.text().chars().count());
    lines.push(field_line(
        app,
        "Password",
        masked,
        &app.login.password,
        app.login.focus == LoginField::Password,
        inner_w,
    ));
    lines.push(Line::from(Span::styled(" ".repeat(inner_w), blank)));

    let status = if app.ws.auth.is_loading() {
        Span::styled(" Signing in\u{2026}", Style::default().fg(app.theme.cyan).bg(bg))
    } else if let Some(error) = app.ws.auth.error() {
        Span::styled(format!(" {}", error), Style::default().fg(app.theme.red).bg(bg))
    } else {
        Span::styled("", blank)
    };
    let mut status_spans = vec![status];
    pad_spans(&mut status_spans, inner_w, blank);
    lines.push(Line::from(status_spans));

    lines.push(Line::from(Span::styled(
        format!(" Demo: {} / {}", DEMO_EMAIL, DEMO_PASSWORD),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let popup_w = inner_w as u16 + 2;
    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup = Rect::new(x, y, popup_w, popup_h);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Sign in ",
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(blank);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// ` Label     value▌`
fn field_line<'a>(
    app: &App,
    label: &str,
    shown: String,
    editor: &LineEditor,
    focused: bool,
    width: usize,
) -> Line<'a> {
    let bg = app.theme.background;
    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let mut spans = vec![Span::styled(
        format!(" {:<w$}", label, w = LABEL_WIDTH - 1),
        label_style,
    )];

    if focused {
        // Split at the cursor so the block cursor lands in the right cell
        let split = shown
            .char_indices()
            .nth(editor.before_cursor().chars().count())
            .map_or(shown.len(), |(i, _)| i);
        spans.push(Span::styled(shown[..split].to_string(), value_style));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(shown[split..].to_string(), value_style));
    } else {
        spans.push(Span::styled(shown, value_style));
    }
    pad_spans(&mut spans, width, Style::default().bg(bg));
    Line::from(spans)
}
