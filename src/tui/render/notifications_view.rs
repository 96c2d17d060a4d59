use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::pad_spans;
use crate::model::Notification;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the notification list, newest first
pub fn render_notifications_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let items = app.visible_notifications();

    let shown = if app.notifications.unread_only {
        "unread"
    } else {
        "all"
    };
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(" showing: ", Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(shown, Style::default().fg(app.theme.text).bg(bg)),
            Span::styled(
                format!("   {} unread", app.ws.notifications.unread_count()),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ]),
        Line::from(""),
    ];

    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "   No notifications",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    // Each notification takes two rows
    let slots = ((area.height as usize).saturating_sub(lines.len()) / 2).max(1);
    let cursor = app.notifications.cursor;
    let offset = (cursor + 1).saturating_sub(slots);
    for (i, n) in items.iter().enumerate().skip(offset).take(slots) {
        lines.extend(notification_lines(app, n, i == cursor, width));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn notification_lines<'a>(
    app: &App,
    n: &Notification,
    selected: bool,
    width: usize,
) -> [Line<'a>; 2] {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let title_style = if n.read {
        Style::default().fg(app.theme.text).bg(row_bg)
    } else {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    };
    let indicator = if selected { " \u{25B6} " } else { "   " };
    let dot = if n.read { "  " } else { "\u{25CF} " };
    let date = n.created_at.format("%Y-%m-%d").to_string();

    let mut head = vec![
        Span::styled(indicator, Style::default().fg(app.theme.highlight).bg(row_bg)),
        Span::styled(
            dot,
            Style::default()
                .fg(app.theme.notification_color(n.kind))
                .bg(row_bg),
        ),
        Span::styled(
            truncate_to_width(&n.title, width.saturating_sub(5 + date.len() + 2)),
            title_style,
        ),
    ];
    let used = super::helpers::spans_width(&head);
    if used + date.len() + 1 < width {
        head.push(Span::styled(
            " ".repeat(width - used - date.len() - 1),
            Style::default().bg(row_bg),
        ));
        head.push(Span::styled(date, Style::default().fg(app.theme.dim).bg(row_bg)));
    }
    pad_spans(&mut head, width, Style::default().bg(row_bg));

    let mut body = vec![
        Span::styled("     ", Style::default().bg(row_bg)),
        Span::styled(
            truncate_to_width(&n.message, width.saturating_sub(6)),
            Style::default().fg(app.theme.dim).bg(row_bg),
        ),
    ];
    pad_spans(&mut body, width, Style::default().bg(row_bg));

    [Line::from(head), Line::from(body)]
}
