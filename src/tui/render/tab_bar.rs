use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::spans_width;
use crate::tui::app::{App, Screen};

/// Render the tab bar: app name, screen tabs and the signed-in user, with a
/// separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let sep = Paragraph::new(Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )));
    frame.render_widget(sep, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            " taskdeck ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let Some(user) = app.ws.user() else {
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        return;
    };

    let on_board = app.screen == Screen::Board;
    let unread = app.ws.notifications.unread_count();
    let notifications = if unread > 0 {
        format!(" Notifications ({}) ", unread)
    } else {
        " Notifications ".to_string()
    };
    let mut tabs = vec![
        (" Projects ".to_string(), app.screen == Screen::Projects),
        (notifications, app.screen == Screen::Notifications),
    ];
    if on_board && let Some(project) = app.board_project() {
        tabs.insert(1, (format!(" {} ", project.name), true));
    }

    for (label, is_current) in tabs {
        spans.push(sep.clone());
        spans.push(Span::styled(label, tab_style(app, is_current)));
    }
    spans.push(sep);

    let right = format!("{} ", user.name);
    let used = spans_width(&spans) + right.chars().count();
    let width = area.width as usize;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), bg_style));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
