pub mod board_view;
pub mod command_palette;
mod helpers;
pub mod login_view;
pub mod notifications_view;
pub mod projects_view;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Screen};
use crate::ops::auth::{Guard, guard};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    if guard(&app.route(), &app.ws.auth) == Guard::Loading {
        render_loading(frame, app, chunks[1]);
    } else {
        match app.screen {
            Screen::Login => login_view::render_login_view(frame, app, chunks[1]),
            Screen::Projects => projects_view::render_projects_view(frame, app, chunks[1]),
            Screen::Board => board_view::render_board_view(frame, app, chunks[1]),
            Screen::Notifications => {
                notifications_view::render_notifications_view(frame, app, chunks[1])
            }
        }
    }

    // Command palette (rendered on top of content)
    if app.palette.is_some() {
        command_palette::render_command_palette(frame, app, chunks[1]);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let y = area.y + area.height / 2;
    let line = Line::from("Loading\u{2026}").centered();
    let paragraph = Paragraph::new(line).style(Style::default().fg(app.theme.dim));
    frame.render_widget(paragraph, Rect::new(area.x, y, area.width, 1));
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use crate::io::storage::MemoryStorage;
    use crate::ops::auth::AuthGate;
    use crate::tui::app::App;
    use std::time::Duration;

    #[test]
    fn restoring_session_shows_loading() {
        let mut app = logged_out_app();
        // A gate that has not looked for a session yet
        app.ws.auth = AuthGate::new(Duration::ZERO);
        let output = render_app(&app);
        assert!(output.contains("Loading\u{2026}"));
        assert!(!output.contains("Sign in"));

        app.ws.auth.restore(&MemoryStorage::new()).unwrap();
        assert!(render_app(&app).contains("Sign in"));
    }

    #[test]
    fn every_screen_has_header_and_status_row() {
        let app = App::new(workspace());
        let output = render_app(&app);
        let first = output.lines().next().unwrap();
        assert!(first.contains("taskdeck"));
        assert_eq!(output.lines().count(), 24);
    }
}
