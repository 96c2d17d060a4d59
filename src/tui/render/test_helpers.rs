use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::{MemoryStorage, Storage};
use crate::io::workspace::Workspace;
use crate::model::Config;
use crate::ops::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::tui::app::{App, AppWorkspace};

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the default test size.
pub fn render_app(app: &App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// A seeded in-memory workspace with no login delay, already saved.
pub fn workspace() -> AppWorkspace {
    let mut config = Config::default();
    config.auth.login_delay_ms = 0;
    let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
    let mut ws = Workspace::init(storage, config).unwrap();
    ws.save().unwrap();
    ws
}

pub fn logged_out_app() -> App {
    App::new(workspace())
}

/// An App signed in as the demo user, on the project list.
pub fn logged_in_app() -> App {
    let mut ws = workspace();
    ws.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
    App::new(ws)
}

/// An App showing the board of `project_id`.
pub fn app_on_board(project_id: &str) -> App {
    let mut app = logged_in_app();
    app.open_board(project_id);
    app
}

/// Raw stored document for `key`.
pub fn storage_text(app: &App, key: &str) -> String {
    app.ws.storage().get(key).unwrap().unwrap_or_default()
}
