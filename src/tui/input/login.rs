use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;

use super::edit_line;
use crate::tui::app::{App, LoginField};

pub(super) fn handle_login(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.focus = match app.login.focus {
                LoginField::Email => LoginField::Password,
                LoginField::Password => LoginField::Email,
            };
        }
        KeyCode::Enter => match app.login.focus {
            LoginField::Email => app.login.focus = LoginField::Password,
            LoginField::Password => submit(app, now),
        },
        _ => {
            if edit_line(app.login.focused_mut(), key) {
                app.ws.auth.clear_error();
            }
        }
    }
}

/// Start a login attempt; the event loop resolves it once the delay passes.
fn submit(app: &mut App, now: Instant) {
    let email = app.login.email.text().to_string();
    let password = app.login.password.text().to_string();
    if let Err(e) = app.ws.auth.begin_login(&email, &password, now) {
        debug!("login form rejected: {}", e);
    }
}
