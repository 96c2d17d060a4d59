mod board;
mod login;
mod notifications;
mod palette;
mod projects;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, Screen};
use crate::util::unicode::LineEditor;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if is_ctrl(key, 'c') {
        app.should_quit = true;
        return;
    }
    app.message = None;

    match app.mode {
        Mode::Palette => palette::handle_palette(app, key, now),
        Mode::Search => projects::handle_search(app, key),
        Mode::AddCard => board::handle_add_card(app, key),
        Mode::Navigate => {
            let screen = app.screen;
            if screen == Screen::Login {
                login::handle_login(app, key, now);
            } else if !handle_global(app, key) {
                match screen {
                    Screen::Projects => projects::handle_projects(app, key),
                    Screen::Board => board::handle_board(app, key),
                    Screen::Notifications => notifications::handle_notifications(app, key),
                    Screen::Login => {}
                }
            }
        }
    }

    app.apply_guard();
}

fn is_ctrl(key: KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Keys shared by every signed-in screen. Returns true if handled.
fn handle_global(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        _ if is_ctrl(key, 'k') => app.open_palette(),
        KeyCode::Char(':') => app.open_palette(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('1') => app.screen = Screen::Projects,
        KeyCode::Char('2') => app.screen = Screen::Notifications,
        KeyCode::Char('L') => app.logout(),
        _ => return false,
    }
    true
}

/// Apply a text-editing key to `editor`. Returns true if the key was used.
fn edit_line(editor: &mut LineEditor, key: KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => editor.insert(c),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.left(),
        KeyCode::Right => editor.right(),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(),
        _ => return false,
    }
    true
}


#[cfg(test)]
mod tests {
    use super::test_keys::*;
    use super::*;
    use crate::tui::render::test_helpers::{app_on_board, logged_in_app, logged_out_app};

    #[test]
    fn ctrl_c_quits_anywhere() {
        let mut app = logged_out_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn number_keys_switch_screens() {
        let mut app = logged_in_app();
        press_char(&mut app, '2');
        assert_eq!(app.screen, Screen::Notifications);
        press_char(&mut app, '1');
        assert_eq!(app.screen, Screen::Projects);
    }

    #[test]
    fn login_screen_types_global_keys() {
        let mut app = logged_out_app();
        type_text(&mut app, "q1L");
        assert!(!app.should_quit);
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.login.email.text(), "q1L");
    }

    #[test]
    fn board_falls_through_to_screen_keys() {
        let mut app = app_on_board("p-001");
        press_char(&mut app, 'j');
        assert_eq!(app.board.as_ref().map(|b| b.row), Some(1));
        press_char(&mut app, '2');
        assert_eq!(app.screen, Screen::Notifications);
    }

    #[test]
    fn colon_opens_palette() {
        let mut app = logged_in_app();
        press_char(&mut app, ':');
        assert_eq!(app.mode, Mode::Palette);
        assert!(app.palette.is_some());
    }

    #[test]
    fn logout_key_guards_back_to_login() {
        let mut app = logged_in_app();
        press_char(&mut app, 'L');
        assert_eq!(app.screen, Screen::Login);
        assert!(app.ws.user().is_none());
    }

    #[test]
    fn edit_line_ignores_control_chords() {
        let mut editor = LineEditor::new();
        assert!(edit_line(&mut editor, key(KeyCode::Char('a'))));
        assert!(!edit_line(
            &mut editor,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)
        ));
        assert_eq!(editor.text(), "a");
    }
}
