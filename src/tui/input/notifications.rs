use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Screen};

pub(super) fn handle_notifications(app: &mut App, key: KeyEvent) {
    let selected = app
        .visible_notifications()
        .get(app.notifications.cursor)
        .map(|n| (n.id.clone(), n.read));
    let len = app.visible_notifications().len();

    match key.code {
        KeyCode::Esc => app.screen = Screen::Projects,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.notifications.cursor + 1 < len {
                app.notifications.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.notifications.cursor = app.notifications.cursor.saturating_sub(1);
        }
        KeyCode::Char('u') => {
            app.notifications.unread_only = !app.notifications.unread_only;
            app.notifications.cursor = 0;
        }
        KeyCode::Char('r') | KeyCode::Enter => {
            let Some((id, read)) = selected else {
                return;
            };
            if read {
                app.ws.notifications.mark_unread(&id);
            } else {
                app.ws.notifications.mark_read(&id);
            }
            changed(app);
        }
        KeyCode::Char('R') => {
            let n = app.ws.notifications.mark_all_read();
            app.message = Some(format!("Marked {} read", n));
            changed(app);
        }
        KeyCode::Char('d') => {
            let Some((id, _)) = selected else {
                return;
            };
            app.ws.notifications.delete(&id);
            changed(app);
        }
        KeyCode::Char('D') => {
            let n = app.ws.notifications.delete_all_read();
            app.message = Some(format!("Deleted {} read", n));
            changed(app);
        }
        _ => {}
    }
}

fn changed(app: &mut App) {
    let len = app.visible_notifications().len();
    app.notifications.cursor = app.notifications.cursor.min(len.saturating_sub(1));
    app.persist();
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use super::super::test_keys::*;
    use super::*;
    use crate::tui::render::test_helpers::logged_in_app;

    fn on_notifications() -> App {
        let mut app = logged_in_app();
        app.screen = Screen::Notifications;
        app
    }

    #[test]
    fn enter_toggles_read_state() {
        let mut app = on_notifications();
        assert!(!app.ws.notifications.get("n-005").unwrap().read);
        press(&mut app, KeyCode::Enter);
        assert!(app.ws.notifications.get("n-005").unwrap().read);
        press_char(&mut app, 'r');
        assert!(!app.ws.notifications.get("n-005").unwrap().read);
    }

    #[test]
    fn unread_filter_and_mark_all() {
        let mut app = on_notifications();
        press_char(&mut app, 'u');
        let unread = app.visible_notifications().len();
        assert_eq!(unread, app.ws.notifications.unread_count());

        press_char(&mut app, 'R');
        assert_eq!(app.ws.notifications.unread_count(), 0);
        assert!(app.visible_notifications().is_empty());
        assert_eq!(app.message, Some(format!("Marked {} read", unread)));
    }

    #[test]
    fn delete_all_read_keeps_unread() {
        let mut app = on_notifications();
        let unread = app.ws.notifications.unread_count();
        press_char(&mut app, 'D');
        assert_eq!(app.ws.notifications.items().len(), unread);
    }

    #[test]
    fn delete_clamps_cursor() {
        let mut app = on_notifications();
        let total = app.ws.notifications.items().len();
        for _ in 0..total {
            press_char(&mut app, 'j');
        }
        press_char(&mut app, 'd');
        assert_eq!(app.ws.notifications.items().len(), total - 1);
        assert_eq!(app.notifications.cursor, total - 2);
    }
}
