//! Workspace lifecycle against real files: seed, save, reopen, restore.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskdeck::io::storage::FileStorage;
use taskdeck::io::workspace::Workspace;
use taskdeck::model::{Config, NewTask, TaskStatus};
use taskdeck::ops::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use taskdeck::ops::kanban::{BoardLayout, move_card};

fn config() -> Config {
    let mut config = Config::default();
    config.auth.login_delay_ms = 0;
    config
}

fn open(dir: &TempDir) -> Workspace<FileStorage> {
    Workspace::init(FileStorage::new(dir.path()), config()).unwrap()
}

#[test]
fn first_open_writes_seed_on_dispose() {
    let dir = TempDir::new().unwrap();
    let ws = open(&dir);
    assert!(!dir.path().join("projects.json").exists());

    let report = ws.dispose().unwrap();
    assert!(report.projects);
    assert!(report.notifications);
    assert!(dir.path().join("projects.json").exists());
    assert!(dir.path().join("notifications.json").exists());
}

#[test]
fn reopen_without_changes_writes_nothing() {
    let dir = TempDir::new().unwrap();
    open(&dir).dispose().unwrap();

    let report = open(&dir).dispose().unwrap();
    assert!(!report.wrote_anything());
}

#[test]
fn edits_round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    let mut ws = open(&dir);
    let id = ws
        .store
        .add_task("p-002", NewTask::new("Record demo video"))
        .unwrap()
        .id
        .clone();
    let mut layout = BoardLayout::from_tasks(&ws.store.project("p-002").unwrap().tasks);
    move_card(&mut ws.store, &mut layout, "p-002", &id, TaskStatus::Done, 0).unwrap();
    ws.notifications.mark_all_read();
    ws.dispose().unwrap();

    let ws = open(&dir);
    let task = ws.store.task("p-002", &id).unwrap();
    assert_eq!(task.title, "Record demo video");
    assert_eq!(task.status, TaskStatus::Done);
    assert!(task.completed());
    assert_eq!(ws.notifications.unread_count(), 0);
}

#[test]
fn session_is_restored_on_reopen() {
    let dir = TempDir::new().unwrap();
    let mut ws = open(&dir);
    assert!(ws.user().is_none());
    ws.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
    ws.dispose().unwrap();

    let mut ws = open(&dir);
    assert_eq!(ws.user().map(|u| u.email.as_str()), Some(DEMO_EMAIL));
    assert!(!ws.auth.is_loading());

    ws.logout().unwrap();
    ws.dispose().unwrap();
    assert!(open(&dir).user().is_none());
}

#[test]
fn corrupt_session_is_quarantined() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("session.json"), "[]").unwrap();

    let ws = open(&dir);
    assert!(ws.user().is_none());
    assert_eq!(
        fs::read_to_string(dir.path().join("session.json.bak")).unwrap(),
        "[]"
    );
}

#[test]
fn corrupt_notifications_fall_back_to_seed() {
    let dir = TempDir::new().unwrap();
    open(&dir).dispose().unwrap();
    fs::write(dir.path().join("notifications.json"), "garbage").unwrap();

    let ws = open(&dir);
    assert_eq!(ws.notifications.items().len(), 5);
    let report = ws.dispose().unwrap();
    assert!(report.notifications);
    assert!(!report.projects);
}
