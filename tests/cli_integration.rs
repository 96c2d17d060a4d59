//! Integration tests for the `deck` CLI.
//!
//! Each test creates a temp data directory, runs `deck -C <dir>` as a
//! subprocess, and verifies stdout and/or the stored JSON files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `deck` binary.
fn deck_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("deck");
    path
}

/// Write a config with no simulated login delay.
fn create_data_dir(root: &Path) {
    fs::write(root.join("config.toml"), "[auth]\nlogin_delay_ms = 0\n").unwrap();
}

/// Run `deck` against the data dir, returning (stdout, stderr, success).
fn run_deck(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(deck_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("failed to run deck");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `deck` expecting success, return stdout.
fn run_deck_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_deck(dir, args);
    if !success {
        panic!(
            "deck {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// A data dir with the demo user signed in.
fn logged_in() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());
    run_deck_ok(tmp.path(), &["login", "demo@taskdeck.dev", "demo1234"]);
    tmp
}

fn read_json(dir: &Path, key: &str) -> serde_json::Value {
    let text = fs::read_to_string(dir.join(format!("{}.json", key))).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[test]
fn test_commands_require_login() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let (_stdout, stderr, success) = run_deck(tmp.path(), &["projects"]);
    assert!(!success);
    assert!(stderr.contains("not logged in"));
}

#[test]
fn test_login_persists_session() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let out = run_deck_ok(tmp.path(), &["login", "demo@taskdeck.dev", "demo1234"]);
    assert_eq!(out.trim(), "logged in as Demo User <demo@taskdeck.dev>");
    assert!(tmp.path().join("session.json").exists());

    let out = run_deck_ok(tmp.path(), &["whoami"]);
    assert_eq!(out.trim(), "Demo User <demo@taskdeck.dev>");
}

#[test]
fn test_login_rejects_bad_password() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let (_stdout, stderr, success) =
        run_deck(tmp.path(), &["login", "demo@taskdeck.dev", "wrong"]);
    assert!(!success);
    assert!(stderr.contains("invalid email or password"));
    assert!(!tmp.path().join("session.json").exists());
}

#[test]
fn test_logout_forgets_session() {
    let tmp = logged_in();
    assert_eq!(run_deck_ok(tmp.path(), &["logout"]).trim(), "logged out");
    assert!(!tmp.path().join("session.json").exists());

    let (_stdout, _stderr, success) = run_deck(tmp.path(), &["whoami"]);
    assert!(!success);
}

#[test]
fn test_whoami_json() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["whoami", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["email"], "demo@taskdeck.dev");
    assert_eq!(parsed["name"], "Demo User");
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[test]
fn test_first_run_seeds_data() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["projects"]);
    assert_eq!(out.lines().count(), 5);
    assert!(out.contains("Website Redesign"));

    let projects = read_json(tmp.path(), "projects");
    assert_eq!(projects.as_array().unwrap().len(), 5);
    let notifications = read_json(tmp.path(), "notifications");
    assert_eq!(notifications.as_array().unwrap().len(), 5);
}

#[test]
fn test_projects_filter_and_sort() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["projects", "--status", "active"]);
    assert!(out.contains("p-001"));
    assert!(out.contains("p-002"));
    assert!(!out.contains("p-003"));

    let out = run_deck_ok(tmp.path(), &["projects", "--sort", "progress", "--order", "desc"]);
    let ids: Vec<&str> = out.lines().map(|l| &l[..5]).collect();
    assert_eq!(ids[0], "p-004"); // completed, 100%
}

#[test]
fn test_projects_invalid_status() {
    let tmp = logged_in();
    let (_stdout, stderr, success) = run_deck(tmp.path(), &["projects", "--status", "paused"]);
    assert!(!success);
    assert!(stderr.contains("paused"));
}

#[test]
fn test_projects_json() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["projects", "--search", "mobile", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], "p-002");
    assert_eq!(arr[0]["status"], "active");
    assert_eq!(arr[0]["completedTasks"], 1);
}

#[test]
fn test_project_add_and_show() {
    let tmp = logged_in();
    let out = run_deck_ok(
        tmp.path(),
        &[
            "project",
            "add",
            "Docs Portal",
            "--description",
            "Public developer docs",
            "--due",
            "2025-12-01",
            "--owner",
            "u-002",
            "--member",
            "u-003",
        ],
    );
    assert_eq!(out.trim(), "p-006");

    let out = run_deck_ok(tmp.path(), &["project", "show", "p-006"]);
    assert!(out.contains("Docs Portal (p-006)"));
    assert!(out.contains("due: 2025-12-01"));
    assert!(out.contains("Public developer docs"));
    assert!(out.contains("tasks (0/0 done):"));
}

#[test]
fn test_project_add_unknown_owner() {
    let tmp = logged_in();
    let (_stdout, stderr, success) =
        run_deck(tmp.path(), &["project", "add", "X", "--owner", "u-999"]);
    assert!(!success);
    assert!(stderr.contains("u-999"));
    assert_eq!(read_json(tmp.path(), "projects").as_array().unwrap().len(), 5);
}

#[test]
fn test_project_set_clamps_progress() {
    let tmp = logged_in();
    run_deck_ok(tmp.path(), &["project", "set", "p-003", "--progress", "150"]);
    let out = run_deck_ok(tmp.path(), &["project", "show", "p-003", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["progress"], 100);

    run_deck_ok(tmp.path(), &["project", "set", "p-003", "--progress", "-5"]);
    let out = run_deck_ok(tmp.path(), &["project", "show", "p-003", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["progress"], 0);
}

#[test]
fn test_project_set_nothing() {
    let tmp = logged_in();
    let (_stdout, stderr, success) = run_deck(tmp.path(), &["project", "set", "p-001"]);
    assert!(!success);
    assert!(stderr.contains("nothing to change"));
}

#[test]
fn test_project_rm() {
    let tmp = logged_in();
    assert_eq!(
        run_deck_ok(tmp.path(), &["project", "rm", "p-005"]).trim(),
        "deleted p-005"
    );
    let out = run_deck_ok(tmp.path(), &["projects"]);
    assert!(!out.contains("p-005"));

    let (_stdout, stderr, success) = run_deck(tmp.path(), &["project", "rm", "p-005"]);
    assert!(!success);
    assert!(stderr.contains("not found"));
}

// ---------------------------------------------------------------------------
// Tasks and board
// ---------------------------------------------------------------------------

#[test]
fn test_task_add_and_list() {
    let tmp = logged_in();
    let out = run_deck_ok(
        tmp.path(),
        &[
            "task",
            "add",
            "p-003",
            "Write migration guide",
            "--priority",
            "high",
            "--assign",
            "u-005",
        ],
    );
    assert_eq!(out.trim(), "t-014");

    let out = run_deck_ok(tmp.path(), &["task", "list", "p-003", "--priority", "high"]);
    assert!(out.contains("[ ] t-014 Write migration guide  !high"));
}

#[test]
fn test_task_add_empty_title() {
    let tmp = logged_in();
    let (_stdout, _stderr, success) = run_deck(tmp.path(), &["task", "add", "p-001", "  "]);
    assert!(!success);
}

#[test]
fn test_task_toggle_keeps_status_and_completion_in_step() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["task", "toggle", "p-001", "t-004"]);
    assert!(out.starts_with("[x] t-004"));

    let out = run_deck_ok(tmp.path(), &["task", "toggle", "p-001", "t-004", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["status"], "todo");
    assert_eq!(parsed["completed"], false);
}

#[test]
fn test_task_set_done_and_clear_assignee() {
    let tmp = logged_in();
    let out = run_deck_ok(
        tmp.path(),
        &["task", "set", "p-001", "t-005", "--done", "true", "--assign", "none"],
    );
    assert_eq!(out.trim(), "[x] t-005 Set up analytics  !medium");
}

#[test]
fn test_task_rm() {
    let tmp = logged_in();
    run_deck_ok(tmp.path(), &["task", "rm", "p-001", "t-004"]);
    let out = run_deck_ok(tmp.path(), &["task", "list", "p-001"]);
    assert!(!out.contains("t-004"));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_board() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["board", "p-001"]);
    assert!(out.contains("== To Do (2) =="));
    assert!(out.contains("== Done (1) =="));
}

#[test]
fn test_mv_changes_status() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["mv", "p-001", "t-004", "in-review"]);
    assert_eq!(out.trim(), "t-004: todo -> in-review");

    let out = run_deck_ok(tmp.path(), &["board", "p-001", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["columns"][2]["count"], 2);
    assert_eq!(parsed["columns"][0]["count"], 1);
}

#[test]
fn test_mv_to_done_completes() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["mv", "p-001", "t-003", "done", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["status"], "done");
    assert_eq!(parsed["completed"], true);
}

#[test]
fn test_mv_same_column() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["mv", "p-001", "t-004", "todo"]);
    assert_eq!(out.trim(), "t-004: already in todo");
}

#[test]
fn test_mv_bad_column() {
    let tmp = logged_in();
    let (_stdout, stderr, success) = run_deck(tmp.path(), &["mv", "p-001", "t-004", "later"]);
    assert!(!success);
    assert!(stderr.contains("later"));
}

// ---------------------------------------------------------------------------
// Search, notifications, team, stats
// ---------------------------------------------------------------------------

#[test]
fn test_search_groups_results() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["search", "design"]);
    assert!(out.contains("Tasks"));
    assert!(out.contains("t-002  Design new homepage"));
}

#[test]
fn test_search_kind_and_limit() {
    let tmp = logged_in();
    let out = run_deck_ok(
        tmp.path(),
        &["search", "a", "--kind", "member", "--limit", "2", "--json"],
    );
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert!(arr.iter().all(|r| r["type"] == "member"));
}

#[test]
fn test_search_blank_query() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["search", "   "]);
    assert!(out.starts_with("no results"));
}

#[test]
fn test_notifications_unread() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["notifications", "--unread"]);
    assert_eq!(out.lines().count(), 3);
    assert!(out.lines().all(|l| l.starts_with('*')));
}

#[test]
fn test_notify_read_all_then_clear() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["notify", "read-all", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["changed"], 3);

    let out = run_deck_ok(tmp.path(), &["notify", "clear-read"]);
    assert_eq!(out.trim(), "deleted 5");
    assert!(run_deck_ok(tmp.path(), &["notifications"]).trim().is_empty());
}

#[test]
fn test_notify_add_and_read() {
    let tmp = logged_in();
    let out = run_deck_ok(
        tmp.path(),
        &["notify", "add", "Deploy done", "v2 is live", "--kind", "success"],
    );
    assert_eq!(out.trim(), "n-006");

    let out = run_deck_ok(tmp.path(), &["notifications"]);
    assert!(out.lines().next().unwrap().starts_with("* n-006  success"));

    run_deck_ok(tmp.path(), &["notify", "read", "n-006"]);
    let out = run_deck_ok(tmp.path(), &["notifications", "--unread"]);
    assert!(!out.contains("n-006"));
}

#[test]
fn test_notify_unknown_id() {
    let tmp = logged_in();
    let (_stdout, stderr, success) = run_deck(tmp.path(), &["notify", "rm", "n-999"]);
    assert!(!success);
    assert!(stderr.contains("notification not found: n-999"));
}

#[test]
fn test_team() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["team"]);
    assert_eq!(out.lines().count(), 5);
    assert!(out.contains("Sarah Chen"));
}

#[test]
fn test_stats_json() {
    let tmp = logged_in();
    let out = run_deck_ok(tmp.path(), &["stats", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["totalProjects"], 5);
    assert_eq!(parsed["totalTasks"], 13);
    assert_eq!(parsed["completedTasks"], 5);
    assert_eq!(parsed["byStatus"]["active"], 2);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn test_changes_survive_restart() {
    let tmp = logged_in();
    run_deck_ok(tmp.path(), &["project", "set", "p-002", "--name", "Mobile GA"]);
    let out = run_deck_ok(tmp.path(), &["projects", "--search", "ga"]);
    assert!(out.contains("Mobile GA"));
}

#[test]
fn test_failed_command_does_not_save() {
    let tmp = logged_in();
    let before = fs::read_to_string(tmp.path().join("projects.json")).unwrap();
    let (_stdout, _stderr, success) =
        run_deck(tmp.path(), &["task", "add", "p-001", "X", "--assign", "u-999"]);
    assert!(!success);
    let after = fs::read_to_string(tmp.path().join("projects.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_corrupt_projects_file_is_reseeded() {
    let tmp = logged_in();
    fs::write(tmp.path().join("projects.json"), "{ not json").unwrap();

    let out = run_deck_ok(tmp.path(), &["projects"]);
    assert_eq!(out.lines().count(), 5);
    assert_eq!(
        fs::read_to_string(tmp.path().join("projects.json.bak")).unwrap(),
        "{ not json"
    );
}
