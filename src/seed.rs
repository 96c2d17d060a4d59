//! Fixed sample data used on first run.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    Notification, NotificationKind, Priority, Project, ProjectStatus, Task, TaskStatus,
    TeamMember,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, hour: u32) -> DateTime<Utc> {
    day(y, m, d).and_hms_opt(hour, 0, 0).unwrap_or_default().and_utc()
}

fn member(id: &str, name: &str, email: &str, role: &str) -> TeamMember {
    let mut m = TeamMember {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        role: role.into(),
        avatar: String::new(),
    };
    m.avatar = m.initials();
    m
}

/// The team roster
pub fn team() -> Vec<TeamMember> {
    vec![
        member("u-001", "Sarah Chen", "sarah@taskdeck.dev", "Product Manager"),
        member("u-002", "Marcus Johnson", "marcus@taskdeck.dev", "Lead Engineer"),
        member("u-003", "Priya Patel", "priya@taskdeck.dev", "Product Designer"),
        member("u-004", "Diego Alvarez", "diego@taskdeck.dev", "Frontend Engineer"),
        member("u-005", "Emma Wilson", "emma@taskdeck.dev", "QA Engineer"),
    ]
}

fn task(
    id: &str,
    title: &str,
    status: TaskStatus,
    priority: Priority,
    assignee: Option<&str>,
) -> Task {
    let mut t = Task::new(id.into(), title.into(), status);
    t.priority = Some(priority);
    t.assigned_to = assignee.map(String::from);
    t
}

fn pick(team: &[TeamMember], ids: &[&str]) -> Vec<TeamMember> {
    team.iter()
        .filter(|m| ids.contains(&m.id.as_str()))
        .cloned()
        .collect()
}

/// Initial projects, newest first
pub fn projects() -> Vec<Project> {
    let team = team();
    let owner = |id: &str| pick(&team, &[id]).into_iter().next().unwrap_or_else(|| team[0].clone());

    vec![
        Project {
            id: "p-001".into(),
            name: "Website Redesign".into(),
            description: "Refresh the marketing website with the new brand system".into(),
            status: ProjectStatus::Active,
            progress: 65,
            due_date: day(2025, 3, 31),
            owner: owner("u-003"),
            members: pick(&team, &["u-001", "u-003", "u-004"]),
            tasks: vec![
                task("t-001", "Audit existing pages", TaskStatus::Done, Priority::High, Some("u-001")),
                task("t-002", "Design new homepage", TaskStatus::InReview, Priority::High, Some("u-003")),
                task("t-003", "Build responsive navigation", TaskStatus::InProgress, Priority::Medium, Some("u-004")),
                task("t-004", "Migrate blog content", TaskStatus::Todo, Priority::Low, None),
                task("t-005", "Set up analytics", TaskStatus::Todo, Priority::Medium, Some("u-004")),
            ],
            created_at: at(2025, 1, 6, 9),
            updated_at: at(2025, 2, 18, 16),
        },
        Project {
            id: "p-002".into(),
            name: "Mobile App Launch".into(),
            description: "Ship the first public release of the iOS and Android apps".into(),
            status: ProjectStatus::Active,
            progress: 40,
            due_date: day(2025, 5, 15),
            owner: owner("u-002"),
            members: pick(&team, &["u-002", "u-003", "u-005"]),
            tasks: vec![
                task("t-006", "Finalize onboarding flow", TaskStatus::InProgress, Priority::High, Some("u-003")),
                task("t-007", "Push notification service", TaskStatus::Todo, Priority::High, Some("u-002")),
                task("t-008", "App store screenshots", TaskStatus::Todo, Priority::Low, Some("u-003")),
                task("t-009", "Beta feedback triage", TaskStatus::Done, Priority::Medium, Some("u-005")),
            ],
            created_at: at(2024, 12, 2, 10),
            updated_at: at(2025, 2, 20, 11),
        },
        Project {
            id: "p-003".into(),
            name: "API v2 Migration".into(),
            description: "Move partner integrations to the versioned REST API".into(),
            status: ProjectStatus::OnHold,
            progress: 20,
            due_date: day(2025, 6, 30),
            owner: owner("u-002"),
            members: pick(&team, &["u-002", "u-004"]),
            tasks: vec![
                task("t-010", "Publish v1 deprecation notice", TaskStatus::Done, Priority::Medium, Some("u-002")),
                task("t-011", "Rate limiting middleware", TaskStatus::Todo, Priority::High, Some("u-002")),
            ],
            created_at: at(2024, 11, 14, 8),
            updated_at: at(2025, 1, 29, 14),
        },
        Project {
            id: "p-004".into(),
            name: "Customer Portal".into(),
            description: "Self-service billing and support portal".into(),
            status: ProjectStatus::Completed,
            progress: 100,
            due_date: day(2025, 1, 31),
            owner: owner("u-001"),
            members: pick(&team, &["u-001", "u-004", "u-005"]),
            tasks: vec![
                task("t-012", "Invoice history page", TaskStatus::Done, Priority::Medium, Some("u-004")),
                task("t-013", "Support ticket form", TaskStatus::Done, Priority::Low, Some("u-005")),
            ],
            created_at: at(2024, 10, 1, 9),
            updated_at: at(2025, 1, 30, 17),
        },
        Project {
            id: "p-005".into(),
            name: "Brand Guidelines".into(),
            description: "Document logo usage, palette and typography".into(),
            status: ProjectStatus::Archived,
            progress: 100,
            due_date: day(2024, 11, 30),
            owner: owner("u-003"),
            members: pick(&team, &["u-003"]),
            tasks: Vec::new(),
            created_at: at(2024, 9, 16, 13),
            updated_at: at(2024, 11, 28, 10),
        },
    ]
}

fn notification(
    id: &str,
    kind: NotificationKind,
    title: &str,
    message: &str,
    read: bool,
    created_at: DateTime<Utc>,
    href: Option<&str>,
) -> Notification {
    Notification {
        id: id.into(),
        kind,
        title: title.into(),
        message: message.into(),
        read,
        created_at,
        href: href.map(String::from),
    }
}

/// Sample notifications, newest first
pub fn notifications() -> Vec<Notification> {
    vec![
        notification(
            "n-005",
            NotificationKind::Info,
            "New comment",
            "Priya commented on Design new homepage",
            false,
            at(2025, 2, 20, 15),
            Some("/projects/p-001?task=t-002"),
        ),
        notification(
            "n-004",
            NotificationKind::Success,
            "Task completed",
            "Beta feedback triage was marked done",
            false,
            at(2025, 2, 19, 12),
            Some("/projects/p-002?task=t-009"),
        ),
        notification(
            "n-003",
            NotificationKind::Warning,
            "Deadline approaching",
            "Website Redesign is due at the end of March",
            false,
            at(2025, 2, 18, 9),
            Some("/projects/p-001"),
        ),
        notification(
            "n-002",
            NotificationKind::Error,
            "Sync failed",
            "The calendar integration could not be reached",
            true,
            at(2025, 2, 10, 7),
            None,
        ),
        notification(
            "n-001",
            NotificationKind::Info,
            "Welcome to taskdeck",
            "Your workspace is ready",
            true,
            at(2025, 1, 6, 9),
            None,
        ),
    ]
}
