use serde::Serialize;

use crate::model::{Notification, Project, Task, TaskStatus, TeamMember};
use crate::ops::kanban::{BoardLayout, COLUMNS};
use crate::ops::search::{SearchResult, group_by_category};
use crate::ops::stats::ProjectStats;
use crate::util::unicode::pad_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryJson<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub status: &'static str,
    pub progress: u8,
    pub due_date: String,
    pub owner: &'a str,
    pub tasks: usize,
    pub completed_tasks: usize,
}

#[derive(Serialize)]
pub struct BoardJson<'a> {
    pub project: &'a str,
    pub columns: Vec<BoardColumnJson<'a>>,
}

#[derive(Serialize)]
pub struct BoardColumnJson<'a> {
    pub status: TaskStatus,
    pub title: &'static str,
    pub count: usize,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct CountJson {
    pub changed: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn project_to_json(project: &Project) -> ProjectSummaryJson<'_> {
    ProjectSummaryJson {
        id: &project.id,
        name: &project.name,
        status: project.status.as_str(),
        progress: project.progress,
        due_date: project.due_date.to_string(),
        owner: &project.owner.id,
        tasks: project.tasks.len(),
        completed_tasks: project.completed_tasks(),
    }
}

pub fn board_to_json(project: &Project) -> BoardJson<'_> {
    let layout = BoardLayout::from_tasks(&project.tasks);
    BoardJson {
        project: &project.id,
        columns: COLUMNS
            .iter()
            .map(|c| {
                let tasks = layout.cards(c.status, &project.tasks);
                BoardColumnJson {
                    status: c.status,
                    title: c.title,
                    count: tasks.len(),
                    tasks,
                }
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn status_char(status: TaskStatus) -> char {
    match status {
        TaskStatus::Todo => ' ',
        TaskStatus::InProgress => '>',
        TaskStatus::InReview => '=',
        TaskStatus::Done => 'x',
    }
}

fn member_name<'a>(team: &'a [TeamMember], id: &'a str) -> &'a str {
    team.iter()
        .find(|m| m.id == id)
        .map_or(id, |m| m.name.as_str())
}

/// One-line project summary for listings
pub fn format_project_line(project: &Project) -> String {
    format!(
        "{}  {}  {:<9}  {:>3}%  due {}  {}/{} done",
        project.id,
        pad_to_width(&project.name, 24),
        project.status.as_str(),
        project.progress,
        project.due_date,
        project.completed_tasks(),
        project.tasks.len()
    )
}

/// One-line task summary: checkbox, id, title, then priority, assignee, due
pub fn format_task_line(task: &Task, team: &[TeamMember]) -> String {
    let mut line = format!("[{}] {} {}", status_char(task.status), task.id, task.title);
    if let Some(priority) = task.priority {
        line.push_str(&format!("  !{}", priority.as_str()));
    }
    if let Some(assignee) = &task.assigned_to {
        line.push_str(&format!("  @{}", member_name(team, assignee)));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {}", due));
    }
    line
}

pub fn format_project_detail(project: &Project, team: &[TeamMember]) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", project.name, project.id),
        format!(
            "status: {}  progress: {}%  due: {}",
            project.status.as_str(),
            project.progress,
            project.due_date
        ),
        format!("owner: {}", project.owner.name),
    ];
    if !project.members.is_empty() {
        let names: Vec<&str> = project.members.iter().map(|m| m.name.as_str()).collect();
        lines.push(format!("members: {}", names.join(", ")));
    }
    if !project.description.is_empty() {
        lines.push(project.description.clone());
    }
    lines.push(String::new());
    lines.push(format!(
        "tasks ({}/{} done):",
        project.completed_tasks(),
        project.tasks.len()
    ));
    for task in &project.tasks {
        lines.push(format!("  {}", format_task_line(task, team)));
    }
    lines
}

/// Kanban columns in display order, each with its count and cards
pub fn format_board(project: &Project, team: &[TeamMember]) -> Vec<String> {
    let layout = BoardLayout::from_tasks(&project.tasks);
    let mut lines = vec![format!("{} ({})", project.name, project.id)];
    for column in &COLUMNS {
        let cards = layout.cards(column.status, &project.tasks);
        lines.push(String::new());
        lines.push(format!("== {} ({}) ==", column.title, cards.len()));
        if cards.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for task in cards {
            lines.push(format_task_line(task, team));
        }
    }
    lines
}

pub fn format_search_results(results: &[SearchResult]) -> Vec<String> {
    let mut lines = Vec::new();
    for (category, hits) in group_by_category(results) {
        lines.push(category.to_string());
        for hit in hits {
            if hit.subtitle.is_empty() {
                lines.push(format!("  {}  {}", hit.id, hit.title));
            } else {
                lines.push(format!("  {}  {}  ({})", hit.id, hit.title, hit.subtitle));
            }
        }
    }
    lines
}

/// `*` marks unread notifications
pub fn format_notification_line(n: &Notification) -> String {
    format!(
        "{} {}  {:<7}  {}  {}: {}",
        if n.read { ' ' } else { '*' },
        n.id,
        n.kind.as_str(),
        n.created_at.format("%Y-%m-%d"),
        n.title,
        n.message
    )
}

pub fn format_member_line(m: &TeamMember) -> String {
    format!(
        "{}  {:<2}  {}  {}  <{}>",
        m.id,
        m.avatar,
        pad_to_width(&m.name, 16),
        pad_to_width(&m.role, 18),
        m.email
    )
}

pub fn format_stats(stats: &ProjectStats) -> Vec<String> {
    let by_status: Vec<String> = stats
        .by_status
        .iter()
        .map(|(status, n)| format!("{} {}", status.as_str(), n))
        .collect();
    let by_column: Vec<String> = COLUMNS
        .iter()
        .map(|c| {
            let n = stats.tasks_by_column.get(&c.status).copied().unwrap_or(0);
            format!("{} {}", c.title.to_lowercase(), n)
        })
        .collect();
    let overdue = if stats.overdue.is_empty() {
        "none".to_string()
    } else {
        stats.overdue.join(", ")
    };
    vec![
        format!(
            "projects: {} ({})",
            stats.total_projects,
            by_status.join(", ")
        ),
        format!("average progress: {:.0}%", stats.average_progress),
        format!(
            "tasks: {}/{} done ({:.0}%)",
            stats.completed_tasks,
            stats.total_tasks,
            stats.completion_rate * 100.0
        ),
        format!("board: {}", by_column.join(", ")),
        format!("overdue: {}", overdue),
    ]
}
