use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kanban status of a task. Column order follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    /// Wire name (`in-progress`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::InReview => "in-review",
            TaskStatus::Done => "done",
        }
    }

    /// Column index on the board
    pub fn index(self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::InReview => 2,
            TaskStatus::Done => 3,
        }
    }

    /// The column to the right, if any
    pub fn next(self) -> Option<TaskStatus> {
        TaskStatus::ALL.get(self.index() + 1).copied()
    }

    /// The column to the left, if any
    pub fn prev(self) -> Option<TaskStatus> {
        self.index().checked_sub(1).map(|i| TaskStatus::ALL[i])
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" => Ok(TaskStatus::InProgress),
            "in-review" => Ok(TaskStatus::InReview),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "invalid task status '{}' (expected todo, in-progress, in-review, done)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "invalid priority '{}' (expected low, medium, high)",
                other
            )),
        }
    }
}

/// A task owned by a project.
///
/// `status` is the only stored state; [`Task::completed`] is derived from it.
/// The persisted form still carries a `completed` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TaskRecord", from = "TaskRecord")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    /// Team member id
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: String, title: String, status: TaskStatus) -> Self {
        Task {
            id,
            title,
            status,
            priority: None,
            assigned_to: None,
            due_date: None,
        }
    }

    pub fn completed(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

/// On-disk shape of a task. `completed` is written for readers that expect
/// it and is only consulted when `status` is missing.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    title: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            completed: task.completed(),
            status: Some(task.status),
            id: task.id,
            title: task.title,
            priority: task.priority,
            assigned_to: task.assigned_to,
            due_date: task.due_date,
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let status = record.status.unwrap_or(if record.completed {
            TaskStatus::Done
        } else {
            TaskStatus::Todo
        });
        Task {
            id: record.id,
            title: record.title,
            status,
            priority: record.priority,
            assigned_to: record.assigned_to,
            due_date: record.due_date,
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// A `todo` task with no priority, assignee or due date
    pub fn new(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            status: TaskStatus::Todo,
            priority: None,
            assigned_to: None,
            due_date: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// The mutable fields of a task. `None` leaves a field untouched; the
/// nested options clear a field with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub completed: Option<bool>,
    pub priority: Option<Option<Priority>>,
    pub assigned_to: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        TaskPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    /// The status a task ends up with after this patch.
    ///
    /// An explicit `status` wins. A lone `completed = true` means done; a lone
    /// `completed = false` reopens a done task as todo and otherwise keeps the
    /// current status.
    pub fn resolve_status(&self, current: TaskStatus) -> TaskStatus {
        match (self.status, self.completed) {
            (Some(status), _) => status,
            (None, Some(true)) => TaskStatus::Done,
            (None, Some(false)) if current == TaskStatus::Done => TaskStatus::Todo,
            _ => current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_follows_status() {
        let mut task = Task::new("t-001".into(), "Write docs".into(), TaskStatus::Todo);
        assert!(!task.completed());
        task.status = TaskStatus::Done;
        assert!(task.completed());
        task.status = TaskStatus::InReview;
        assert!(!task.completed());
    }

    #[test]
    fn status_parse_round_trips_wire_names() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
        assert!("doing".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn next_and_prev_walk_the_columns() {
        assert_eq!(TaskStatus::Todo.prev(), None);
        assert_eq!(TaskStatus::Todo.next(), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::InReview.next(), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::Done.next(), None);
        assert_eq!(TaskStatus::Done.prev(), Some(TaskStatus::InReview));
    }

    #[test]
    fn serialized_task_carries_completed() {
        let task = Task::new("t-001".into(), "Ship".into(), TaskStatus::Done);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["completed"], true);
        assert_eq!(json["status"], "done");
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn status_wins_over_stale_completed() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t-001","title":"Ship","completed":true,"status":"in-review"}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::InReview);
        assert!(!task.completed());
    }

    #[test]
    fn missing_status_falls_back_to_completed() {
        let done: Task =
            serde_json::from_str(r#"{"id":"t-1","title":"A","completed":true}"#).unwrap();
        assert_eq!(done.status, TaskStatus::Done);
        let open: Task = serde_json::from_str(r#"{"id":"t-2","title":"B"}"#).unwrap();
        assert_eq!(open.status, TaskStatus::Todo);
    }

    #[test]
    fn camel_case_optional_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t-1","title":"A","status":"todo","assignedTo":"u-2","dueDate":"2025-03-01","priority":"high"}"#,
        )
        .unwrap();
        assert_eq!(task.assigned_to.as_deref(), Some("u-2"));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(task.priority, Some(Priority::High));
    }

    #[test]
    fn patch_status_resolution() {
        assert_eq!(
            TaskPatch::status(TaskStatus::Done).resolve_status(TaskStatus::Todo),
            TaskStatus::Done
        );
        let complete = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        assert_eq!(complete.resolve_status(TaskStatus::InProgress), TaskStatus::Done);

        let reopen = TaskPatch {
            completed: Some(false),
            ..Default::default()
        };
        assert_eq!(reopen.resolve_status(TaskStatus::Done), TaskStatus::Todo);
        assert_eq!(reopen.resolve_status(TaskStatus::InReview), TaskStatus::InReview);

        // Explicit status beats a contradicting completed flag
        let both = TaskPatch {
            status: Some(TaskStatus::InProgress),
            completed: Some(true),
            ..Default::default()
        };
        assert_eq!(both.resolve_status(TaskStatus::Todo), TaskStatus::InProgress);

        assert_eq!(
            TaskPatch::default().resolve_status(TaskStatus::InReview),
            TaskStatus::InReview
        );
    }
}
