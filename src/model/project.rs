use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::task::Task;
use super::team::TeamMember;

/// Lifecycle state of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::OnHold,
        ProjectStatus::Completed,
        ProjectStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "on-hold" => Ok(ProjectStatus::OnHold),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            other => Err(format!(
                "invalid project status '{}' (expected active, on-hold, completed, archived)",
                other
            )),
        }
    }
}

/// A project and the tasks it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    /// Percent complete, always within 0..=100
    pub progress: u8,
    pub due_date: NaiveDate,
    pub owner: TeamMember,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    /// Tasks in creation order
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed()).count()
    }

    /// Overdue: due before `today` while still open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
            && !matches!(
                self.status,
                ProjectStatus::Completed | ProjectStatus::Archived
            )
    }
}

/// Clamp any integer progress value into the 0..=100 range
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Input for creating a project. Owner and members are member ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: i64,
    pub due_date: NaiveDate,
    pub owner_id: String,
    pub member_ids: Vec<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>, due_date: NaiveDate) -> Self {
        NewProject {
            name: name.into(),
            description: String::new(),
            status: ProjectStatus::Active,
            progress: 0,
            due_date,
            owner_id: owner_id.into(),
            member_ids: Vec::new(),
        }
    }
}

/// The mutable fields of a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub owner_id: Option<String>,
    pub member_ids: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == ProjectPatch::default()
    }
}
