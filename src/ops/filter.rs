use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::{Priority, Project, ProjectStatus, Task, TaskStatus};

/// Field a project list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Progress,
    UpdatedAt,
    DueDate,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Name,
        SortField::Progress,
        SortField::UpdatedAt,
        SortField::DueDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Progress => "progress",
            SortField::UpdatedAt => "updatedAt",
            SortField::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "progress" => Ok(SortField::Progress),
            "updatedAt" | "updated-at" | "updated" => Ok(SortField::UpdatedAt),
            "dueDate" | "due-date" | "due" => Ok(SortField::DueDate),
            other => Err(format!(
                "invalid sort field '{}' (expected name, progress, updatedAt, dueDate)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn reversed(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("invalid sort order '{}' (expected asc, desc)", other)),
        }
    }
}

/// A requested view of the project list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: SortOrder,
}

/// Filter and sort projects. The input is untouched; without `sort_by` the
/// result keeps the input order.
pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    let needle = normalized_needle(filter.search.as_deref());

    let mut result: Vec<&Project> = projects
        .iter()
        .filter(|p| filter.status.is_none_or(|s| p.status == s))
        .filter(|p| match &needle {
            Some(n) => contains_ci(&p.name, n) || contains_ci(&p.description, n),
            None => true,
        })
        .collect();

    if let Some(field) = filter.sort_by {
        // sort_by is stable, so equal keys keep their input order
        result.sort_by(|a, b| {
            let ord = compare_by(a, b, field);
            match filter.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }
    result
}

fn compare_by(a: &Project, b: &Project, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Progress => a.progress.cmp(&b.progress),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::DueDate => a.due_date.cmp(&b.due_date),
    }
}

/// Lowercased, trimmed search text; `None` when there is nothing to match.
pub(crate) fn normalized_needle(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive substring test against an already-lowercased needle
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// A requested view of one project's tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub search: Option<String>,
}

/// Filter tasks, preserving their order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let needle = normalized_needle(filter.search.as_deref());
    tasks
        .iter()
        .filter(|t| filter.status.is_none_or(|s| t.status == s))
        .filter(|t| filter.priority.is_none_or(|p| t.priority == Some(p)))
        .filter(|t| match &filter.assignee {
            Some(a) => t.assigned_to.as_deref() == Some(a.as_str()),
            None => true,
        })
        .filter(|t| match &needle {
            Some(n) => contains_ci(&t.title, n),
            None => true,
        })
        .collect()
}
