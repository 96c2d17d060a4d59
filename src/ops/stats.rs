use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Project, ProjectStatus, TaskStatus};
use crate::ops::kanban::COLUMNS;

/// Dashboard summary over all projects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: usize,
    pub by_status: IndexMap<ProjectStatus, usize>,
    /// Mean progress in percent, 0 when there are no projects
    pub average_progress: f64,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Completed share of all tasks, 0..=1
    pub completion_rate: f64,
    /// Ids of open projects whose due date has passed
    pub overdue: Vec<String>,
    pub tasks_by_column: IndexMap<TaskStatus, usize>,
}

pub fn project_stats(projects: &[Project], today: NaiveDate) -> ProjectStats {
    let mut by_status: IndexMap<ProjectStatus, usize> =
        ProjectStatus::ALL.iter().map(|s| (*s, 0)).collect();
    let mut tasks_by_column: IndexMap<TaskStatus, usize> =
        COLUMNS.iter().map(|c| (c.status, 0)).collect();
    let mut progress_sum = 0u64;
    let mut total_tasks = 0;
    let mut completed_tasks = 0;
    let mut overdue = Vec::new();

    for project in projects {
        *by_status.entry(project.status).or_insert(0) += 1;
        progress_sum += u64::from(project.progress);
        if project.is_overdue(today) {
            overdue.push(project.id.clone());
        }
        for task in &project.tasks {
            total_tasks += 1;
            if task.completed() {
                completed_tasks += 1;
            }
            *tasks_by_column.entry(task.status).or_insert(0) += 1;
        }
    }

    let average_progress = if projects.is_empty() {
        0.0
    } else {
        progress_sum as f64 / projects.len() as f64
    };
    let completion_rate = if total_tasks == 0 {
        0.0
    } else {
        completed_tasks as f64 / total_tasks as f64
    };

    ProjectStats {
        total_projects: projects.len(),
        by_status,
        average_progress,
        total_tasks,
        completed_tasks,
        completion_rate,
        overdue,
        tasks_by_column,
    }
}
