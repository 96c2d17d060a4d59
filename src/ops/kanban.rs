use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::model::{NewTask, Task, TaskPatch, TaskStatus};
use crate::ops::store::{ProjectStore, StoreError};

/// Color tag of a board column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnColor {
    Slate,
    Blue,
    Amber,
    Green,
}

/// A fixed board column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub title: &'static str,
    pub color: ColumnColor,
}

/// Board columns in display order
pub const COLUMNS: [Column; 4] = [
    Column {
        status: TaskStatus::Todo,
        title: "To Do",
        color: ColumnColor::Slate,
    },
    Column {
        status: TaskStatus::InProgress,
        title: "In Progress",
        color: ColumnColor::Blue,
    },
    Column {
        status: TaskStatus::InReview,
        title: "In Review",
        color: ColumnColor::Amber,
    },
    Column {
        status: TaskStatus::Done,
        title: "Done",
        color: ColumnColor::Green,
    },
];

pub fn column(status: TaskStatus) -> &'static Column {
    &COLUMNS[status.index()]
}

/// Tasks belonging to one column, in source order
pub fn tasks_by_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

/// Card count per column, in column order. Empty columns count as zero.
pub fn column_counts(tasks: &[Task]) -> IndexMap<TaskStatus, usize> {
    let mut counts: IndexMap<TaskStatus, usize> =
        COLUMNS.iter().map(|c| (c.status, 0)).collect();
    for task in tasks {
        *counts.entry(task.status).or_insert(0) += 1;
    }
    counts
}

/// Visual card order for one project's board.
///
/// Cards can be reordered inside a column without touching the stored task
/// order; only moves across columns reach the store. The layout lives as long
/// as the board is open and is not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    columns: [Vec<String>; 4],
}

/// What a card move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Same column, new position
    Reordered,
    /// Different column; the task's status was updated
    StatusChanged { from: TaskStatus, to: TaskStatus },
}

impl BoardLayout {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut layout = BoardLayout::default();
        layout.reconcile(tasks);
        layout
    }

    /// Bring the layout in line with `tasks`: known cards keep their visual
    /// position, deleted cards disappear, cards whose status changed move to
    /// the end of their new column and new cards are appended.
    pub fn reconcile(&mut self, tasks: &[Task]) {
        let mut next: [Vec<String>; 4] = Default::default();
        let mut placed = HashSet::new();

        for (col, ids) in self.columns.iter().enumerate() {
            for id in ids {
                if let Some(task) = tasks.iter().find(|t| &t.id == id)
                    && task.status.index() == col
                    && placed.insert(id.clone())
                {
                    next[col].push(id.clone());
                }
            }
        }
        for task in tasks {
            if placed.insert(task.id.clone()) {
                next[task.status.index()].push(task.id.clone());
            }
        }
        self.columns = next;
    }

    /// Card ids of one column, top to bottom
    pub fn column(&self, status: TaskStatus) -> &[String] {
        &self.columns[status.index()]
    }

    /// Resolve a column's ids against `tasks`
    pub fn cards<'a>(&self, status: TaskStatus, tasks: &'a [Task]) -> Vec<&'a Task> {
        self.column(status)
            .iter()
            .filter_map(|id| tasks.iter().find(|t| &t.id == id))
            .collect()
    }

    /// Column and index of a card
    pub fn position(&self, task_id: &str) -> Option<(TaskStatus, usize)> {
        TaskStatus::ALL.iter().find_map(|&status| {
            self.column(status)
                .iter()
                .position(|id| id == task_id)
                .map(|idx| (status, idx))
        })
    }

    fn remove(&mut self, task_id: &str) {
        for ids in &mut self.columns {
            ids.retain(|id| id != task_id);
        }
    }

    fn insert(&mut self, status: TaskStatus, index: usize, task_id: &str) {
        let ids = &mut self.columns[status.index()];
        let index = index.min(ids.len());
        ids.insert(index, task_id.to_string());
    }
}

/// Drop a card into `to` at `index` (clamped to the column length).
///
/// Crossing columns updates the task's status through the store, which keeps
/// completion in step. Staying in the column only reorders the layout.
pub fn move_card(
    store: &mut ProjectStore,
    layout: &mut BoardLayout,
    project_id: &str,
    task_id: &str,
    to: TaskStatus,
    index: usize,
) -> Result<MoveOutcome, StoreError> {
    let from = store.find_task(project_id, task_id)?.status;

    let outcome = if from == to {
        MoveOutcome::Reordered
    } else {
        store.update_task(project_id, task_id, TaskPatch::status(to))?;
        MoveOutcome::StatusChanged { from, to }
    };

    if let Some(project) = store.project(project_id) {
        layout.reconcile(&project.tasks);
    }
    layout.remove(task_id);
    layout.insert(to, index, task_id);
    debug!("moved card {} to {} at {}", task_id, to, index);
    Ok(outcome)
}

/// Create a card in a column. Returns the new task id.
pub fn add_card(
    store: &mut ProjectStore,
    layout: &mut BoardLayout,
    project_id: &str,
    column: TaskStatus,
    title: &str,
) -> Result<String, StoreError> {
    let id = store
        .add_task(project_id, NewTask::new(title).with_status(column))?
        .id
        .clone();
    if let Some(project) = store.project(project_id) {
        layout.reconcile(&project.tasks);
    }
    Ok(id)
}
