use chrono::{DateTime, TimeDelta, Utc};
use log::debug;

use crate::model::{
    NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch, TaskStatus, TeamMember,
    clamp_progress,
};

/// Error type for store mutations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("task not found: {task_id} (in project {project_id})")]
    TaskNotFound { project_id: String, task_id: String },
    #[error("unknown team member: {0}")]
    UnknownMember(String),
    #[error("project name must not be empty")]
    EmptyName,
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("no {0}- ids left to assign")]
    IdsExhausted(&'static str),
}

/// The in-memory collection of projects plus the team roster they reference.
///
/// Projects keep insertion order with the newest first. Every mutation marks
/// the store dirty; the workspace clears the flag after a successful save.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects: Vec<Project>,
    team: Vec<TeamMember>,
    project_ids: IdSequence,
    task_ids: IdSequence,
    dirty: bool,
}

impl ProjectStore {
    pub fn new(mut projects: Vec<Project>, team: Vec<TeamMember>) -> Self {
        for project in &mut projects {
            project.progress = project.progress.min(100);
        }
        let project_ids = IdSequence::after("p", projects.iter().map(|p| p.id.as_str()));
        let task_ids = IdSequence::after(
            "t",
            projects
                .iter()
                .flat_map(|p| p.tasks.iter().map(|t| t.id.as_str())),
        );
        ProjectStore {
            projects,
            team,
            project_ids,
            task_ids,
            dirty: false,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn team(&self) -> &[TeamMember] {
        &self.team
    }

    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, project_id: &str, task_id: &str) -> Option<&Task> {
        self.project(project_id)?.task(task_id)
    }

    /// Like [`ProjectStore::task`], but says which id was missing.
    pub fn find_task(&self, project_id: &str, task_id: &str) -> Result<&Task, StoreError> {
        let project = self
            .project(project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))?;
        let idx = task_index(project, task_id)?;
        Ok(&project.tasks[idx])
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Force the next save to write this collection.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// Create a project and prepend it to the collection.
    pub fn create_project(&mut self, input: NewProject) -> Result<&Project, StoreError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let owner = self.resolve_member(&input.owner_id)?;
        let members = self.resolve_members(&input.member_ids)?;

        let id = self.project_ids.next_id()?;
        let now = Utc::now();
        let project = Project {
            id,
            name: name.to_string(),
            description: input.description.trim().to_string(),
            status: input.status,
            progress: clamp_progress(input.progress),
            due_date: input.due_date,
            owner,
            members,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        debug!("created project {} ({})", project.id, project.name);
        self.projects.insert(0, project);
        self.dirty = true;
        Ok(&self.projects[0])
    }

    /// Apply a patch to a project and bump its `updated_at`.
    pub fn update_project(
        &mut self,
        id: &str,
        patch: ProjectPatch,
    ) -> Result<&Project, StoreError> {
        if let Some(name) = &patch.name
            && name.trim().is_empty()
        {
            return Err(StoreError::EmptyName);
        }
        let owner = match &patch.owner_id {
            Some(owner_id) => Some(self.resolve_member(owner_id)?),
            None => None,
        };
        let members = match &patch.member_ids {
            Some(ids) => Some(self.resolve_members(ids)?),
            None => None,
        };

        let project = find_project_mut(&mut self.projects, id)?;
        if let Some(name) = patch.name {
            project.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            project.description = description.trim().to_string();
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(progress) = patch.progress {
            project.progress = clamp_progress(progress);
        }
        if let Some(due_date) = patch.due_date {
            project.due_date = due_date;
        }
        if let Some(owner) = owner {
            project.owner = owner;
        }
        if let Some(members) = members {
            project.members = members;
        }
        touch(project);
        debug!("updated project {}", project.id);
        self.dirty = true;
        Ok(project)
    }

    /// Remove a project. Returns whether anything was removed.
    pub fn delete_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        let removed = self.projects.len() != before;
        if removed {
            debug!("deleted project {}", id);
            self.dirty = true;
        }
        removed
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Append a task to a project.
    pub fn add_task(&mut self, project_id: &str, input: NewTask) -> Result<&Task, StoreError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if let Some(assignee) = &input.assigned_to {
            self.resolve_member(assignee)?;
        }
        let project = find_project_mut(&mut self.projects, project_id)?;
        let id = self.task_ids.next_id()?;
        let mut task = Task::new(id, title.to_string(), input.status);
        task.priority = input.priority;
        task.assigned_to = input.assigned_to;
        task.due_date = input.due_date;
        debug!("added task {} to {} as {}", task.id, project.id, task.status);
        project.tasks.push(task);
        touch(project);
        self.dirty = true;
        let last = project.tasks.len() - 1;
        Ok(&project.tasks[last])
    }

    /// Apply a patch to a task. Status and completion stay in step because
    /// completion is derived from the resolved status.
    pub fn update_task(
        &mut self,
        project_id: &str,
        task_id: &str,
        patch: TaskPatch,
    ) -> Result<&Task, StoreError> {
        if let Some(title) = &patch.title
            && title.trim().is_empty()
        {
            return Err(StoreError::EmptyTitle);
        }
        if let Some(Some(assignee)) = &patch.assigned_to {
            self.resolve_member(assignee)?;
        }

        let project = find_project_mut(&mut self.projects, project_id)?;
        let idx = task_index(project, task_id)?;
        let task = &mut project.tasks[idx];
        task.status = patch.resolve_status(task.status);
        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        debug!("updated task {} in {} ({})", task_id, project_id, task.status);
        touch(project);
        self.dirty = true;
        Ok(&project.tasks[idx])
    }

    /// Remove a task, returning it.
    pub fn delete_task(&mut self, project_id: &str, task_id: &str) -> Result<Task, StoreError> {
        let project = find_project_mut(&mut self.projects, project_id)?;
        let idx = task_index(project, task_id)?;
        let task = project.tasks.remove(idx);
        touch(project);
        debug!("deleted task {} from {}", task_id, project_id);
        self.dirty = true;
        Ok(task)
    }

    /// Flip completion: done becomes todo, anything else becomes done.
    pub fn toggle_task(&mut self, project_id: &str, task_id: &str) -> Result<&Task, StoreError> {
        let current = self.find_task(project_id, task_id)?.status;
        let patch = TaskPatch {
            completed: Some(current != TaskStatus::Done),
            ..Default::default()
        };
        self.update_task(project_id, task_id, patch)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn resolve_member(&self, id: &str) -> Result<TeamMember, StoreError> {
        self.member(id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownMember(id.to_string()))
    }

    fn resolve_members(&self, ids: &[String]) -> Result<Vec<TeamMember>, StoreError> {
        let mut members = Vec::with_capacity(ids.len());
        for id in ids {
            if members.iter().any(|m: &TeamMember| &m.id == id) {
                continue;
            }
            members.push(self.resolve_member(id)?);
        }
        Ok(members)
    }
}

fn find_project_mut<'a>(
    projects: &'a mut [Project],
    id: &str,
) -> Result<&'a mut Project, StoreError> {
    projects
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))
}

fn task_index(project: &Project, task_id: &str) -> Result<usize, StoreError> {
    project
        .tasks
        .iter()
        .position(|t| t.id == task_id)
        .ok_or_else(|| StoreError::TaskNotFound {
            project_id: project.id.clone(),
            task_id: task_id.to_string(),
        })
}

/// Refresh `updated_at`, keeping it strictly increasing even when the clock
/// has not advanced since the last mutation.
fn touch(project: &mut Project) {
    project.updated_at = next_timestamp(project.updated_at);
}

pub(crate) fn next_timestamp(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + TimeDelta::milliseconds(1)
    }
}

/// Hands out ids of the form `{prefix}-NNN`.
///
/// Starts one past the highest number already loaded and only counts up, so
/// an id freed by a delete is not issued again while the collection is open.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: &'static str,
    last: u64,
}

impl IdSequence {
    pub fn after<'a>(prefix: &'static str, existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        IdSequence { prefix, last }
    }

    pub fn next_id(&mut self) -> Result<String, StoreError> {
        let n = self
            .last
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(self.prefix))?;
        self.last = n;
        Ok(format!("{}-{:03}", self.prefix, n))
    }
}
