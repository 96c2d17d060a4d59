use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::ops::filter::{contains_ci, normalized_needle};
use crate::ops::store::ProjectStore;

/// What a search result points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Project,
    Task,
    Member,
}

impl ResultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::Project => "project",
            ResultKind::Task => "task",
            ResultKind::Member => "member",
        }
    }

    /// Display group heading
    pub fn category(self) -> &'static str {
        match self {
            ResultKind::Project => "Projects",
            ResultKind::Task => "Tasks",
            ResultKind::Member => "Team",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" | "projects" => Ok(ResultKind::Project),
            "task" | "tasks" => Ok(ResultKind::Task),
            "member" | "members" | "team" => Ok(ResultKind::Member),
            other => Err(format!(
                "invalid result kind '{}' (expected project, task, member)",
                other
            )),
        }
    }
}

/// A single palette hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub category: &'static str,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    /// Byte ranges of the query inside `title`
    #[serde(skip)]
    pub spans: Vec<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_results: usize,
    /// Restrict to these kinds; empty means all
    pub kinds: Vec<ResultKind>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_results: 20,
            kinds: Vec::new(),
        }
    }
}

impl SearchOptions {
    fn wants(&self, kind: ResultKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }
}

/// Scan projects, then tasks, then team members for `query`.
///
/// Matching is a case-insensitive substring test. Results keep store order
/// inside each group and stop at `max_results`. A blank query finds nothing.
pub fn search(store: &ProjectStore, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    let Some(needle) = normalized_needle(Some(query)) else {
        return Vec::new();
    };
    let re = highlight_regex(query.trim());
    let mut hits = Hits {
        results: Vec::new(),
        max: options.max_results,
        re: re.as_ref(),
    };
    if hits.max > 0 {
        let _ = scan(store, &needle, options, &mut hits);
    }
    hits.results
}

/// Feed matches into `hits` in display order. Returns `None` as soon as the
/// cap is reached.
fn scan(
    store: &ProjectStore,
    needle: &str,
    options: &SearchOptions,
    hits: &mut Hits<'_>,
) -> Option<()> {
    if options.wants(ResultKind::Project) {
        for project in store.projects() {
            if contains_ci(&project.name, needle) || contains_ci(&project.description, needle) {
                hits.push(SearchResult {
                    id: project.id.clone(),
                    title: project.name.clone(),
                    subtitle: project.description.clone(),
                    kind: ResultKind::Project,
                    category: ResultKind::Project.category(),
                    href: format!("/projects/{}", project.id),
                    project_id: Some(project.id.clone()),
                    task_id: None,
                    member_id: None,
                    spans: Vec::new(),
                })?;
            }
        }
    }

    if options.wants(ResultKind::Task) {
        for project in store.projects() {
            for task in &project.tasks {
                if contains_ci(&task.title, needle) {
                    hits.push(SearchResult {
                        id: task.id.clone(),
                        title: task.title.clone(),
                        subtitle: format!("in {}", project.name),
                        kind: ResultKind::Task,
                        category: ResultKind::Task.category(),
                        href: format!("/projects/{}?task={}", project.id, task.id),
                        project_id: Some(project.id.clone()),
                        task_id: Some(task.id.clone()),
                        member_id: None,
                        spans: Vec::new(),
                    })?;
                }
            }
        }
    }

    if options.wants(ResultKind::Member) {
        for member in store.team() {
            if contains_ci(&member.name, needle)
                || contains_ci(&member.email, needle)
                || contains_ci(&member.role, needle)
            {
                hits.push(SearchResult {
                    id: member.id.clone(),
                    title: member.name.clone(),
                    subtitle: format!("{} \u{00B7} {}", member.role, member.email),
                    kind: ResultKind::Member,
                    category: ResultKind::Member.category(),
                    href: format!("/team/{}", member.id),
                    project_id: None,
                    task_id: None,
                    member_id: Some(member.id.clone()),
                    spans: Vec::new(),
                })?;
            }
        }
    }

    Some(())
}

/// Result collector that enforces the cap and fills in highlight spans
struct Hits<'r> {
    results: Vec<SearchResult>,
    max: usize,
    re: Option<&'r Regex>,
}

impl Hits<'_> {
    /// Returns `None` once the cap is reached.
    fn push(&mut self, mut result: SearchResult) -> Option<()> {
        if self.results.len() >= self.max {
            return None;
        }
        if let Some(re) = self.re {
            result.spans = find_matches(re, &result.title);
        }
        self.results.push(result);
        (self.results.len() < self.max).then_some(())
    }
}

fn highlight_regex(query: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Group results under their category heading, keeping result order.
pub fn group_by_category(results: &[SearchResult]) -> IndexMap<&'static str, Vec<&SearchResult>> {
    let mut groups: IndexMap<&'static str, Vec<&SearchResult>> = IndexMap::new();
    for result in results {
        groups.entry(result.category).or_default().push(result);
    }
    groups
}
