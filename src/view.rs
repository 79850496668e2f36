// File: ./src/view.rs
// Pure derivation of the visible task list: filter, search, sort.
use crate::model::{Status, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    InProgress,
    Completed,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::InProgress => task.status == Status::InProgress,
            Filter::Completed => task.status == Status::Completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::InProgress => "in-progress",
            Filter::Completed => "completed",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Filter::All => Filter::InProgress,
            Filter::InProgress => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    DueDate,
    Priority,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::DueDate => "due date",
            SortMode::Priority => "priority",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            SortMode::DueDate => SortMode::Priority,
            SortMode::Priority => SortMode::DueDate,
        }
    }
}

/// Build the ordered sequence of visible tasks as indices into `tasks`.
/// Filtering runs before sorting; the input slice is never reordered.
/// `now` decides which tasks count as overdue for the due-date sort.
pub fn build_view(
    tasks: &[Task],
    filter: Filter,
    search: &str,
    sort: SortMode,
    now: DateTime<Utc>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t) && matches_search(t, search))
        .map(|(i, _)| i)
        .collect();

    // Both sorts are stable: ties keep insertion order.
    match sort {
        SortMode::DueDate => {
            indices.sort_by(|&a, &b| compare_due(&tasks[a], &tasks[b], now));
        }
        SortMode::Priority => {
            indices.sort_by_key(|&i| std::cmp::Reverse(tasks[i].priority.rank()));
        }
    }
    indices
}

/// Case-insensitive match on title and description; the due date is matched
/// literally against its YYYY-MM-DD form. An empty term passes everything.
fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
        || task.due_string().contains(term)
}

/// Overdue tasks sort before everything else; within the same bucket,
/// ascending by due date.
fn compare_due(a: &Task, b: &Task, now: DateTime<Utc>) -> Ordering {
    match (a.is_overdue(now), b.is_overdue(now)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.due.cmp(&b.due),
    }
}
