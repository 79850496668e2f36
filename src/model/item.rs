// File: ./src/model/item.rs
// The task entity and its enumerations
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used for descending priority sort (high outranks low).
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Cycle low -> medium -> high -> low, for the form's priority selector.
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    InProgress,
    Completed,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::InProgress => Status::Completed,
            Status::Completed => Status::InProgress,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

/// A single task. `id` is assigned at creation and never changes; title,
/// description and due date are guaranteed non-empty by form validation
/// before a task ever reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due: NaiveDate,
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    /// Build a fresh task. New tasks always start in-progress.
    pub fn new(title: &str, description: &str, due: NaiveDate, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            due,
            priority,
            status: Status::InProgress,
        }
    }

    /// The due date as displayed and searched: YYYY-MM-DD.
    pub fn due_string(&self) -> String {
        self.due.format("%Y-%m-%d").to_string()
    }

    /// A task is overdue when its due date, taken at midnight UTC, lies
    /// strictly before `now`. A task due today counts as overdue for any
    /// `now` past midnight.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due.and_time(NaiveTime::MIN).and_utc() < now
    }
}
