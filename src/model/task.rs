use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task status — one column per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    NotStarted,
    InProgress,
    Done,
}

impl Status {
    /// All statuses in board column order
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Done];

    /// The column key used in persisted data and on the CLI
    pub fn key(self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }

    /// Parse a column key into a status
    pub fn from_key(key: &str) -> Option<Status> {
        match key {
            "not-started" => Some(Status::NotStarted),
            "in-progress" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            _ => None,
        }
    }

    /// Human-readable column title
    pub fn column_title(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque ID, generated at creation, never reused
    pub id: String,
    /// Task title (non-empty)
    pub title: String,
    /// Due date (calendar date, no time component)
    pub due: NaiveDate,
    /// Current status (exactly one at a time)
    pub status: Status,
}

impl Task {
    /// Create a new task with a fresh ID
    pub fn new(title: String, due: NaiveDate, status: Status) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            due,
            status,
        }
    }

    /// Create a task with an explicit ID (seed data, tests)
    pub fn with_id(id: &str, title: &str, due: NaiveDate, status: Status) -> Self {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            due,
            status,
        }
    }
}

/// A partial update to a task — only the provided fields are merged.
/// The ID is never part of a patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub due: Option<NaiveDate>,
    pub status: Option<Status>,
}
