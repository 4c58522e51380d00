//! Task model: an immutable, deadline-bearing backlog entry.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::InvalidTaskError;
use crate::time::parse_deadline;

/// Core task type.
///
/// Identity is by `name`; there is no numeric id. Fields are private so a
/// `Task` can only exist in a validated shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    name: String,
    deadline: DateTime<Utc>,

    /// Hours.
    estimated_duration: f64,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        deadline: DateTime<Utc>,
        estimated_hours: f64,
    ) -> Result<Self, InvalidTaskError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidTaskError::EmptyName);
        }
        if !estimated_hours.is_finite() || estimated_hours <= 0.0 {
            return Err(InvalidTaskError::NonPositiveDuration {
                name,
                hours: estimated_hours,
            });
        }
        Ok(Self {
            name,
            deadline,
            estimated_duration: estimated_hours,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn estimated_duration(&self) -> f64 {
        self.estimated_duration
    }
}

/// Serialized shape of a `Task`, validated on the way in.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTask {
    name: String,
    deadline: DateTime<Utc>,
    estimated_duration: f64,
}

impl TryFrom<RawTask> for Task {
    type Error = InvalidTaskError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        Task::new(raw.name, raw.deadline, raw.estimated_duration)
    }
}

/// User-entered task with a free-form deadline string.
///
/// This is the task-file / form shape: `{"name", "deadline", "estimated_hours"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskInput {
    pub name: String,
    pub deadline: String,
    pub estimated_hours: f64,
}

impl TaskInput {
    pub fn new(name: impl Into<String>, deadline: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            name: name.into(),
            deadline: deadline.into(),
            estimated_hours,
        }
    }

    /// Validate and convert, reading naive deadlines in `tz`.
    pub fn into_task(self, tz: Tz) -> Result<Task, InvalidTaskError> {
        if self.name.trim().is_empty() {
            return Err(InvalidTaskError::EmptyName);
        }
        let deadline = parse_deadline(&self.name, &self.deadline, tz)?;
        Task::new(self.name, deadline, self.estimated_hours)
    }
}
