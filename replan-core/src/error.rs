//! Error types for task input and workflow runs.

use thiserror::Error;

use crate::controller::Phase;

/// Malformed task input. Raised at construction, never inside a phase.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidTaskError {
    #[error("task name must be non-empty")]
    EmptyName,

    #[error("task '{name}' has non-positive duration: {hours}")]
    NonPositiveDuration { name: String, hours: f64 },

    #[error("task '{name}' has invalid deadline '{input}': {reason}")]
    InvalidDeadline {
        name: String,
        input: String,
        reason: String,
    },

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("duplicate task name: {0}")]
    DuplicateName(String),
}

/// A failed run. No partial state is returned with any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    InvalidTask(#[from] InvalidTaskError),

    #[error("invalid workflow config: {0}")]
    InvalidConfig(String),

    #[error("cycle limit exceeded: more than {max_cycles} execute passes")]
    CycleLimitExceeded { max_cycles: usize },

    #[error("state invariant violated after {phase}: {reason}")]
    InvariantViolated { phase: Phase, reason: String },
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
