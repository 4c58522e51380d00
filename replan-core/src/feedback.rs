//! Reflection signal consumed by the cycle controller's branch decision.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    /// No remark. Also the terminal "everything is done" signal.
    #[default]
    Clear,
    /// Daily plan exhausted but unplanned backlog tasks exist.
    BacklogRemains { remaining: usize },
    /// Daily plan still holds `unfinished` tasks after execution.
    Incomplete { unfinished: usize },
    /// Replanner dropped `cleared` tasks from the daily plan.
    Replanned { cleared: usize },
}

impl Feedback {
    pub fn is_clear(&self) -> bool {
        matches!(self, Feedback::Clear)
    }

    /// The only signal that routes REFLECT to REPLAN.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Feedback::Incomplete { .. })
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Clear => Ok(()),
            Feedback::BacklogRemains { remaining } => {
                write!(f, "plan complete, backlog remains ({remaining} tasks for future days)")
            }
            Feedback::Incomplete { unfinished } => {
                write!(f, "plan incomplete: {unfinished} remain")
            }
            Feedback::Replanned { cleared } => {
                write!(f, "replanning complete ({cleared} tasks available for the next cycle)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_renders_empty() {
        assert_eq!(Feedback::Clear.to_string(), "");
        assert!(Feedback::default().is_clear());
    }

    #[test]
    fn only_incomplete_routes_to_replan() {
        assert!(Feedback::Incomplete { unfinished: 2 }.is_incomplete());
        assert!(!Feedback::BacklogRemains { remaining: 2 }.is_incomplete());
        assert!(!Feedback::Replanned { cleared: 2 }.is_incomplete());
        assert!(!Feedback::Clear.is_incomplete());
    }

    #[test]
    fn incomplete_message_carries_count() {
        let msg = Feedback::Incomplete { unfinished: 3 }.to_string();
        assert!(msg.contains("incomplete"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn serializes_as_tagged_variant() {
        let json = serde_json::to_string(&Feedback::Incomplete { unfinished: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"incomplete","unfinished":2}"#);

        let back: Feedback = serde_json::from_str(r#"{"kind":"clear"}"#).unwrap();
        assert_eq!(back, Feedback::Clear);
    }
}
