//! Schedule State: the single record handed from phase to phase.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::InvalidTaskError;
use crate::feedback::Feedback;
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleState {
    /// Every task of the run, in insertion order. Never mutated by a phase.
    pub backlog: Vec<Task>,
    /// Today's selected task names; head is executed next.
    pub daily_plan: Vec<String>,
    /// Completed task names in completion order. Append-only.
    pub completed: Vec<String>,
    pub feedback: Feedback,
}

/// Zero state for a run: empty plan, nothing completed, no feedback.
pub fn create_initial_state(tasks: Vec<Task>) -> Result<ScheduleState, InvalidTaskError> {
    let mut seen = HashSet::new();
    for t in &tasks {
        if !seen.insert(t.name()) {
            return Err(InvalidTaskError::DuplicateName(t.name().to_string()));
        }
    }

    Ok(ScheduleState {
        backlog: tasks,
        ..ScheduleState::default()
    })
}

impl ScheduleState {
    pub fn task_by_name(&self, name: &str) -> Option<&Task> {
        self.backlog.iter().find(|t| t.name() == name)
    }

    /// Backlog tasks not yet completed, in backlog order.
    pub fn incomplete_tasks(&self) -> impl Iterator<Item = &Task> {
        let done: HashSet<&str> = self.completed.iter().map(String::as_str).collect();
        self.backlog.iter().filter(move |t| !done.contains(t.name()))
    }

    pub fn remaining_count(&self) -> usize {
        self.backlog.len().saturating_sub(self.completed.len())
    }

    /// Total estimated hours of the current daily plan.
    pub fn planned_hours(&self) -> f64 {
        self.daily_plan
            .iter()
            .filter_map(|n| self.task_by_name(n))
            .map(Task::estimated_duration)
            .sum()
    }

    /// Completed share of the backlog in percent; 0 for an empty backlog.
    pub fn completion_rate(&self) -> f64 {
        if self.backlog.is_empty() {
            return 0.0;
        }
        self.completed.len() as f64 / self.backlog.len() as f64 * 100.0
    }

    pub fn is_finished(&self) -> bool {
        self.daily_plan.is_empty() && self.completed.len() == self.backlog.len()
    }

    /// Structural invariants that must hold before and after every phase.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut universe = HashSet::new();
        for t in &self.backlog {
            if !universe.insert(t.name()) {
                return Err(format!("duplicate backlog task '{}'", t.name()));
            }
        }

        let mut planned = HashSet::new();
        for n in &self.daily_plan {
            if !universe.contains(n.as_str()) {
                return Err(format!("planned task '{n}' is not in the backlog"));
            }
            if !planned.insert(n.as_str()) {
                return Err(format!("task '{n}' is planned twice"));
            }
        }

        let mut done = HashSet::new();
        for n in &self.completed {
            if !universe.contains(n.as_str()) {
                return Err(format!("completed task '{n}' is not in the backlog"));
            }
            if !done.insert(n.as_str()) {
                return Err(format!("task '{n}' is completed twice"));
            }
            if planned.contains(n.as_str()) {
                return Err(format!("task '{n}' is both planned and completed"));
            }
        }

        Ok(())
    }

    /// `completed` may only grow at the end: `before` must stay a prefix.
    pub fn check_completed_extends(&self, before: &[String]) -> Result<(), String> {
        if !self.completed.starts_with(before) {
            return Err(format!(
                "completed list shrank or reordered: {before:?} -> {:?}",
                self.completed
            ));
        }
        Ok(())
    }
}
