//! Daily planner: deadline-ordered, capacity-bounded greedy selection.
//!
//! Algorithm (deterministic):
//! 1) take backlog tasks not yet completed
//! 2) stable sort by deadline ASC (ties keep backlog order)
//! 3) accumulate while `total + duration <= capacity`
//! 4) stop at the first task that would overflow; later tasks are not considered

use crate::feedback::Feedback;
use crate::state::ScheduleState;
use crate::task::Task;

/// Hours of work a daily plan may hold.
pub const DEFAULT_CAPACITY_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planner {
    pub capacity_hours: f64,
}

impl Default for Planner {
    fn default() -> Self {
        Self {
            capacity_hours: DEFAULT_CAPACITY_HOURS,
        }
    }
}

impl Planner {
    pub fn new(capacity_hours: f64) -> Self {
        Self { capacity_hours }
    }

    /// Pick today's task names from the incomplete backlog.
    pub fn select<'a, I>(&self, incomplete: I) -> (Vec<String>, f64)
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut sorted: Vec<&Task> = incomplete.into_iter().collect();
        // `sort_by_key` is stable.
        sorted.sort_by_key(|t| t.deadline());

        let mut plan = Vec::new();
        let mut total = 0.0;
        for t in sorted {
            if total + t.estimated_duration() > self.capacity_hours {
                tracing::debug!(
                    task = t.name(),
                    hours = t.estimated_duration(),
                    total,
                    "Capacity reached, stopping"
                );
                break;
            }
            total += t.estimated_duration();
            plan.push(t.name().to_string());
        }

        (plan, total)
    }

    pub fn plan(&self, mut state: ScheduleState) -> ScheduleState {
        let (plan, total) = self.select(state.incomplete_tasks());
        tracing::debug!(tasks = plan.len(), hours = total, "Planned day");

        state.daily_plan = plan;
        state.feedback = Feedback::Clear;
        state
    }
}

/// Planner phase with an explicit capacity.
pub fn plan_tasks(state: ScheduleState, capacity_hours: f64) -> ScheduleState {
    Planner::new(capacity_hours).plan(state)
}
