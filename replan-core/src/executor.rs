//! Executor: simulates a work day by completing the head of the daily plan.
//!
//! Exactly one task per invocation, and it always succeeds.

use crate::feedback::Feedback;
use crate::state::ScheduleState;

pub fn execute_day(mut state: ScheduleState) -> ScheduleState {
    state.feedback = Feedback::Clear;

    if state.daily_plan.is_empty() {
        tracing::debug!("No tasks to execute");
        return state;
    }

    let current = state.daily_plan.remove(0);
    tracing::debug!(task = %current, "Completing task");
    state.completed.push(current);
    state
}
