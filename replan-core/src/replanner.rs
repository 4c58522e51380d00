//! Replanner: drops what is left of the daily plan.
//!
//! Cleared tasks are not re-inserted anywhere. They stay in `backlog` and not in
//! `completed`, which makes them eligible for the next planning pass.

use crate::feedback::Feedback;
use crate::state::ScheduleState;

pub fn replan(mut state: ScheduleState) -> ScheduleState {
    if state.daily_plan.is_empty() {
        state.feedback = Feedback::Clear;
        return state;
    }

    let cleared = state.daily_plan.len();
    for name in &state.daily_plan {
        tracing::debug!(task = %name, "Back to planning");
    }
    state.daily_plan.clear();
    state.feedback = Feedback::Replanned { cleared };
    state
}
