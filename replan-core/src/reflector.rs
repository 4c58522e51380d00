//! Reflector: classifies the post-execution state into a `Feedback` signal.

use crate::feedback::Feedback;
use crate::state::ScheduleState;

/// Pure classification over the three counts that matter.
pub fn classify(unfinished: usize, completed: usize, backlog: usize) -> Feedback {
    if unfinished > 0 {
        return Feedback::Incomplete { unfinished };
    }
    if completed >= backlog {
        Feedback::Clear
    } else {
        Feedback::BacklogRemains {
            remaining: backlog - completed,
        }
    }
}

/// Only `feedback` is written; running it twice yields the same signal.
pub fn reflect(mut state: ScheduleState) -> ScheduleState {
    state.feedback = classify(
        state.daily_plan.len(),
        state.completed.len(),
        state.backlog.len(),
    );
    state
}
