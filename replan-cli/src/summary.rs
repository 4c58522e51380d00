//! Plain-text rendering of a schedule state. Read-only over the state.

use replan_core::{ScheduleState, Task};
use std::fmt::Write;

const RULE: &str = "==================================================";

pub fn render_backlog(tasks: &[Task]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Backlog ({} tasks):", tasks.len());
    for (i, t) in tasks.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, t.name());
        let _ = writeln!(
            out,
            "     Due: {} ({}h)",
            t.deadline().format("%Y-%m-%d %H:%M UTC"),
            t.estimated_duration()
        );
    }
    out
}

pub fn render_plan(state: &ScheduleState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Planned {} tasks ({:.1} hours total)",
        state.daily_plan.len(),
        state.planned_hours()
    );
    for name in &state.daily_plan {
        let _ = writeln!(out, "  - {name}");
    }
    out
}

pub fn render_summary(state: &ScheduleState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "SCHEDULE STATE SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total Tasks: {}", state.backlog.len());
    let _ = writeln!(out, "Daily Plan: {} tasks", state.daily_plan.len());
    let _ = writeln!(out, "Completed: {} tasks", state.completed.len());
    let _ = writeln!(out, "Remaining: {} tasks", state.remaining_count());

    if !state.daily_plan.is_empty() {
        let _ = writeln!(out, "\nToday's Plan:");
        for (i, name) in state.daily_plan.iter().enumerate() {
            let _ = writeln!(out, "  {}. {name}", i + 1);
        }
    }

    if !state.completed.is_empty() {
        let _ = writeln!(out, "\nCompleted Tasks:");
        for name in &state.completed {
            let _ = writeln!(out, "  [x] {name}");
        }
    }

    if !state.feedback.is_clear() {
        let _ = writeln!(out, "\nFeedback: {}", state.feedback);
    }

    let _ = writeln!(out, "{RULE}");
    out
}

pub fn render_analysis(state: &ScheduleState, cycles: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Final analysis:");
    let _ = writeln!(
        out,
        "  Completion Rate: {:.0}% ({}/{})",
        state.completion_rate(),
        state.completed.len(),
        state.backlog.len()
    );
    let _ = writeln!(out, "  Cycles: {cycles}");
    if state.is_finished() {
        let _ = writeln!(out, "  Status: every task completed");
    } else {
        let _ = writeln!(out, "  Status: {}", state.feedback);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use replan_core::{Feedback, create_initial_state};

    fn state() -> ScheduleState {
        let deadline = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let tasks = vec![
            Task::new("a", deadline, 2.0).unwrap(),
            Task::new("b", deadline, 1.5).unwrap(),
        ];
        create_initial_state(tasks).unwrap()
    }

    #[test]
    fn summary_lists_plan_completed_and_feedback() {
        let mut s = state();
        s.daily_plan = vec!["b".into()];
        s.completed = vec!["a".into()];
        s.feedback = Feedback::Incomplete { unfinished: 1 };

        let out = render_summary(&s);
        assert!(out.contains("Total Tasks: 2"));
        assert!(out.contains("Remaining: 1 tasks"));
        assert!(out.contains("  1. b"));
        assert!(out.contains("[x] a"));
        assert!(out.contains("Feedback: plan incomplete: 1 remain"));
    }

    #[test]
    fn clear_feedback_is_omitted() {
        let out = render_summary(&state());
        assert!(!out.contains("Feedback:"));
        assert!(!out.contains("Today's Plan"));
    }

    #[test]
    fn analysis_reports_rate() {
        let mut s = state();
        s.completed = vec!["a".into()];
        s.feedback = Feedback::BacklogRemains { remaining: 1 };
        let out = render_analysis(&s, 2);
        assert!(out.contains("Completion Rate: 50% (1/2)"));
        assert!(out.contains("Cycles: 2"));
        assert!(out.contains("backlog remains"));
    }

    #[test]
    fn analysis_reports_finished_backlog() {
        let mut s = state();
        s.completed = vec!["a".into(), "b".into()];
        let out = render_analysis(&s, 1);
        assert!(out.contains("Completion Rate: 100% (2/2)"));
        assert!(out.contains("Status: every task completed"));
    }

    #[test]
    fn plan_shows_total_hours() {
        let mut s = state();
        s.daily_plan = vec!["a".into(), "b".into()];
        assert!(render_plan(&s).starts_with("Planned 2 tasks (3.5 hours total)"));
    }

    #[test]
    fn backlog_shows_due_dates() {
        let out = render_backlog(&state().backlog);
        assert!(out.contains("Due: 2024-01-15 09:00 UTC (2h)"));
        assert!(out.contains("(1.5h)"));
    }
}
