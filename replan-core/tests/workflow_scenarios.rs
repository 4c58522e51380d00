use chrono::{DateTime, Duration, TimeZone, Utc};
use replan_core::{
    CycleController, DEFAULT_CAPACITY_HOURS, Feedback, Phase, RecordingObserver, ReplanMode,
    ScheduleState, Task, TaskInput, WorkflowConfig, WorkflowError, WorkflowEvent,
    create_initial_state, execute_day, plan_tasks, reflect, replan, run_workflow,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

fn task(name: &str, hours_after_start: i64, duration: f64) -> Task {
    Task::new(name, start() + Duration::hours(hours_after_start), duration).unwrap()
}

/// The demo backlog: six tasks, 18.5 hours total.
fn demo_backlog() -> Vec<Task> {
    [
        ("Review project requirements", "2024-01-15T09:00:00", 2.0),
        ("Design system architecture", "2024-01-15T17:00:00", 4.0),
        ("Set up development environment", "2024-01-16T12:00:00", 1.5),
        ("Implement core features", "2024-01-17T17:00:00", 6.0),
        ("Write unit tests", "2024-01-18T15:00:00", 3.0),
        ("Create documentation", "2024-01-19T17:00:00", 2.0),
    ]
    .into_iter()
    .map(|(n, d, h)| TaskInput::new(n, d, h).into_task(chrono_tz::Tz::UTC).unwrap())
    .collect()
}

fn assert_disjoint(s: &ScheduleState) {
    for n in &s.daily_plan {
        assert!(!s.completed.contains(n), "{n} is planned and completed");
    }
}

#[test]
fn scenario_a_two_tasks_fit() {
    let state = create_initial_state(vec![task("T1", 0, 2.0), task("T2", 24, 3.0)]).unwrap();
    let planned = plan_tasks(state, DEFAULT_CAPACITY_HOURS);
    assert_eq!(planned.daily_plan, vec!["T1", "T2"]);
    assert_eq!(planned.planned_hours(), 5.0);
}

#[test]
fn scenario_b_oversized_task_is_skipped() {
    let state = create_initial_state(vec![task("T1", 0, 9.0)]).unwrap();
    let planned = plan_tasks(state, DEFAULT_CAPACITY_HOURS);
    assert!(planned.daily_plan.is_empty());
}

#[test]
fn scenario_c_third_task_overflows() {
    let state = create_initial_state(vec![
        task("T3", 48, 3.0),
        task("T1", 0, 3.0),
        task("T2", 24, 3.0),
    ])
    .unwrap();
    let planned = plan_tasks(state, DEFAULT_CAPACITY_HOURS);
    assert_eq!(planned.daily_plan, vec!["T1", "T2"]);
    assert_eq!(planned.planned_hours(), 6.0);
}

#[test]
fn full_cycle_single_task() {
    let state = create_initial_state(vec![task("T1", 0, 1.0)]).unwrap();
    let mut controller =
        CycleController::with_observer(WorkflowConfig::default(), RecordingObserver::new());
    let out = controller.run(state).unwrap();

    assert_eq!(out.completed, vec!["T1"]);
    assert!(out.daily_plan.is_empty());
    assert_eq!(out.feedback, Feedback::Clear);

    let events = controller.into_observer().into_events();
    assert_eq!(
        events.last(),
        Some(&WorkflowEvent::Branch {
            from: Phase::Reflect,
            to: Phase::Done,
            feedback: Feedback::Clear,
        })
    );
}

#[test]
fn demo_backlog_with_observed_wiring() {
    let state = create_initial_state(demo_backlog()).unwrap();
    let out = run_workflow(state, 10).unwrap();

    // First plan: 2 + 4 + 1.5 = 7.5h; one task executes, the rest is cleared.
    assert_eq!(out.completed, vec!["Review project requirements"]);
    assert!(out.daily_plan.is_empty());
    assert_eq!(out.feedback, Feedback::BacklogRemains { remaining: 5 });
}

#[test]
fn demo_backlog_with_reconsider_replans_each_incomplete_day() {
    let state = create_initial_state(demo_backlog()).unwrap();
    let config = WorkflowConfig::default().with_replan_mode(ReplanMode::Reconsider);
    let mut controller = CycleController::with_observer(config, RecordingObserver::new());
    let out = controller.run(state).unwrap();

    // The fourth plan holds only the 6h task (6 + 3 > 8); once it runs the day
    // is complete and REFLECT ends the run with backlog left over.
    assert_eq!(controller.cycles(), 4);
    assert_eq!(
        out.completed,
        vec![
            "Review project requirements",
            "Design system architecture",
            "Set up development environment",
            "Implement core features",
        ]
    );
    assert_eq!(out.feedback, Feedback::BacklogRemains { remaining: 2 });
    assert!(!out.is_finished());
}

#[test]
fn reconsider_does_not_revisit_backlog_after_a_full_day() {
    let state = create_initial_state(vec![task("a", 0, 8.0), task("b", 1, 1.0)]).unwrap();
    let config = WorkflowConfig::default().with_replan_mode(ReplanMode::Reconsider);
    let mut controller = CycleController::with_observer(config, RecordingObserver::new());
    let out = controller.run(state).unwrap();

    assert_eq!(out.completed, vec!["a"]);
    assert_eq!(out.feedback, Feedback::BacklogRemains { remaining: 1 });
    assert_eq!(controller.cycles(), 1);

    let events = controller.into_observer().into_events();
    assert!(matches!(
        events.first(),
        Some(WorkflowEvent::RunStarted {
            replan_mode: ReplanMode::Reconsider,
            ..
        })
    ));
}

#[test]
fn demo_backlog_hits_a_tight_cycle_cap() {
    let state = create_initial_state(demo_backlog()).unwrap();
    let config = WorkflowConfig::default()
        .with_replan_mode(ReplanMode::Reconsider)
        .with_max_cycles(Some(3));
    let err = CycleController::with_observer(config, RecordingObserver::new())
        .run(state)
        .unwrap_err();
    assert_eq!(err, WorkflowError::CycleLimitExceeded { max_cycles: 3 });
}

#[test]
fn one_branch_decision_per_reflect_pass() {
    let state = create_initial_state(demo_backlog()).unwrap();
    let config = WorkflowConfig::default().with_replan_mode(ReplanMode::Reconsider);
    let mut rec = RecordingObserver::new();
    CycleController::with_observer(config, &mut rec).run(state).unwrap();

    let reflects = rec
        .entered_phases()
        .into_iter()
        .filter(|p| *p == Phase::Reflect)
        .count();
    assert_eq!(rec.branches().len(), reflects);
    assert_eq!(rec.entered_phases()[..3], [Phase::Plan, Phase::Execute, Phase::Reflect]);
}

#[test]
fn disjointness_holds_across_manual_phase_sequence() {
    let mut s = create_initial_state(demo_backlog()).unwrap();
    assert_disjoint(&s);
    s = plan_tasks(s, DEFAULT_CAPACITY_HOURS);
    assert_disjoint(&s);
    for _ in 0..2 {
        s = execute_day(s);
        assert_disjoint(&s);
        s = reflect(s);
        assert_disjoint(&s);
    }
    assert_eq!(s.feedback, Feedback::Incomplete { unfinished: 1 });
    s = replan(s);
    assert_disjoint(&s);
    s = plan_tasks(s, DEFAULT_CAPACITY_HOURS);
    assert_disjoint(&s);
    assert!(s.check_invariants().is_ok());
    assert_eq!(s.daily_plan[0], "Set up development environment");
}

#[test]
fn duplicate_names_are_rejected_before_running() {
    let err = create_initial_state(vec![task("T1", 0, 1.0), task("T1", 1, 2.0)]).unwrap_err();
    let err: WorkflowError = err.into();
    assert!(err.to_string().contains("duplicate task name"));
}
