//! Observer hooks for workflow progress.
//!
//! The controller calls these at phase entry, phase exit, and after every
//! branch decision. Phases themselves never narrate.

use serde::{Deserialize, Serialize};

use crate::controller::{Phase, ReplanMode, WorkflowConfig};
use crate::feedback::Feedback;
use crate::state::ScheduleState;

pub trait WorkflowObserver {
    /// Called once per run, after the config has been validated.
    fn on_run_start(&mut self, _config: &WorkflowConfig) {}

    fn on_phase_enter(&mut self, _phase: Phase, _cycle: usize, _state: &ScheduleState) {}

    fn on_phase_exit(&mut self, _phase: Phase, _cycle: usize, _state: &ScheduleState) {}

    /// `from` is the phase whose outcome was inspected, `to` the chosen successor.
    fn on_branch(&mut self, _from: Phase, _to: Phase, _feedback: &Feedback) {}
}

impl<O: WorkflowObserver + ?Sized> WorkflowObserver for &mut O {
    fn on_run_start(&mut self, config: &WorkflowConfig) {
        (**self).on_run_start(config);
    }

    fn on_phase_enter(&mut self, phase: Phase, cycle: usize, state: &ScheduleState) {
        (**self).on_phase_enter(phase, cycle, state);
    }

    fn on_phase_exit(&mut self, phase: Phase, cycle: usize, state: &ScheduleState) {
        (**self).on_phase_exit(phase, cycle, state);
    }

    fn on_branch(&mut self, from: Phase, to: Phase, feedback: &Feedback) {
        (**self).on_branch(from, to, feedback);
    }
}

/// Narrates progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl WorkflowObserver for TracingObserver {
    fn on_run_start(&mut self, config: &WorkflowConfig) {
        tracing::info!(
            capacity = config.capacity_hours,
            max_cycles = ?config.max_cycles,
            replan_mode = ?config.replan_mode,
            "Starting workflow"
        );
    }

    fn on_phase_enter(&mut self, phase: Phase, cycle: usize, _state: &ScheduleState) {
        tracing::debug!(%phase, cycle, "Entering phase");
    }

    fn on_phase_exit(&mut self, phase: Phase, cycle: usize, state: &ScheduleState) {
        match phase {
            Phase::Plan => tracing::info!(
                tasks = state.daily_plan.len(),
                hours = state.planned_hours(),
                "Planned tasks for the day"
            ),
            Phase::Execute => tracing::info!(
                cycle,
                completed = state.completed.len(),
                last = state.completed.last().map(String::as_str).unwrap_or("-"),
                "Executed daily plan"
            ),
            Phase::Reflect | Phase::Replan => tracing::info!(
                %phase,
                feedback = %state.feedback,
                unfinished = state.daily_plan.len(),
                "Phase finished"
            ),
            Phase::Done => {}
        }
    }

    fn on_branch(&mut self, from: Phase, to: Phase, feedback: &Feedback) {
        tracing::info!(%from, %to, ?feedback, "Branch decision");
    }
}

/// Structured record of one observer callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    RunStarted {
        capacity_hours: f64,
        max_cycles: Option<usize>,
        replan_mode: ReplanMode,
    },
    PhaseEntered {
        phase: Phase,
        cycle: usize,
    },
    PhaseExited {
        phase: Phase,
        cycle: usize,
        planned: usize,
        completed: usize,
        feedback: Feedback,
    },
    Branch {
        from: Phase,
        to: Phase,
        feedback: Feedback,
    },
}

/// Collects every callback as a `WorkflowEvent`, for assertions and reports.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<WorkflowEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_events(self) -> Vec<WorkflowEvent> {
        self.events
    }

    /// Phases in the order they were entered.
    pub fn entered_phases(&self) -> Vec<Phase> {
        self.events
            .iter()
            .filter_map(|e| match e {
                WorkflowEvent::PhaseEntered { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect()
    }

    pub fn branches(&self) -> Vec<(Phase, Phase)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                WorkflowEvent::Branch { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl WorkflowObserver for RecordingObserver {
    fn on_run_start(&mut self, config: &WorkflowConfig) {
        self.events.push(WorkflowEvent::RunStarted {
            capacity_hours: config.capacity_hours,
            max_cycles: config.max_cycles,
            replan_mode: config.replan_mode,
        });
    }

    fn on_phase_enter(&mut self, phase: Phase, cycle: usize, _state: &ScheduleState) {
        self.events.push(WorkflowEvent::PhaseEntered { phase, cycle });
    }

    fn on_phase_exit(&mut self, phase: Phase, cycle: usize, state: &ScheduleState) {
        self.events.push(WorkflowEvent::PhaseExited {
            phase,
            cycle,
            planned: state.daily_plan.len(),
            completed: state.completed.len(),
            feedback: state.feedback,
        });
    }

    fn on_branch(&mut self, from: Phase, to: Phase, feedback: &Feedback) {
        self.events.push(WorkflowEvent::Branch {
            from,
            to,
            feedback: *feedback,
        });
    }
}
