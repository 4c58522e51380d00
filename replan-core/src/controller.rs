//! Cycle Controller: the plan / execute / reflect / replan state machine.
//!
//! ```text
//! PLAN    ─► EXECUTE
//! EXECUTE ─► REFLECT
//! REFLECT ─► REPLAN   if feedback is Incomplete, else DONE
//! REPLAN  ─► EXECUTE  (ReplanMode::ClearPlan)
//! REPLAN  ─► PLAN     (ReplanMode::Reconsider)
//! ```
//!
//! One cycle is one EXECUTE pass. Phases run strictly in sequence and
//! ownership of the state moves from phase to phase.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{WorkflowError, WorkflowResult};
use crate::executor::execute_day;
use crate::feedback::Feedback;
use crate::observer::{TracingObserver, WorkflowObserver};
use crate::planner::{DEFAULT_CAPACITY_HOURS, Planner};
use crate::reflector::reflect;
use crate::replanner::replan;
use crate::state::ScheduleState;

pub const DEFAULT_MAX_CYCLES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Plan,
    Execute,
    Reflect,
    Replan,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Plan => "plan",
            Phase::Execute => "execute",
            Phase::Reflect => "reflect",
            Phase::Replan => "replan",
            Phase::Done => "done",
        };
        f.write_str(s)
    }
}

/// Where REPLAN hands control next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplanMode {
    /// REPLAN → EXECUTE. The planner runs once; tasks left out of the first
    /// plan are never reconsidered within the run.
    #[default]
    ClearPlan,
    /// REPLAN → PLAN. After an incomplete day, the cleared tasks and any task
    /// not planned yet get another planning pass. REFLECT still ends the run
    /// once a plan is exhausted, so backlog can be left over.
    Reconsider,
}

/// Transition table. Pure: depends only on the current phase, the feedback, and the mode.
pub fn next_phase(phase: Phase, feedback: &Feedback, mode: ReplanMode) -> Phase {
    match phase {
        Phase::Plan => Phase::Execute,
        Phase::Execute => Phase::Reflect,
        Phase::Reflect if feedback.is_incomplete() => Phase::Replan,
        Phase::Reflect => Phase::Done,
        Phase::Replan => match mode {
            ReplanMode::ClearPlan => Phase::Execute,
            ReplanMode::Reconsider => Phase::Plan,
        },
        Phase::Done => Phase::Done,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkflowConfig {
    pub capacity_hours: f64,
    /// Hard cap on EXECUTE passes; `None` runs until DONE.
    pub max_cycles: Option<usize>,
    pub replan_mode: ReplanMode,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            capacity_hours: DEFAULT_CAPACITY_HOURS,
            max_cycles: Some(DEFAULT_MAX_CYCLES),
            replan_mode: ReplanMode::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn with_capacity(mut self, hours: f64) -> Self {
        self.capacity_hours = hours;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_replan_mode(mut self, mode: ReplanMode) -> Self {
        self.replan_mode = mode;
        self
    }

    pub fn validate(&self) -> WorkflowResult<()> {
        if !self.capacity_hours.is_finite() || self.capacity_hours < 0.0 {
            return Err(WorkflowError::InvalidConfig(format!(
                "capacity_hours must be a finite, non-negative number (got {})",
                self.capacity_hours
            )));
        }
        if self.max_cycles == Some(0) {
            return Err(WorkflowError::InvalidConfig(
                "max_cycles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct CycleController<O: WorkflowObserver = TracingObserver> {
    config: WorkflowConfig,
    observer: O,
    cycles: usize,
}

impl CycleController<TracingObserver> {
    pub fn new(config: WorkflowConfig) -> Self {
        Self::with_observer(config, TracingObserver)
    }
}

impl<O: WorkflowObserver> CycleController<O> {
    pub fn with_observer(config: WorkflowConfig, observer: O) -> Self {
        Self {
            config,
            observer,
            cycles: 0,
        }
    }

    /// EXECUTE passes made by the last `run`.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Drive the state machine from PLAN to DONE.
    ///
    /// Any failure aborts the run; the partially advanced state is dropped.
    pub fn run(&mut self, initial: ScheduleState) -> WorkflowResult<ScheduleState> {
        self.config.validate()?;
        initial
            .check_invariants()
            .map_err(|reason| WorkflowError::InvariantViolated {
                phase: Phase::Plan,
                reason,
            })?;

        self.observer.on_run_start(&self.config);

        let planner = Planner::new(self.config.capacity_hours);
        let mut state = initial;
        let mut phase = Phase::Plan;
        self.cycles = 0;

        while phase != Phase::Done {
            if phase == Phase::Execute {
                if let Some(max_cycles) = self.config.max_cycles {
                    if self.cycles >= max_cycles {
                        tracing::warn!(max_cycles, "Cycle limit reached, aborting run");
                        return Err(WorkflowError::CycleLimitExceeded { max_cycles });
                    }
                }
                self.cycles += 1;
            }

            self.observer.on_phase_enter(phase, self.cycles, &state);
            let completed_before = state.completed.clone();
            state = match phase {
                Phase::Plan => planner.plan(state),
                Phase::Execute => execute_day(state),
                Phase::Reflect => reflect(state),
                Phase::Replan => replan(state),
                Phase::Done => state,
            };
            state
                .check_invariants()
                .and_then(|()| state.check_completed_extends(&completed_before))
                .map_err(|reason| WorkflowError::InvariantViolated { phase, reason })?;
            self.observer.on_phase_exit(phase, self.cycles, &state);

            let next = next_phase(phase, &state.feedback, self.config.replan_mode);
            if phase == Phase::Reflect {
                self.observer.on_branch(phase, next, &state.feedback);
            }
            phase = next;
        }

        Ok(state)
    }
}

/// Run the workflow with default settings and an enforced cycle cap.
pub fn run_workflow(initial_state: ScheduleState, max_cycles: usize) -> WorkflowResult<ScheduleState> {
    let config = WorkflowConfig::default().with_max_cycles(Some(max_cycles));
    CycleController::new(config).run(initial_state)
}
