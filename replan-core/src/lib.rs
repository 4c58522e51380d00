//! replan-core: a cyclic plan / execute / reflect / replan workflow over a
//! backlog of deadline-bearing tasks.

pub mod controller;
pub mod error;
pub mod executor;
pub mod feedback;
pub mod observer;
pub mod planner;
pub mod reflector;
pub mod replanner;
pub mod state;
pub mod task;
pub mod time;

pub use controller::{
    CycleController, DEFAULT_MAX_CYCLES, Phase, ReplanMode, WorkflowConfig, next_phase,
    run_workflow,
};
pub use error::{InvalidTaskError, WorkflowError, WorkflowResult};
pub use executor::execute_day;
pub use feedback::Feedback;
pub use observer::{RecordingObserver, TracingObserver, WorkflowEvent, WorkflowObserver};
pub use planner::{DEFAULT_CAPACITY_HOURS, Planner, plan_tasks};
pub use reflector::{classify, reflect};
pub use replanner::replan;
pub use state::{ScheduleState, create_initial_state};
pub use task::{Task, TaskInput};
pub use time::{parse_deadline, parse_timezone};
