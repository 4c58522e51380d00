//! Task files and the built-in sample backlog.
//!
//! Accepted files:
//! - `*.toml`: `[[tasks]]` tables with `name`, `deadline`, `estimated_hours`
//! - anything else: a JSON array of the same objects

use anyhow::{Context, Result, bail};
use replan_core::{Task, TaskInput, parse_timezone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    pub tasks: Vec<TaskInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TaskFormat {
    Json,
    Toml,
}

impl TaskFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => TaskFormat::Toml,
            _ => TaskFormat::Json,
        }
    }
}

pub fn sample_inputs() -> Vec<TaskInput> {
    vec![
        TaskInput::new("Review project requirements", "2024-01-15T09:00:00", 2.0),
        TaskInput::new("Design system architecture", "2024-01-15T17:00:00", 4.0),
        TaskInput::new("Set up development environment", "2024-01-16T12:00:00", 1.5),
        TaskInput::new("Implement core features", "2024-01-17T17:00:00", 6.0),
        TaskInput::new("Write unit tests", "2024-01-18T15:00:00", 3.0),
        TaskInput::new("Create documentation", "2024-01-19T17:00:00", 2.0),
    ]
}

pub fn parse_inputs(s: &str, format: TaskFormat) -> Result<Vec<TaskInput>> {
    match format {
        TaskFormat::Json => Ok(serde_json::from_str(s).context("parse JSON task list")?),
        TaskFormat::Toml => {
            let file: TaskFile = toml::from_str(s).context("parse TOML task file")?;
            Ok(file.tasks)
        }
    }
}

pub fn render_inputs(inputs: &[TaskInput], format: TaskFormat) -> Result<String> {
    match format {
        TaskFormat::Json => Ok(serde_json::to_string_pretty(inputs)?),
        TaskFormat::Toml => {
            let file = TaskFile {
                tasks: inputs.to_vec(),
            };
            Ok(toml::to_string_pretty(&file)?)
        }
    }
}

/// Validate inputs into tasks; naive deadlines are read in `timezone`.
pub fn into_tasks(inputs: Vec<TaskInput>, timezone: &str) -> Result<Vec<Task>> {
    let tz = parse_timezone(timezone)?;
    inputs
        .into_iter()
        .map(|i| i.into_task(tz).map_err(anyhow::Error::from))
        .collect()
}

/// Tasks from `path`, or the sample backlog when no path is given.
pub fn load_tasks(path: Option<&Path>, timezone: &str) -> Result<Vec<Task>> {
    let inputs = match path {
        Some(p) => {
            if !p.exists() {
                bail!("task file not found: {}", p.display());
            }
            let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
            parse_inputs(&s, TaskFormat::for_path(p))
                .with_context(|| format!("parsing {}", p.display()))?
        }
        None => sample_inputs(),
    };
    into_tasks(inputs, timezone)
}
