use anyhow::{Context, Result};
use replan_core::{DEFAULT_CAPACITY_HOURS, DEFAULT_MAX_CYCLES, ReplanMode, WorkflowConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub fn replan_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".replan"))
}

pub fn ensure_replan_home() -> Result<PathBuf> {
    let dir = replan_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub planner: PlannerSection,
    pub workflow: WorkflowSection,
    pub input: InputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSection {
    pub capacity_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSection {
    /// 0 disables the cap.
    pub max_cycles: usize,
    pub replan_mode: ReplanMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// IANA timezone for deadlines written without an offset.
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planner: PlannerSection {
                capacity_hours: DEFAULT_CAPACITY_HOURS,
            },
            workflow: WorkflowSection {
                max_cycles: DEFAULT_MAX_CYCLES,
                replan_mode: ReplanMode::ClearPlan,
            },
            input: InputSection {
                timezone: "UTC".to_string(),
            },
        }
    }
}

impl Default for PlannerSection {
    fn default() -> Self {
        Config::default().planner
    }
}

impl Default for WorkflowSection {
    fn default() -> Self {
        Config::default().workflow
    }
}

impl Default for InputSection {
    fn default() -> Self {
        Config::default().input
    }
}

impl Config {
    pub fn workflow_config(&self) -> WorkflowConfig {
        let max_cycles = match self.workflow.max_cycles {
            0 => None,
            n => Some(n),
        };
        WorkflowConfig::default()
            .with_capacity(self.planner.capacity_hours)
            .with_max_cycles(max_cycles)
            .with_replan_mode(self.workflow.replan_mode)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(replan_home()?.join("config.toml"))
}

/// Load `path`, or the default location when `None`. A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_replan_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}
