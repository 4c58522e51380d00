use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use replan_core::{CycleController, Planner, ReplanMode, TracingObserver, create_initial_state};
use std::path::PathBuf;

mod config;
mod logging;
mod summary;
mod tasks;

use config::Config;
use tasks::TaskFormat;

#[derive(Parser, Debug)]
#[command(name = "replan", version, about = "Plan, execute, reflect, and replan a task backlog")]
struct Cli {
    /// Config file (default: ~/.replan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Task file (JSON array or TOML [[tasks]]); defaults to the sample backlog
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// Timezone for deadlines written without an offset
    #[arg(long)]
    timezone: Option<String>,

    /// Daily capacity in hours
    #[arg(long)]
    capacity: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full plan/execute/reflect/replan workflow
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Abort after this many execute passes (0 disables the cap)
        #[arg(long)]
        max_cycles: Option<usize>,

        /// Send REPLAN back to PLAN instead of EXECUTE
        #[arg(long)]
        reconsider: bool,

        /// Print the final state as JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// Run only the planner and print today's plan
    Plan {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the sample backlog as a task file
    Sample {
        #[arg(long, value_enum, default_value = "json")]
        format: TaskFormat,
    },

    /// Manage ~/.replan/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Run {
            input,
            max_cycles,
            reconsider,
            json,
        } => {
            apply_input_overrides(&mut cfg, &input);
            if let Some(n) = max_cycles {
                cfg.workflow.max_cycles = n;
            }
            if reconsider {
                cfg.workflow.replan_mode = ReplanMode::Reconsider;
            }
            run(&cfg, input.tasks, json)?;
        }

        Command::Plan { input } => {
            apply_input_overrides(&mut cfg, &input);
            plan(&cfg, input.tasks)?;
        }

        Command::Sample { format } => {
            println!("{}", tasks::render_inputs(&tasks::sample_inputs(), format)?);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn apply_input_overrides(cfg: &mut Config, input: &InputArgs) {
    if let Some(tz) = &input.timezone {
        cfg.input.timezone = tz.clone();
    }
    if let Some(capacity) = input.capacity {
        cfg.planner.capacity_hours = capacity;
    }
}

fn run(cfg: &Config, tasks_path: Option<PathBuf>, json: bool) -> Result<()> {
    let backlog = tasks::load_tasks(tasks_path.as_deref(), &cfg.input.timezone)?;
    let initial = create_initial_state(backlog).context("building initial state")?;

    let workflow = cfg.workflow_config();

    if !json {
        print!("{}", summary::render_backlog(&initial.backlog));
        println!();
    }

    let mut controller = CycleController::with_observer(workflow, TracingObserver);
    let final_state = controller.run(initial).context("workflow run failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&final_state)?);
    } else {
        print!("{}", summary::render_summary(&final_state));
        println!();
        print!("{}", summary::render_analysis(&final_state, controller.cycles()));
    }

    Ok(())
}

fn plan(cfg: &Config, tasks_path: Option<PathBuf>) -> Result<()> {
    let backlog = tasks::load_tasks(tasks_path.as_deref(), &cfg.input.timezone)?;
    let initial = create_initial_state(backlog).context("building initial state")?;

    let workflow = cfg.workflow_config();
    workflow.validate()?;
    let planned = Planner::new(workflow.capacity_hours).plan(initial);

    print!("{}", summary::render_plan(&planned));
    Ok(())
}
