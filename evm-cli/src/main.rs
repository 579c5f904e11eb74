use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use evm_core::time::parse_instant;
use evm_core::{Project, TaskDraft, MAX_TREND_DAYS};
use evm_ingest::{
    load_tasks_json, parse_checklist_md, parse_tasks_csv, save_tasks_json, write_trend_csv_file,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod report;
mod sample;
mod state;

use config::Config;
use report::{render_metrics, render_tasks, render_trend, StatusReport};

#[derive(Parser, Debug)]
#[command(
    name = "evm",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EVM_BUILD_SHA"), ")"),
    about = "Earned value reports for a project task list"
)]
struct Cli {
    /// Task file (default: ~/.evm/tasks.json)
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// IANA timezone for calendar dates (default: config calendar.timezone)
    #[arg(long, global = true)]
    tz: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PV/EV/AC, variances and indices as of a date
    Metrics {
        /// As-of date: YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC3339 (default: now)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Project overview, metrics and red/amber/green status
    Status {
        #[arg(long)]
        as_of: Option<String>,

        /// Override the green floor for both indices
        #[arg(long)]
        good: Option<f64>,

        /// Override the amber floor for both indices
        #[arg(long)]
        warning: Option<f64>,
    },

    /// Daily trend ending today
    Trend {
        /// Number of past days (default: config trend.days)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_TREND_DAYS)))]
        days: Option<u32>,

        /// Also write the series to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Edit the task file
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Import tasks from a CSV or markdown checklist into the task file
    Import {
        #[arg(long, conflicts_with = "md")]
        csv: Option<PathBuf>,

        #[arg(long)]
        md: Option<PathBuf>,

        /// Replace the existing task list instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Status report for a built-in sample project
    Demo {
        #[arg(long)]
        as_of: Option<String>,

        /// Write the sample tasks to the task file
        #[arg(long)]
        save: bool,
    },

    /// Manage ~/.evm/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// Add a task
    Add {
        name: String,

        #[arg(long)]
        planned: f64,

        #[arg(long, default_value_t = 0.0)]
        actual: f64,

        /// Planned start date
        #[arg(long)]
        start: String,

        /// Planned end date
        #[arg(long)]
        end: String,

        #[arg(long)]
        completed: bool,
    },

    /// Toggle completion (stamps or clears the completion date)
    Complete { id: String },

    /// Delete a task
    Delete { id: String },

    /// Set the actual cost spent so far
    Cost { id: String, amount: f64 },

    /// List tasks
    List,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let now = Utc::now();
    let mut cfg = config::load_config()?;
    if let Some(tz) = &cli.tz {
        evm_core::time::parse_tz(tz)?;
        cfg.calendar.timezone = tz.clone();
    }
    let tasks_path = state::resolve_tasks_path(cli.tasks.clone())?;

    match cli.command {
        Command::Metrics { as_of } => {
            let project = load_project(&tasks_path)?;
            let as_of = resolve_as_of(as_of.as_deref(), &cfg, now)?;
            let m = project.metrics(as_of);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&m)?);
            } else {
                println!("As of {}\n", as_of.format("%Y-%m-%d %H:%M UTC"));
                print!("{}", render_metrics(&m));
            }
        }

        Command::Status { as_of, good, warning } => {
            cfg.override_thresholds(good, warning);
            let project = load_project(&tasks_path)?;
            let as_of = resolve_as_of(as_of.as_deref(), &cfg, now)?;
            print_status(&project, as_of, &cfg, cli.json)?;
        }

        Command::Trend { days, csv } => {
            let project = load_project(&tasks_path)?;
            let days = days.unwrap_or(cfg.trend.days);
            let trend = project.trend(days, now);
            if let Some(path) = &csv {
                write_trend_csv_file(path, &trend)?;
                eprintln!("Wrote {} points to {}", trend.len(), path.display());
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&trend)?);
            } else {
                print!("{}", render_trend(&trend));
            }
        }

        Command::Task { command } => run_task_command(command, &tasks_path, &cfg, now, cli.json)?,

        Command::Import { csv, md, replace } => {
            let imported = match (csv, md) {
                (Some(p), None) => parse_tasks_csv(&p, &cfg.calendar.timezone)?,
                (None, Some(p)) => {
                    let text = std::fs::read_to_string(&p)
                        .with_context(|| format!("read {}", p.display()))?;
                    parse_checklist_md(&text, &cfg.calendar.timezone)
                        .with_context(|| format!("parsing {}", p.display()))?
                }
                _ => bail!("pass exactly one of --csv <file> or --md <file>"),
            };

            let mut tasks = if replace {
                Vec::new()
            } else {
                load_tasks_json(&tasks_path)?
            };
            let count = imported.len();
            tasks.extend(imported);
            let project = Project::from_tasks(tasks)
                .context("imported tasks clash with the existing list (try --replace)")?;
            save_tasks_json(&tasks_path, &project.tasks)?;
            println!("Imported {} tasks into {}", count, tasks_path.display());
        }

        Command::Demo { as_of, save } => {
            let project = Project::from_tasks(sample::sample_tasks()?)?;
            let as_of = match as_of {
                Some(s) => resolve_as_of(Some(s.as_str()), &cfg, now)?,
                None => sample::sample_as_of()?,
            };
            if save {
                save_tasks_json(&tasks_path, &project.tasks)?;
                eprintln!("Saved sample tasks to {}", tasks_path.display());
            }
            print_status(&project, as_of, &cfg, cli.json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&cfg)?);
                } else {
                    println!("# {}", config::config_path()?.display());
                    print!("{}", toml::to_string_pretty(&cfg)?);
                }
            }
        },
    }

    Ok(())
}

/// Tracing is opt-in via RUST_LOG and goes to stderr.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_project(path: &Path) -> Result<Project> {
    let tasks = load_tasks_json(path)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
    Ok(Project::from_tasks(tasks)?)
}

fn resolve_as_of(flag: Option<&str>, cfg: &Config, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match flag {
        Some(s) => parse_instant(s, &cfg.calendar.timezone).context("--as-of"),
        None => Ok(now),
    }
}

fn print_status(project: &Project, as_of: DateTime<Utc>, cfg: &Config, json: bool) -> Result<()> {
    let report = StatusReport::new(as_of, project.overview(), project.metrics(as_of), cfg);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }
    Ok(())
}

fn run_task_command(
    command: TaskCommand,
    tasks_path: &Path,
    cfg: &Config,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let mut project = load_project(tasks_path)?;

    match command {
        TaskCommand::Add {
            name,
            planned,
            actual,
            start,
            end,
            completed,
        } => {
            let tz = &cfg.calendar.timezone;
            let draft = TaskDraft {
                name,
                planned_cost: planned,
                actual_cost: actual,
                planned_start_date: parse_instant(&start, tz).context("--start")?,
                planned_end_date: parse_instant(&end, tz).context("--end")?,
                completed,
            };
            let id = project.add_task(draft, now)?.id.clone();
            println!("Added task {id}");
        }
        TaskCommand::Complete { id } => {
            let done = project.toggle_completion(&id, now)?;
            println!("Task {id} marked {}", if done { "completed" } else { "open" });
        }
        TaskCommand::Delete { id } => {
            let removed = project.delete_task(&id)?;
            println!("Deleted task {} ({})", removed.id, removed.name);
        }
        TaskCommand::Cost { id, amount } => {
            project.update_actual_cost(&id, amount)?;
            println!("Task {id} actual cost set to {}", evm_core::format_currency(amount));
        }
        TaskCommand::List => {
            if json {
                println!("{}", serde_json::to_string_pretty(&project.tasks)?);
            } else {
                print!("{}", render_tasks(&project.tasks));
            }
            return Ok(());
        }
    }

    save_tasks_json(tasks_path, &project.tasks)
}
