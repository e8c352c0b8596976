//! ninja-vscode: VS Code task and launch generator for Ninja build directories.
//!
//! This is the entry point of the application. It parses command-line arguments,
//! loads configuration, queries ninja for phony targets and writes `tasks.json`
//! and `launch.json`.

mod config;
mod launch;
mod output;
mod targets;
mod tasks;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::builder::styling::{AnsiColor, Effects, Style};
use clap::builder::Styles;
use clap::Parser;
use log::info;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::launch::{guess_executables, launch_config, LaunchDocument};
use crate::targets::{extract_targets, TargetQuery};
use crate::tasks::{build_task, TasksDocument};

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(
    name = "ninja-vscode",
    version,
    about = "Generate VS Code tasks.json and launch.json over Ninja",
    styles = help_styles()
)]
struct Cli {
    /// Locate build folder.
    #[arg(short = 'p', value_name = "BUILD_PATH")]
    build_path: Option<String>,
    /// Locate output vscode folder.
    #[arg(short = 'o', value_name = "OUTPUT_PATH")]
    output_path: Option<String>,
    /// Build tool used to list targets.
    #[arg(long)]
    ninja: Option<String>,
    /// Path to ninja-vscode.toml configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ignore any ninja-vscode.toml in the current directory.
    #[arg(long)]
    no_config: bool,
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    build_path: String,
    output_path: PathBuf,
    ninja: String,
}

impl Settings {
    fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            build_path: cli
                .build_path
                .clone()
                .or(config.build_path)
                .unwrap_or_else(|| ".".to_string()),
            output_path: PathBuf::from(
                cli.output_path
                    .clone()
                    .or(config.output_path)
                    .unwrap_or_else(|| ".".to_string()),
            ),
            ninja: cli
                .ninja
                .clone()
                .or(config.ninja)
                .unwrap_or_else(|| "ninja".to_string()),
        }
    }
}

/// What a run produced.
#[derive(Debug)]
struct Summary {
    tasks: usize,
    configurations: usize,
    written: [PathBuf; 2],
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let settings = Settings::resolve(&cli, config);
    let summary = run(&settings).await?;
    info!(
        "wrote {} tasks to {} and {} configurations to {}",
        summary.tasks,
        summary.written[0].display(),
        summary.configurations,
        summary.written[1].display()
    );
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    if cli.no_config {
        return Ok(Config::default());
    }
    match cli.config.clone().or_else(default_config_path) {
        Some(path) => config::load_config(&path),
        None => Ok(Config::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        None
    }
}

async fn run(settings: &Settings) -> Result<Summary> {
    let query = TargetQuery::new(&settings.ninja, &settings.build_path);
    let targets = extract_targets(&query).await?;
    info!("found {} phony targets in {}", targets.len(), settings.build_path);

    let tasks = TasksDocument::new(
        targets
            .iter()
            .map(|target| build_task(target, &settings.build_path))
            .collect(),
    );
    let launch = LaunchDocument::new(
        guess_executables(&targets)
            .into_iter()
            .map(|target| launch_config(&settings.build_path, target))
            .collect(),
    );

    let written = output::write_documents(&settings.output_path, &tasks, &launch)?;
    Ok(Summary {
        tasks: tasks.tasks.len(),
        configurations: launch.configurations.len(),
        written,
    })
}

fn help_styles() -> Styles {
    let bold = |color: AnsiColor| Style::new().fg_color(Some(color.into())).effects(Effects::BOLD);
    Styles::styled()
        .header(bold(AnsiColor::Cyan))
        .usage(bold(AnsiColor::Green))
        .literal(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
        .placeholder(Style::new().fg_color(Some(AnsiColor::Magenta.into())))
}
