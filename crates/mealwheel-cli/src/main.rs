mod check_cmd;
mod config;
mod generate_cmd;
mod render;
mod serve_cmd;
mod tui;

#[cfg(test)]
mod test_util;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use mealwheel_core::{MenuGenerator, MenuSession};
use mealwheel_data::{IngredientRepository, WorkbookLayout};

use config::{CliOverrides, MealwheelConfig};

#[derive(Parser)]
#[command(name = "mealwheel", about = "Randomized weekly family meal planner")]
struct Cli {
    /// Ingredient workbook path (overrides MEALWHEEL_WORKBOOK env var)
    #[arg(long, global = true)]
    workbook: Option<PathBuf>,

    /// Workbook layout: per-meal or single-sheet (overrides MEALWHEEL_LAYOUT)
    #[arg(long, global = true)]
    layout: Option<WorkbookLayout>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a mealwheel config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate one week and print it as a table
    Generate {
        /// Seed for a reproducible week (overrides MEALWHEEL_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Load the workbook and show every bucket with its size
    Check,
    /// Launch interactive TUI dashboard
    Dashboard {
        /// Seed for reproducible weeks (overrides MEALWHEEL_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the weekly menu over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
        /// Seed for reproducible weeks (overrides MEALWHEEL_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Commands {
    fn seed(&self) -> Option<u64> {
        match self {
            Self::Generate { seed } | Self::Dashboard { seed } | Self::Serve { seed, .. } => *seed,
            Self::Init { .. } | Self::Check => None,
        }
    }

    /// Default log level; the dashboard keeps quiet so the screen stays clean.
    fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Dashboard { .. } => "warn",
            _ => "info",
        }
    }
}

/// Execute the `mealwheel init` command: write config file.
fn cmd_init(
    workbook: Option<PathBuf>,
    layout: Option<WorkbookLayout>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let mut cfg = config::ConfigFile::default();
    if let Some(workbook) = workbook {
        cfg.source.workbook = workbook;
    }
    if let Some(layout) = layout {
        cfg.source.layout = layout;
    }

    config::save_config_to(&cfg, &path)?;

    println!("Config written to {}", path.display());
    println!("  source.workbook = {}", cfg.source.workbook.display());
    println!("  source.layout = {}", cfg.source.layout);
    println!();
    println!("Next: run `mealwheel check` to validate the workbook.");

    Ok(())
}

/// Build a session for the resolved config. The workbook is loaded here.
fn open_session(config: &MealwheelConfig) -> MenuSession {
    let repository = Arc::new(IngredientRepository::new(config.source.clone()));
    MenuSession::new(
        repository,
        config.keywords.clone(),
        MenuGenerator::with_seed(config.seed),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(cli.command.default_log_filter())
            }),
        )
        .init();

    let overrides = CliOverrides {
        workbook: cli.workbook,
        layout: cli.layout,
        seed: cli.command.seed(),
    };

    match cli.command {
        Commands::Init { force } => {
            cmd_init(overrides.workbook, overrides.layout, force)?;
        }
        Commands::Generate { .. } => {
            let resolved = MealwheelConfig::resolve(&overrides)?;
            generate_cmd::run_generate(resolved)?;
        }
        Commands::Check => {
            let resolved = MealwheelConfig::resolve(&overrides)?;
            check_cmd::run_check(resolved)?;
        }
        Commands::Dashboard { .. } => {
            let resolved = MealwheelConfig::resolve(&overrides)?;
            let session = open_session(&resolved);
            tui::run_dashboard(session, resolved.household)?;
        }
        Commands::Serve { bind, port, .. } => {
            let resolved = MealwheelConfig::resolve(&overrides)?;
            let session = open_session(&resolved);
            let state = serve_cmd::ServeState::new(session, resolved.household);
            serve_cmd::run_serve(state, &bind, port).await?;
        }
    }

    Ok(())
}
