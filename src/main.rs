//! Bike-Sharing Insights CLI
//!
//! Command-line front end over the same views and aggregates the API serves:
//! - Render a dashboard view with its insights
//! - Print one summary table
//! - List available views and aggregates
//! - Generate a default config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bikeshare::analytics::AggregateKind;
use bikeshare::config::{generate_default_config, Config};
use bikeshare::dataset::Dataset;
use bikeshare::logging;
use bikeshare::report::{build_view, render_aggregate, render_view, OutputFormat, View};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Descriptive analytics over bike-sharing rental records")]
#[command(long_about = "Summarizes daily and hourly bike-sharing rentals by season, day type,\nweather and user group, and states the findings in plain sentences.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Config file (default: user config dir, then ./bikeshare.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Daily records CSV (overrides config)
    #[arg(long, global = true)]
    pub daily: Option<PathBuf>,

    /// Hourly records CSV (overrides config)
    #[arg(long, global = true)]
    pub hourly: Option<PathBuf>,

    /// Log level on stderr (overrides config and BIKESHARE_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a dashboard view (home, seasonal-rentals, working-day, weather, casual-vs-registered)
    View {
        /// View name
        name: View,
    },

    /// Print one summary table
    Aggregate {
        /// Aggregate name (seasons, day-status, day-type, hourly, weather, monthly, growth)
        name: AggregateKind,
    },

    /// List dashboard views
    Views,

    /// List aggregates
    Aggregates,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };
    apply_cli_overrides(&mut config, &cli);

    let _guard = logging::init(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::View { name } => {
            let dataset = load_dataset(&config)?;
            let report = build_view(name, &dataset)
                .with_context(|| format!("Failed to build view '{}'", name))?;
            print!("{}", render_view(&report, cli.format)?);
        }

        Commands::Aggregate { name } => {
            let dataset = load_dataset(&config)?;
            let table = name
                .compute(&dataset)
                .with_context(|| format!("Failed to compute aggregate '{}'", name))?;
            print!("{}", render_aggregate(&table, cli.format)?);
        }

        Commands::Views => {
            for view in View::all() {
                println!("{:<22} {}", view.slug(), view.title());
            }
        }

        Commands::Aggregates => {
            for kind in AggregateKind::all() {
                println!("{:<12} {}", kind.name(), kind.description());
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Flags given on the command line win over the config file and environment
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(path) = &cli.daily {
        config.data.daily_path = path.clone();
    }
    if let Some(path) = &cli.hourly {
        config.data.hourly_path = path.clone();
    }
}

fn load_dataset(config: &Config) -> Result<Dataset> {
    Dataset::load(&config.data.daily_path, &config.data.hourly_path).with_context(|| {
        format!(
            "Failed to load records from {:?} and {:?}",
            config.data.daily_path, config.data.hourly_path
        )
    })
}
