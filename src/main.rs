//! Classboard
//!
//! Command-line entry point:
//! - Serve the interactive dashboard
//! - Render one page to a file
//! - Check that the roster loads
//! - Print a default configuration file
//!
//! # Configuration
//!
//! Environment variables:
//! - `CLASSBOARD_ROSTER_PATH`: Spreadsheet to read (default: Student Dash-2.xlsx)
//! - `CLASSBOARD_HOST`: Host to bind to (default: 127.0.0.1)
//! - `CLASSBOARD_PORT`: Port to listen on (default: 8501)
//! - `CLASSBOARD_LOG_LEVEL` / `CLASSBOARD_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, overrides the configured level

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use classboard::api::{serve, AppState};
use classboard::config::{generate_default_config, Config, LoggingConfig};
use classboard::report::{render, render_html, ChartMode, SelectionParams};
use classboard::roster::{load_roster, Subject};

#[derive(Parser)]
#[command(name = "classboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Class dashboard: student cards and performance charts from a spreadsheet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Roster spreadsheet, overriding the config file
    #[arg(short, long, global = true)]
    pub roster: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard over HTTP (default)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render the dashboard page once and write the HTML
    Render {
        /// Chart to show
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        /// Student for the student performance chart
        #[arg(long)]
        student: Option<String>,
        /// Subject for the subject performance chart
        #[arg(long)]
        subject: Option<Subject>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the roster and print a summary
    Check,

    /// Print a default configuration file
    InitConfig,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Student,
    Subject,
}

impl From<ModeArg> for ChartMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Student => ChartMode::Student,
            ModeArg::Subject => ChartMode::Subject,
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    let registry = tracing_subscriber::registry().with(filter);

    // stderr keeps stdout free for rendered pages
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Some(roster) = &cli.roster {
        config.roster.path = roster.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    init_tracing(&config.logging);

    match cli.command {
        None => run_server(config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(config).await
        }
        Some(Commands::Render {
            mode,
            student,
            subject,
            output,
        }) => {
            let mode = mode.map(ChartMode::from).or(match (&student, &subject) {
                (None, Some(_)) => Some(ChartMode::Subject),
                _ => None,
            });
            let params = SelectionParams {
                mode,
                student,
                subject,
            };
            render_once(&config, &params, output)
        }
        Some(Commands::Check) => check(&config),
        Some(Commands::InitConfig) => Ok(()),
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Classboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Roster: {}", config.roster.path.display());

    let server = config.server.clone();
    serve(AppState::new(config), &server).await?;
    Ok(())
}

fn render_once(
    config: &Config,
    params: &SelectionParams,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let roster = load_roster(&config.roster.path);
    if let Err(e) = &roster {
        tracing::warn!("Roster failed to load: {}", e);
    }

    let view = render(roster.as_ref(), params, &config.dashboard, &config.theme);
    let page = render_html(&view, &config.theme);

    match output {
        Some(path) => {
            std::fs::write(&path, page)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", page),
    }

    Ok(())
}

fn check(config: &Config) -> anyhow::Result<()> {
    let path = &config.roster.path;
    let roster =
        load_roster(path).with_context(|| format!("loading roster {}", path.display()))?;

    println!("Roster:   {}", path.display());
    println!("Students: {}", roster.len());
    if let Some(header) = roster.class_header() {
        println!(
            "Class:    Grade {}, Division {} ({})",
            header.grade, header.division, header.class_teacher
        );
    }

    let duplicates = roster.duplicate_names();
    if !duplicates.is_empty() {
        println!("Duplicate names: {}", duplicates.join(", "));
    }
    if !roster.has_consistent_class() {
        println!("Warning: rows disagree on grade, division or class teacher");
    }

    Ok(())
}
