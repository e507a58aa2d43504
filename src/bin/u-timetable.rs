//! u-timetable CLI.
//!
//! Loads a problem configuration, searches for a routine, and prints it
//! as a console table or JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::config::ProblemConfig;
use u_timetable::render;
use u_timetable::{SearchLimits, SearchOutcome, Solver};

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Find a weekly class routine satisfying teacher demands")]
struct Cli {
    /// Problem configuration (JSON)
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Give up after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Give up after this many tentative assignments
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

const EXIT_NO_SOLUTION: u8 = 2;
const EXIT_ABORTED: u8 = 3;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let problem = ProblemConfig::from_path(&cli.config)
        .and_then(|config| config.build_problem())
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let mut limits = SearchLimits::none();
    if let Some(ms) = cli.timeout_ms {
        limits = limits.with_time_limit(Duration::from_millis(ms));
    }
    if let Some(n) = cli.max_nodes {
        limits = limits.with_max_nodes(n);
    }

    let report = Solver::new().with_limits(limits).solve(&problem);
    info!(
        nodes = report.stats.nodes,
        backtracks = report.stats.backtracks,
        rejections = report.stats.total_rejections(),
        "search statistics"
    );

    let routine = match report.outcome {
        SearchOutcome::Solved(routine) => routine,
        SearchOutcome::NoSolution => {
            println!("no solutions found");
            return Ok(ExitCode::from(EXIT_NO_SOLUTION));
        }
        SearchOutcome::Aborted(reason) => {
            warn!(%reason, "search aborted");
            println!("search aborted: {reason}");
            return Ok(ExitCode::from(EXIT_ABORTED));
        }
    };

    let rendered = match cli.format {
        Format::Table => render::console_table(&routine),
        Format::Json => render::to_json_string(&routine)?,
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "routine written");
        }
        None => println!("{rendered}"),
    }

    Ok(ExitCode::SUCCESS)
}
