//! signrank CLI: signed trust propagation over a relationship snapshot.
//!
//! Usage:
//!   signrank rank --snapshot path [--config path] [--good id]... [--bad id]...
//!   signrank config

use clap::{Parser, Subcommand};
use signrank::{rank_snapshot, RankConfig};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "signrank",
    version,
    about = "Signed trust/distrust propagation over follow and block graphs"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every participant of a snapshot
    Rank(RankArgs),
    /// Print the effective configuration as YAML
    Config {
        /// Path to a YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct RankArgs {
    /// Relationship snapshot (comma-separated, one relationship per row)
    #[arg(long)]
    snapshot: PathBuf,
    /// Path to a YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Identifier of a trusted seed (repeatable)
    #[arg(long = "good")]
    good: Vec<String>,
    /// Identifier of a distrusted seed (repeatable)
    #[arg(long = "bad")]
    bad: Vec<String>,
    /// Number of power iterations
    #[arg(long)]
    iterations: Option<usize>,
    /// Damping factor, strictly between 0 and 1
    #[arg(long)]
    damping: Option<f64>,
    /// Stop early once the L1 change per iteration drops below this
    #[arg(long)]
    tolerance: Option<f64>,
    /// Spread each iteration across all cores
    #[arg(long)]
    parallel: bool,
    /// Number of lowest-ranked nodes to show
    #[arg(long)]
    lowest: Option<usize>,
    /// Number of highest-ranked nodes to show
    #[arg(long)]
    highest: Option<usize>,
    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<RankConfig, String> {
    RankConfig::discover(path).map_err(|e| e.to_string())
}

/// Layer command-line flags over the file configuration
fn apply_overrides(config: &mut RankConfig, args: &RankArgs) {
    config.seeds.good.extend(args.good.iter().cloned());
    config.seeds.bad.extend(args.bad.iter().cloned());
    if let Some(iterations) = args.iterations {
        config.propagation.iterations = iterations;
    }
    if let Some(damping) = args.damping {
        config.propagation.damping = damping;
    }
    if let Some(tolerance) = args.tolerance {
        config.propagation.tolerance = Some(tolerance);
    }
    if args.parallel {
        config.propagation.parallel = true;
    }
    if let Some(lowest) = args.lowest {
        config.report.lowest = lowest;
    }
    if let Some(highest) = args.highest {
        config.report.highest = highest;
    }
}

fn cmd_rank(args: RankArgs) -> i32 {
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    apply_overrides(&mut config, &args);

    let run = match rank_snapshot(&args.snapshot, &config, None) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let report = run.report(&config);
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else {
        println!(
            "Loaded {} rows ({} follows, {} blocks, {} skipped)",
            run.stats.rows, run.stats.follows, run.stats.blocks, run.stats.skipped
        );
        print!("{}", report);
    }
    0
}

fn cmd_config(path: Option<PathBuf>) -> i32 {
    let config = match load_config(path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match serde_yaml::to_string(&config) {
        Ok(yaml) => {
            print!("{}", yaml);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let code = match cli.command {
        Commands::Rank(args) => cmd_rank(args),
        Commands::Config { config } => cmd_config(config),
    };
    std::process::exit(code);
}
