use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use revui_tui::{run_tui, Config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal dashboard for the jj change graph", long_about = None)]
struct Args {
    /// Path to the jj workspace
    #[arg(default_value = ".")]
    path: String,

    /// Revset to display (overrides the config file)
    #[arg(short, long)]
    revset: Option<String>,

    /// Maximum number of revisions per refresh (overrides the config file)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    // Initialize logger
    env_logger::init();
    log::info!("starting revui in {}", args.path);

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(revset) = args.revset {
        config.revset = revset;
    }
    if let Some(limit) = args.limit {
        config.limit = limit;
    }

    // Run TUI
    run_tui(&args.path, config)?;

    Ok(())
}
