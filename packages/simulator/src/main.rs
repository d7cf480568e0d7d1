#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portfolio_simulator::run_blocking;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Replays a script against a page description and prints the final tree
    Run {
        /// JSON5 page description
        #[arg(short, long)]
        page: PathBuf,

        /// JSON5 event script
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Config file; defaults to `PORTFOLIO_CONFIG` or `portfolio.json5` in
        /// the working directory
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip real waiting by auto-advancing a paused clock
        #[arg(long)]
        virtual_time: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    portfolio_logging::init(None)?;

    let args = Args::parse();
    log::debug!("args={args:?}");

    let Commands::Run {
        page,
        script,
        config,
        virtual_time,
    } = args.cmd;

    let config = match config {
        Some(path) => portfolio_config::load_config_file(&path)?,
        None => portfolio_config::load_from_env(&std::env::current_dir()?)?,
    };

    let snapshot = run_blocking(page, script, config, virtual_time)?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
