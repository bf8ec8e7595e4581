//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use lift_config::StrategyName;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Config file tried when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "etc/lift_config.toml";

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "lift", version, about = "Elevator dispatch simulator")]
pub struct Cli {
    /// Path to config TOML (default: etc/lift_config.toml if present, else built-in defaults)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scripted passengers CSV (strict header: tick,origin,destination)
    #[arg(long, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Print results and errors as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Event-driven dispatch with a call registry
    #[value(name = "request_queue")]
    RequestQueue,
    /// Per-tick scan over lit floor buttons
    #[value(name = "floor_scan")]
    FloorScan,
}

impl From<StrategyArg> for StrategyName {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::RequestQueue => StrategyName::RequestQueue,
            StrategyArg::FloorScan => StrategyName::FloorScan,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate the building and print a summary
    Run {
        /// Number of ticks to simulate (overrides simulation.ticks)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,
        /// Dispatch strategy (overrides dispatch.strategy)
        #[arg(long, value_enum, value_name = "NAME")]
        strategy: Option<StrategyArg>,
        /// Random arrival seed (overrides simulation.seed)
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },
    /// Validate the config and deliver a short built-in scenario with every strategy
    SelfCheck,
}
