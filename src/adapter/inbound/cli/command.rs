//! Command-line interface definitions.
//!
//! Defines the CLI structure for the surebet application using `clap`.
//! Every analysis command reads a snapshot directory; `monitor` keeps
//! rescanning it on an interval.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Side;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "surebet.toml";

/// Surebet detection and hedge sizing for exchange positions
#[derive(Parser, Debug)]
#[command(name = "surebet")]
#[command(version, about)]
pub struct Cli {
    /// Path to the configuration file [default: surebet.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find hedgeable positions and closed surebets
    Scan(ScanArgs),

    /// List markets already hedged on both sides
    Closed(SnapshotArg),

    /// Rank upcoming markets for new entries
    Prematch(PrematchArgs),

    /// List pending positions
    Positions(SnapshotArg),

    /// List recently settled positions
    History(HistoryArgs),

    /// Show win/loss and P&L statistics
    Stats(SnapshotArg),

    /// Size a covering bet
    #[command(subcommand)]
    Hedge(HedgeCommand),

    /// Rescan on an interval and alert on new opportunities
    Monitor(SnapshotArg),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `surebet hedge`.
#[derive(Subcommand, Debug)]
pub enum HedgeCommand {
    /// Hedge stake and minimum odds for a target ROI.
    Recommend(RecommendArgs),
    /// Choose the order to fill and size the stake.
    Plan(PlanArgs),
}

/// Subcommands for `surebet config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
    /// Write a configuration file with every default spelled out.
    Init(ConfigInitArgs),
}

/// Shared argument for commands that read a snapshot directory.
#[derive(Parser, Debug, Default)]
pub struct SnapshotArg {
    /// Snapshot directory [default: monitor.snapshot_dir]
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

/// Arguments for `scan`.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SnapshotArg,

    /// Minimum ROI in percent [default: arbitrage.min_roi]
    #[arg(long)]
    pub min_roi: Option<f64>,
}

/// Arguments for `prematch`.
#[derive(Parser, Debug)]
pub struct PrematchArgs {
    #[command(flatten)]
    pub source: SnapshotArg,

    /// Target ROI in percent [default: prematch.min_roi]
    #[arg(long)]
    pub min_roi: Option<f64>,

    /// Reference time in epoch seconds [default: now]
    #[arg(long)]
    pub now: Option<i64>,

    /// Maximum entries to show
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

/// Arguments for `history`.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub source: SnapshotArg,

    /// Maximum entries to show
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

/// Arguments for `hedge recommend`.
#[derive(Parser, Debug)]
pub struct RecommendArgs {
    /// Stake already held
    #[arg(long)]
    pub stake: f64,

    /// Decimal odds of the held position
    #[arg(long)]
    pub odds: f64,

    /// Target ROI in percent [default: prematch.min_roi]
    #[arg(long)]
    pub roi: Option<f64>,
}

/// Arguments for `hedge plan`.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SnapshotArg,

    /// Market to hedge on
    #[arg(long)]
    pub market: String,

    /// Side to back with the covering bet
    #[arg(long)]
    pub side: SideArg,

    /// Desired hedge stake
    #[arg(long)]
    pub stake: f64,

    /// Minimum acceptable taker odds
    #[arg(long)]
    pub min_odds: f64,

    /// Wallet balance, when known
    #[arg(long)]
    pub balance: Option<f64>,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Market side on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SideArg {
    One,
    Two,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::One => Side::OutcomeOne,
            SideArg::Two => Side::OutcomeTwo,
        }
    }
}
