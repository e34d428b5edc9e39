//! Argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use paycomp_core::analysis::SweepTarget;
use paycomp_core::model::{PayMode, Role};
use paycomp_core::optimization::DEFAULT_THRESHOLD_STEP;

#[derive(Parser, Debug)]
#[command(name = "paycomp")]
#[command(about = "Compare store pay schemes and their effect on store profit")]
pub struct Cli {
    /// Parameter file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Write the report to this file, or to a timestamped file inside this
    /// directory, instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Path to the data directory (default: ~/.paycomp/)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write the default parameter file
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Salary breakdown for one mode and role
    Calc(Selection),
    /// Rank every pay mode for one role
    Compare {
        #[arg(short, long, value_parser = parse_role)]
        role: Option<Role>,
    },
    /// Store profit and loss
    Store {
        #[arg(short, long, value_parser = parse_mode, conflicts_with = "all")]
        mode: Option<PayMode>,
        /// One report per pay mode
        #[arg(long)]
        all: bool,
    },
    /// Vary one input across a range
    Sweep {
        #[arg(short, long, value_parser = parse_target)]
        target: SweepTarget,
        #[arg(long)]
        min: f64,
        #[arg(long)]
        max: f64,
        #[arg(long, default_value_t = 11)]
        steps: usize,
    },
    /// Suggest package thresholds for the tiered commission
    Suggest {
        #[arg(short, long, value_parser = parse_mode, default_value = "new_mid")]
        mode: PayMode,
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD_STEP)]
        step: i64,
    },
}

/// Mode and role overrides for a single salary
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Selection {
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<PayMode>,
    #[arg(short, long, value_parser = parse_role)]
    pub role: Option<Role>,
}

impl Command {
    /// Subcommand name, used in logs and generated file names
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init { .. } => "init",
            Command::Calc(_) => "calc",
            Command::Compare { .. } => "compare",
            Command::Store { .. } => "store",
            Command::Sweep { .. } => "sweep",
            Command::Suggest { .. } => "suggest",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

fn parse_mode(s: &str) -> Result<PayMode, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_target(s: &str) -> Result<SweepTarget, String> {
    s.parse().map_err(|e| format!("{e}"))
}
