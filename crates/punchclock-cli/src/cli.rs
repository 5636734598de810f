use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Work shift statistics from a punch-clock log
#[derive(Parser, Debug)]
#[command(name = "punchclock")]
#[command(version, about = "Work shift statistics from a punch-clock log")]
pub struct Cli {
    /// Configuration file (TOML), merged over the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Weekly, monthly and today totals
    Summary(SummaryArgs),
    /// Per-day worked, night, break and overtime hours
    Days(DaysArgs),
    /// Monthly report table with totals
    Report(ReportArgs),
    /// Current clock status from the latest punch
    Status(StatusArgs),
    /// Closed shifts rebuilt from the log
    Shifts(ShiftsArgs),
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Summary(args) => &args.common,
            Commands::Days(args) => &args.common,
            Commands::Report(args) => &args.common,
            Commands::Status(args) => &args.common,
            Commands::Shifts(args) => &args.common,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Punch log: JSON array or one JSON event per line (use - for stdin)
    #[arg(short, long, default_value = "-")]
    pub log: String,

    /// Reference IANA timezone (overrides config, e.g. Asia/Tokyo)
    #[arg(short, long)]
    pub tz: Option<String>,

    /// Reference time: epoch_ms, epoch_s or rfc3339 (default: now)
    #[arg(long)]
    pub now: Option<String>,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(clap::Args, Debug)]
pub struct DaysArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Date order: asc, desc
    #[arg(long, default_value = "asc")]
    pub order: String,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Month to report (YYYY-MM, default: month of the reference time)
    #[arg(long)]
    pub month: Option<String>,

    /// Emit a zero row for days without activity
    #[arg(long)]
    pub fill_gaps: bool,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShiftsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}
