use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod days_cmd;
mod error;
mod log_file;
mod report_cmd;
mod shared;
mod shifts_cmd;
mod status_cmd;
mod summary_cmd;

use cli::{Cli, Commands};
use config::Config;
use days_cmd::run_days;
use error::{CliError, output_format_hint, parse_output_format, render_error};
use report_cmd::run_report;
use shifts_cmd::run_shifts;
use status_cmd::run_status;
use summary_cmd::run_summary;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(?cli, "parsed CLI args");

    let requested = &cli.command.common().output_format;
    let fallback = output_format_hint(requested);
    let output_format = match parse_output_format(requested) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return render_error(&CliError::runtime(format!("{err:#}")), output_format),
    };

    let result = match cli.command {
        Commands::Summary(args) => run_summary(args, &config, output_format),
        Commands::Days(args) => run_days(args, &config, output_format),
        Commands::Report(args) => run_report(args, &config, output_format),
        Commands::Status(args) => run_status(args, &config, output_format),
        Commands::Shifts(args) => run_shifts(args, &config, output_format),
    };

    match result {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}
