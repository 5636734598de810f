use std::process::ExitCode;

use punchclock_core::format_duration;

use crate::cli::StatusArgs;
use crate::config::Config;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::RunContext;

pub fn run_status(args: StatusArgs, config: &Config, output_format: OutputFormat) -> CliResult<ExitCode> {
    let ctx = RunContext::prepare(&args.common, config)?;
    let report = ctx.snapshot.status();

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("Status: {}", report.status);
            if let Some(last) = &report.last_punch {
                println!("Last punch: {} at {}", last.kind, ctx.format_local(last.timestamp_ms));
            }
            if let Some(shift) = &report.open_shift {
                println!("Shift started: {}", ctx.format_local(shift.start_ms));
                println!("Worked so far: {}", format_duration(report.worked_hours_so_far));
            }
            let next: Vec<&str> = report.allowed_punches().iter().map(|k| k.as_str()).collect();
            println!("Next: {}", next.join(", "));
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
