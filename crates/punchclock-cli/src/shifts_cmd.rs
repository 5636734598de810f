use std::process::ExitCode;

use punchclock_core::interval::{break_spans, worked_spans};
use punchclock_core::models::MS_PER_HOUR;
use punchclock_core::{Shift, format_duration};

use crate::cli::ShiftsArgs;
use crate::config::Config;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::RunContext;

pub fn run_shifts(args: ShiftsArgs, config: &Config, output_format: OutputFormat) -> CliResult<ExitCode> {
    let ctx = RunContext::prepare(&args.common, config)?;
    let shifts = ctx.snapshot.shifts();

    match output_format {
        OutputFormat::Json => print_json(&shifts)?,
        OutputFormat::Text => {
            for shift in &shifts {
                println!("{}", describe(&ctx, shift));
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn total_hours(spans: &[punchclock_core::interval::Span]) -> f64 {
    let total_ms = spans
        .iter()
        .fold(0i64, |total, span| total.saturating_add(span.duration_ms()));
    total_ms as f64 / MS_PER_HOUR as f64
}

fn describe(ctx: &RunContext, shift: &Shift) -> String {
    let end_ms = shift.end_ms.unwrap_or(ctx.snapshot.taken_at_ms);
    format!(
        "{} -> {} | worked {} | breaks {} ({})",
        ctx.format_local(shift.start_ms),
        ctx.format_local(end_ms),
        format_duration(total_hours(&worked_spans(shift, end_ms))),
        format_duration(total_hours(&break_spans(shift, end_ms))),
        shift.breaks.len()
    )
}
