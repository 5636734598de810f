use std::process::ExitCode;

use punchclock_core::{DayBucket, format_duration};

use crate::cli::DaysArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::{RunContext, parse_date_arg, parse_order};

pub fn run_days(args: DaysArgs, config: &Config, output_format: OutputFormat) -> CliResult<ExitCode> {
    let order = parse_order(&args.order)?;
    let from = args.from.as_deref().map(|s| parse_date_arg("from", s)).transpose()?;
    let to = args.to.as_deref().map(|s| parse_date_arg("to", s)).transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(CliError::input(format!(
                "Invalid range: from '{}' must not be after to '{}'",
                from, to
            )));
        }
    }

    let ctx = RunContext::prepare(&args.common, config)?;
    let aggregation = ctx.snapshot.aggregate(&ctx.options);

    let buckets = match (from, to) {
        (None, None) => aggregation.day_buckets(order),
        (from, to) => aggregation.buckets_in_range(
            from.unwrap_or(chrono::NaiveDate::MIN),
            to.unwrap_or(chrono::NaiveDate::MAX),
            order,
        ),
    };

    match output_format {
        OutputFormat::Json => print_json(&buckets)?,
        OutputFormat::Text => {
            for bucket in &buckets {
                println!("{}", format_row(bucket));
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

pub fn format_row(bucket: &DayBucket) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        bucket.key(),
        format_duration(bucket.worked_hours),
        format_duration(bucket.night_hours),
        format_duration(bucket.break_hours),
        format_duration(bucket.overtime_hours)
    )
}
