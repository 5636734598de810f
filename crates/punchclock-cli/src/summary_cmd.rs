use std::process::ExitCode;

use chrono::NaiveDate;
use punchclock_core::{LimitStatus, Summary, VisaType, format_duration};
use serde::Serialize;

use crate::cli::SummaryArgs;
use crate::config::Config;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::RunContext;

#[derive(Debug, Serialize)]
struct SummaryOutput {
    reference_date: NaiveDate,
    tz: String,
    #[serde(flatten)]
    summary: Summary,
    weekly_limit: WeeklyLimit,
}

#[derive(Debug, Serialize)]
struct WeeklyLimit {
    visa_type: VisaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_hours: Option<f64>,
    status: LimitStatus,
}

pub fn run_summary(args: SummaryArgs, config: &Config, output_format: OutputFormat) -> CliResult<ExitCode> {
    let ctx = RunContext::prepare(&args.common, config)?;
    let aggregation = ctx.snapshot.aggregate(&ctx.options);
    let summary = aggregation.summary;

    let profile = &config.profile;
    let weekly_limit = WeeklyLimit {
        visa_type: profile.visa_type,
        limit_hours: profile.visa_type.weekly_limit_hours(),
        status: profile.weekly_limit_status(summary.weekly_hours),
    };

    match output_format {
        OutputFormat::Json => print_json(&SummaryOutput {
            reference_date: aggregation.reference_date,
            tz: ctx.options.tz.to_string(),
            summary,
            weekly_limit,
        })?,
        OutputFormat::Text => {
            println!("Date: {} ({})", aggregation.reference_date, ctx.options.tz);
            println!("This week: {}", format_duration(summary.weekly_hours));
            println!("This month: {}", format_duration(summary.monthly_hours));
            println!(
                "Today: {} (morning {}, day {}, night {})",
                format_duration(summary.today.total),
                format_duration(summary.today.morning),
                format_duration(summary.today.day),
                format_duration(summary.today.night)
            );
            match (weekly_limit.limit_hours, weekly_limit.status) {
                (Some(limit), LimitStatus::Exceeded) => println!(
                    "Weekly limit exceeded: {} of {}",
                    format_duration(summary.weekly_hours),
                    format_duration(limit)
                ),
                (Some(limit), LimitStatus::Warning) => println!(
                    "Approaching weekly limit: {} of {}",
                    format_duration(summary.weekly_hours),
                    format_duration(limit)
                ),
                _ => {}
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
