use std::process::ExitCode;

use punchclock_core::{MonthlyReport, Profile, format_duration};
use serde::Serialize;

use crate::cli::ReportArgs;
use crate::config::Config;
use crate::days_cmd::format_row;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::{RunContext, parse_month_arg};

#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    staff: &'a Profile,
    tz: String,
    #[serde(flatten)]
    report: MonthlyReport,
}

pub fn run_report(args: ReportArgs, config: &Config, output_format: OutputFormat) -> CliResult<ExitCode> {
    let month = args.month.as_deref().map(parse_month_arg).transpose()?;

    let ctx = RunContext::prepare(&args.common, config)?;
    let aggregation = ctx.snapshot.aggregate(&ctx.options);
    let month = month.unwrap_or(aggregation.reference_date);
    let report = MonthlyReport::build(&aggregation, month, args.fill_gaps);

    match output_format {
        OutputFormat::Json => print_json(&ReportOutput {
            staff: &config.profile,
            tz: ctx.options.tz.to_string(),
            report,
        })?,
        OutputFormat::Text => {
            println!("STAFF WORK REPORT");
            println!("Report Period: {}", report.month);
            println!("Staff: {}", config.profile.name);
            println!("Visa Type: {}", config.profile.visa_type);
            println!();
            println!("Date | Worked | Night (22-05) | Breaks | Overtime");
            for row in &report.rows {
                println!("{}", format_row(row));
            }
            let totals = report.totals;
            println!(
                "TOTAL | {} | {} | {} | {}",
                format_duration(totals.worked_hours),
                format_duration(totals.night_hours),
                format_duration(totals.break_hours),
                format_duration(totals.overtime_hours)
            );
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
