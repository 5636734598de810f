use chrono_tz::Tz;
use punchclock_core::parse::{parse_date, parse_month, parse_timestamp_auto};
use punchclock_core::{AggregateOptions, Clock, FixedClock, Snapshot, SortOrder, SystemClock};

use crate::cli::CommonArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::log_file::read_events;

pub fn parse_tz_or_input_error(name: &str) -> CliResult<Tz> {
    punchclock_core::tz::parse_tz(name)
        .map_err(|e| CliError::input(format!("Invalid timezone '{}': {}", name, e)))
}

pub fn parse_order(s: &str) -> CliResult<SortOrder> {
    s.parse::<SortOrder>()
        .map_err(|_| CliError::input(format!("Invalid order '{}'. Expected: asc, desc", s)))
}

pub fn parse_date_arg(name: &str, s: &str) -> CliResult<chrono::NaiveDate> {
    parse_date(s).map_err(|e| CliError::input(format!("Invalid {}: {}", name, e)))
}

pub fn parse_month_arg(s: &str) -> CliResult<chrono::NaiveDate> {
    parse_month(s).map_err(|e| CliError::input(format!("Invalid month: {}", e)))
}

/// The clock a command runs against: `--now` if given, else the wall clock.
pub fn clock_from_arg(now: Option<&str>) -> CliResult<Box<dyn Clock>> {
    match now {
        Some(s) => {
            let instant = parse_timestamp_auto(s)
                .map_err(|e| CliError::input(format!("Invalid --now '{}': {}", s, e)))?;
            Ok(Box::new(FixedClock(instant.timestamp_millis())))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

/// Everything a command needs: the log snapshot and how to aggregate it.
pub struct RunContext {
    pub snapshot: Snapshot,
    pub options: AggregateOptions,
}

impl RunContext {
    pub fn prepare(common: &CommonArgs, config: &Config) -> CliResult<Self> {
        let options = config.aggregate_options(common.tz.as_deref())?;
        let clock = clock_from_arg(common.now.as_deref())?;
        let events = read_events(&common.log)?;
        let snapshot = Snapshot::take(&events, clock.as_ref());

        tracing::debug!(
            events = snapshot.events.len(),
            now_ms = snapshot.taken_at_ms,
            tz = %options.tz,
            "prepared snapshot"
        );

        Ok(Self { snapshot, options })
    }

    pub fn format_local(&self, ms: i64) -> String {
        punchclock_core::tz::format_local(ms, self.options.tz)
    }
}
