use std::fs;
use std::io::{self, Read};

use punchclock_core::PunchEvent;

use crate::error::{CliError, CliResult};

/// Read a punch log from a file, or stdin for `-`.
pub fn read_events(path: &str) -> CliResult<Vec<PunchEvent>> {
    let content = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::runtime(format!("Failed to read stdin: {}", e)))?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| CliError::runtime(format!("Failed to open file '{}': {}", path, e)))?
    };

    parse_events(&content)
}

/// Parse a JSON array of events, or one JSON event per line.
pub fn parse_events(content: &str) -> CliResult<Vec<PunchEvent>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| CliError::input(format!("Invalid punch log: {}", e)));
    }

    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line.trim()).map_err(|e| {
                CliError::input(format!("Invalid punch on line {}: {}", index + 1, e))
            })
        })
        .collect()
}
