//! Text ingestion: one process per line as `name arrival burst [priority [queue]]`,
//! whitespace separated, after a discarded header line.

use std::str::FromStr;

use super::job::Job;
use crate::error::SimError;

/// Parse a whole workload file. The first line is a header and is skipped, as
/// are blank lines. `priority` and `queue` may be omitted and then default to
/// 0, which puts the process at the top level of a multilevel queue.
pub fn parse_processes(text: &str) -> Result<Vec<Job>, SimError> {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_record(idx + 1, line))
        .collect()
}

pub fn parse_record(line_no: usize, line: &str) -> Result<Job, SimError> {
    let mut fields = line.split_whitespace();

    let name = fields
        .next()
        .ok_or_else(|| SimError::record_at(line_no, "missing process name"))?;
    let arrival = required(fields.next(), line_no, "arrival")?;
    let burst = required(fields.next(), line_no, "burst")?;
    if burst == 0 {
        return Err(SimError::record_at(line_no, "burst must be positive"));
    }
    let priority = optional(fields.next(), line_no, "priority")?.unwrap_or(0);
    let queue = optional(fields.next(), line_no, "queue")?.unwrap_or(0);

    if let Some(extra) = fields.next() {
        return Err(SimError::record_at(
            line_no,
            format!("unexpected trailing field `{extra}`"),
        ));
    }

    Ok(Job {
        name: name.to_string(),
        arrival,
        burst,
        priority,
        queue,
    })
}

fn required<T: FromStr>(value: Option<&str>, line_no: usize, field: &str) -> Result<T, SimError> {
    optional(value, line_no, field)?
        .ok_or_else(|| SimError::record_at(line_no, format!("missing {field}")))
}

fn optional<T: FromStr>(
    value: Option<&str>,
    line_no: usize,
    field: &str,
) -> Result<Option<T>, SimError> {
    value
        .map(|raw| {
            raw.parse().map_err(|_| {
                SimError::record_at(line_no, format!("{field} `{raw}` is not a valid number"))
            })
        })
        .transpose()
}
