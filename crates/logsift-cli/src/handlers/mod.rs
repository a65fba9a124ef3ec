pub mod categories;
pub mod filter;
pub mod summarize;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use logsift_engine::Dialect;
use logsift_types::Matcher;

/// Build the inclusion window from the optional `--before`/`--after`
/// bounds. Invalid bounds are configuration errors raised before any scan.
pub(crate) fn parse_window(before: Option<&str>, after: Option<&str>) -> Result<Matcher> {
    Ok(Matcher::window(
        parse_bound(before, "before")?,
        parse_bound(after, "after")?,
    ))
}

fn parse_bound(value: Option<&str>, name: &str) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let parsed = DateTime::parse_from_rfc3339(raw).map_err(|_| {
        anyhow!(
            "invalid {} time argument '{}', expected RFC-3339 format",
            name,
            raw
        )
    })?;
    Ok(Some(parsed.with_timezone(&Utc)))
}

pub(crate) fn dialect(journald: bool) -> Dialect {
    if journald {
        Dialect::Journald
    } else {
        Dialect::Plain
    }
}
