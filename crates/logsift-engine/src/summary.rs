use crate::classify::EntrySink;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use logsift_types::{Entry, Rule};
use std::collections::HashMap;
use std::io::Write;

/// Output encoding for flushed buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Timestamp header plus indented `id: count` lines
    Text,
    /// One JSON object per bucket
    Json,
}

/// Aggregates verdicts into fixed-duration time buckets keyed by the
/// truncated entry timestamp.
///
/// A bucket is flushed when a structured entry's truncated timestamp
/// differs from the current key, and once more at end of stream; flushed
/// counts are never touched again. Entries without a `time` field never
/// trigger rollover.
pub struct SummarySink<W: Write> {
    out: W,
    bucket_size: TimeDelta,
    format: SummaryFormat,
    ignore: Vec<String>,
    max_unmatched: usize,
    current: Option<DateTime<Utc>>,
    counts: HashMap<String, u64>,
    unmatched: u64,
}

impl<W: Write> SummarySink<W> {
    pub fn new(
        out: W,
        bucket_size: TimeDelta,
        format: SummaryFormat,
        ignore: Vec<String>,
        max_unmatched: usize,
    ) -> Self {
        Self {
            out,
            bucket_size,
            format,
            ignore,
            max_unmatched,
            current: None,
            counts: HashMap::new(),
            unmatched: 0,
        }
    }

    fn flush(&mut self) -> Result<()> {
        let Some(bucket) = self.current else {
            return Ok(());
        };
        let mut ids: Vec<&String> = self
            .counts
            .keys()
            .filter(|id| !self.ignore.contains(*id))
            .collect();
        ids.sort();
        if ids.is_empty() && self.unmatched == 0 {
            return Ok(());
        }
        let timestamp = bucket.to_rfc3339_opts(SecondsFormat::Secs, true);
        match self.format {
            SummaryFormat::Text => {
                writeln!(self.out, "{}", timestamp)?;
                writeln!(self.out, "---------------------------------------------------")?;
                for id in ids {
                    writeln!(self.out, "    {}: {}", id, self.counts[id])?;
                }
                if self.unmatched > 0 {
                    writeln!(self.out, "    unmatched: {}", self.unmatched)?;
                }
                writeln!(self.out)?;
            }
            SummaryFormat::Json => {
                let mut record = serde_json::Map::new();
                record.insert("timestamp".to_string(), timestamp.into());
                for id in ids {
                    record.insert(id.clone(), self.counts[id].into());
                }
                if self.unmatched > 0 {
                    record.insert("unmatched".to_string(), self.unmatched.into());
                }
                writeln!(self.out, "{}", serde_json::Value::Object(record))?;
            }
        }
        Ok(())
    }
}

fn truncate(t: DateTime<Utc>, size: TimeDelta) -> DateTime<Utc> {
    let step = size.num_seconds().max(1);
    let rem = t.timestamp().rem_euclid(step);
    t - TimeDelta::seconds(rem) - TimeDelta::nanoseconds(t.timestamp_subsec_nanos() as i64)
}

impl<W: Write> EntrySink for SummarySink<W> {
    fn on_line(&mut self, entry: &mut Entry) -> Result<()> {
        if !entry.is_structured() {
            return Ok(());
        }
        let Some(t) = entry.timestamp()? else {
            return Ok(());
        };
        let bucket = truncate(t, self.bucket_size);
        if self.current != Some(bucket) {
            if self.current.is_some() {
                self.flush()?;
            }
            self.current = Some(bucket);
            self.counts.clear();
            self.unmatched = 0;
        }
        Ok(())
    }

    fn on_match(&mut self, _entry: &mut Entry, rule: &Rule) -> Result<()> {
        *self.counts.entry(rule.id.clone()).or_insert(0) += 1;
        Ok(())
    }

    fn on_unmatched(&mut self, entry: &mut Entry) -> Result<()> {
        // Non-JSON passthrough units stay out of the unmatched counter.
        if !entry.is_structured() {
            return Ok(());
        }
        self.unmatched += 1;
        if self.unmatched <= self.max_unmatched as u64 && self.format == SummaryFormat::Text {
            writeln!(self.out, "WARN: unmatched line: {}\n", entry.raw())?;
        }
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        self.flush()
    }
}
