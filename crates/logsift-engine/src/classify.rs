use crate::error::Result;
use crate::scan::{self, Dialect, LineCursor};
use logsift_types::{Entry, Matcher, Rule, validate_rules};
use std::io::BufRead;
use std::mem;
use std::path::Path;

/// Receiver for classification verdicts.
///
/// `on_line` fires once per physical line before the inclusion window is
/// applied; the remaining callbacks fire per logical unit (a structured
/// entry, a systemd marker line, or a finalized non-JSON block).
pub trait EntrySink {
    fn on_line(&mut self, entry: &mut Entry) -> Result<()>;
    fn on_match(&mut self, entry: &mut Entry, rule: &Rule) -> Result<()>;
    fn on_unmatched(&mut self, entry: &mut Entry) -> Result<()>;
    fn on_end(&mut self) -> Result<()>;
}

/// An ordered rule table plus the inclusion time window, driving one scan
/// at a time.
///
/// The table is read-only after construction; first satisfied rule wins.
pub struct Classifier {
    rules: Vec<Rule>,
    include: Matcher,
}

impl Classifier {
    /// Build a classifier, rejecting rule tables with duplicate ids.
    pub fn new(rules: Vec<Rule>, include: Matcher) -> Result<Self> {
        validate_rules(&rules)?;
        Ok(Self { rules, include })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Scan `path` start to end, feeding verdicts to `sink`. Consecutive
    /// non-JSON lines are coalesced into one block and classified as a
    /// unit when a structured or systemd line (or end of stream) closes
    /// the run.
    pub fn run<S: EntrySink>(&self, path: &Path, dialect: Dialect, sink: &mut S) -> Result<()> {
        let mut block = String::new();
        scan::scan_file(path, dialect, |cursor| self.step(cursor, &mut block, sink))
    }

    /// Reader-driven variant of [`Classifier::run`]; `path` is used only
    /// for error context.
    pub fn run_reader<R: BufRead, S: EntrySink>(
        &self,
        path: &Path,
        reader: R,
        dialect: Dialect,
        sink: &mut S,
    ) -> Result<()> {
        let mut block = String::new();
        scan::scan_reader(path, reader, dialect, |cursor| {
            self.step(cursor, &mut block, sink)
        })
    }

    fn step<S: EntrySink>(
        &self,
        cursor: &LineCursor,
        block: &mut String,
        sink: &mut S,
    ) -> Result<()> {
        if cursor.is_eof() {
            self.flush_block(cursor, block, sink)?;
            return sink.on_end();
        }

        let mut entry = parse_entry(cursor)?;
        sink.on_line(&mut entry)?;
        if !self.include.matches(&mut entry)? {
            return Ok(());
        }

        if entry.is_structured() || entry.is_systemd() {
            self.flush_block(cursor, block, sink)?;
            self.classify(&mut entry, sink)
        } else {
            block.push_str(entry.raw());
            block.push('\n');
            Ok(())
        }
    }

    fn flush_block<S: EntrySink>(
        &self,
        cursor: &LineCursor,
        block: &mut String,
        sink: &mut S,
    ) -> Result<()> {
        if block.is_empty() {
            return Ok(());
        }
        let mut entry = Entry::block(
            mem::take(block),
            cursor.journald_timestamp().map(String::from),
        );
        self.classify(&mut entry, sink)
    }

    fn classify<S: EntrySink>(&self, entry: &mut Entry, sink: &mut S) -> Result<()> {
        for rule in &self.rules {
            if rule.matcher.matches(entry)? {
                return sink.on_match(entry, rule);
            }
        }
        sink.on_unmatched(entry)
    }
}

fn parse_entry(cursor: &LineCursor) -> Result<Entry> {
    let timestamp = cursor.journald_timestamp().map(String::from);
    let trimmed = cursor.line().trim_start();
    if trimmed.starts_with('{') {
        let fields: serde_json::Value = serde_json::from_str(trimmed)?;
        return Ok(Entry::structured(fields, cursor.line().to_string(), timestamp));
    }
    if cursor.process() == Some("systemd") {
        return Ok(Entry::systemd(cursor.line().to_string(), timestamp));
    }
    Ok(Entry::text(cursor.line().to_string(), timestamp))
}
