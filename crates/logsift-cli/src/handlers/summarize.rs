use crate::handlers;
use crate::rules;
use crate::types::OutputFormat;
use anyhow::Result;
use chrono::TimeDelta;
use logsift_engine::{Classifier, SummarySink};
use std::io;
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn handle(
    file: &Path,
    rules_file: &Path,
    journald: bool,
    before: Option<&str>,
    after: Option<&str>,
    interval: TimeDelta,
    ignore: Vec<String>,
    max_unmatched: usize,
    output: OutputFormat,
) -> Result<()> {
    let rules = rules::load(rules_file)?;
    let window = handlers::parse_window(before, after)?;
    let classifier = Classifier::new(rules, window)?;

    let mut sink = SummarySink::new(
        io::stdout().lock(),
        interval,
        output.into(),
        ignore,
        max_unmatched,
    );
    classifier.run(file, handlers::dialect(journald), &mut sink)?;
    Ok(())
}
