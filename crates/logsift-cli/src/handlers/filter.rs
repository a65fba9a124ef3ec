use crate::handlers;
use crate::rules;
use anyhow::Result;
use logsift_engine::{Classifier, FilterSink};
use std::io;
use std::path::Path;

pub fn handle(
    file: &Path,
    rules_file: &Path,
    journald: bool,
    before: Option<&str>,
    after: Option<&str>,
    include: Vec<String>,
    max_unmatched: usize,
) -> Result<()> {
    let rules = rules::load(rules_file)?;
    let window = handlers::parse_window(before, after)?;
    let classifier = Classifier::new(rules, window)?;

    let mut sink = FilterSink::new(io::stdout().lock(), include, max_unmatched);
    classifier.run(file, handlers::dialect(journald), &mut sink)?;
    Ok(())
}
