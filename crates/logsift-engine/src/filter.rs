use crate::classify::EntrySink;
use crate::error::Result;
use logsift_types::{Entry, Rule};
use std::io::Write;

/// Emits the raw text of entries matching an allow-listed rule, plus a
/// capped number of unmatched-line warnings. No aggregation.
pub struct FilterSink<W: Write> {
    out: W,
    include: Vec<String>,
    max_unmatched: usize,
    unmatched: usize,
}

impl<W: Write> FilterSink<W> {
    pub fn new(out: W, include: Vec<String>, max_unmatched: usize) -> Self {
        Self {
            out,
            include,
            max_unmatched,
            unmatched: 0,
        }
    }
}

impl<W: Write> EntrySink for FilterSink<W> {
    fn on_line(&mut self, _entry: &mut Entry) -> Result<()> {
        Ok(())
    }

    fn on_match(&mut self, entry: &mut Entry, rule: &Rule) -> Result<()> {
        // Matches outside the allow-list are dropped, not warned about.
        if self.include.iter().any(|id| *id == rule.id) {
            writeln!(self.out, "{}", entry.raw())?;
        }
        Ok(())
    }

    fn on_unmatched(&mut self, entry: &mut Entry) -> Result<()> {
        self.unmatched += 1;
        if self.unmatched <= self.max_unmatched {
            writeln!(self.out, "WARN: unmatched line: {}\n", entry.raw())?;
        }
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_types::Matcher;

    fn entry(raw: &str) -> Entry {
        Entry::text(raw.to_string(), None)
    }

    fn rule(id: &str) -> Rule {
        Rule::new(id, "", Matcher::always())
    }

    #[test]
    fn test_allow_listed_match_is_echoed() {
        let mut sink = FilterSink::new(Vec::new(), vec!["HELLO".to_string()], 1);
        sink.on_match(&mut entry("the raw line"), &rule("HELLO")).unwrap();
        assert_eq!(String::from_utf8(sink.out).unwrap(), "the raw line\n");
    }

    #[test]
    fn test_match_outside_allow_list_is_dropped() {
        let mut sink = FilterSink::new(Vec::new(), vec!["HELLO".to_string()], 1);
        sink.on_match(&mut entry("noise"), &rule("OTHER")).unwrap();
        assert!(sink.out.is_empty());
    }

    #[test]
    fn test_empty_allow_list_emits_nothing() {
        let mut sink = FilterSink::new(Vec::new(), Vec::new(), 1);
        sink.on_match(&mut entry("line"), &rule("HELLO")).unwrap();
        assert!(sink.out.is_empty());
    }

    #[test]
    fn test_unmatched_warnings_are_capped() {
        let mut sink = FilterSink::new(Vec::new(), Vec::new(), 2);
        sink.on_unmatched(&mut entry("one")).unwrap();
        sink.on_unmatched(&mut entry("two")).unwrap();
        sink.on_unmatched(&mut entry("three")).unwrap();
        let output = String::from_utf8(sink.out).unwrap();
        assert_eq!(
            output,
            "WARN: unmatched line: one\n\nWARN: unmatched line: two\n\n"
        );
    }
}
