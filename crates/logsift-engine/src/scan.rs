use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// The line-prefix convention of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Bare JSON-lines: each line is consumed as-is.
    Plain,
    /// journald output: a preamble banner, then lines prefixed with
    /// `Mon DD HH:MM:SS hostname process[pid]: `.
    Journald,
}

const JOURNALD_PREAMBLE: &str = "-- Logs begin at";

// "Mon DD HH:MM:SS" plus the following space.
const TIMESTAMP_LEN: usize = 15;
const PREFIX_LEN: usize = TIMESTAMP_LEN + 1;

/// Mutable per-line cursor state for one scan.
///
/// Exactly one cursor exists per scan; it is advanced in place and passed
/// by reference to the scan callback once per physical line, plus exactly
/// once with [`LineCursor::is_eof`] set after the last line.
#[derive(Debug)]
pub struct LineCursor {
    path: PathBuf,
    line_number: usize,
    line: String,
    eof: bool,
    process: Option<String>,
    journald_timestamp: Option<String>,
}

impl LineCursor {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            line_number: 0,
            line: String::new(),
            eof: false,
            process: None,
            journald_timestamp: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 0-based index of the current physical line. Every physical line
    /// counts, including a discarded journald preamble banner.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The current line, after journald prefix stripping when that dialect
    /// is active.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// The process name extracted from the journald prefix, `journald` for
    /// dashed continuation lines, `None` in the plain dialect.
    pub fn process(&self) -> Option<&str> {
        self.process.as_deref()
    }

    /// The most recently seen journald timestamp substring. Dashed lines
    /// carry none of their own, so the previous value persists across them.
    pub fn journald_timestamp(&self) -> Option<&str> {
        self.journald_timestamp.as_deref()
    }

    fn parse_journald(&mut self) {
        let line = std::mem::take(&mut self.line);
        if line.starts_with('-') {
            self.process = Some("journald".to_string());
            self.line = line;
            return;
        }
        self.journald_timestamp = Some(line[..TIMESTAMP_LEN].to_string());
        let rest = &line[PREFIX_LEN..];
        let (_, rest) = split_first(rest, ' ');
        let (process, message) = split_first(rest, ':');
        let process = process.split_once('[').map(|(p, _)| p).unwrap_or(process);
        self.process = Some(process.to_string());
        self.line = message.to_string();
    }
}

/// Split on the first occurrence of `c`: `(before, after)`, where `before`
/// is empty when the separator is absent.
fn split_first(s: &str, c: char) -> (&str, &str) {
    match s.find(c) {
        Some(i) => (&s[..i], &s[i + c.len_utf8()..]),
        None => ("", s),
    }
}

/// Scan a file line by line, invoking `callback` once per delivered line
/// and once more at end of stream.
///
/// Errors returned by the callback abort the scan immediately, wrapped
/// with the file path and 0-based line number.
///
/// # Panics
///
/// With [`Dialect::Journald`], a non-dashed line shorter than the
/// `Mon DD HH:MM:SS ` prefix violates the caller's contract to supply
/// journald-formatted input and panics.
pub fn scan_file<F>(path: &Path, dialect: Dialect, callback: F) -> Result<()>
where
    F: FnMut(&LineCursor) -> Result<()>,
{
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    scan_reader(path, BufReader::new(file), dialect, callback)
}

/// Reader-driven variant of [`scan_file`]; `path` is used only for error
/// context.
pub fn scan_reader<R, F>(path: &Path, reader: R, dialect: Dialect, mut callback: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&LineCursor) -> Result<()>,
{
    let mut cursor = LineCursor::new(path);
    for line in reader.lines() {
        cursor.line = line?;
        cursor.process = None;
        let skip_preamble = dialect == Dialect::Journald
            && cursor.line_number == 0
            && cursor.line.starts_with(JOURNALD_PREAMBLE);
        if !skip_preamble {
            if dialect == Dialect::Journald {
                cursor.parse_journald();
            }
            callback(&cursor).map_err(|e| Error::at_line(path, cursor.line_number, e))?;
        }
        cursor.line_number += 1;
    }
    cursor.eof = true;
    callback(&cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str, dialect: Dialect) -> Vec<(usize, String, Option<String>, Option<String>)> {
        let mut seen = Vec::new();
        scan_reader(Path::new("test.log"), Cursor::new(input), dialect, |cursor| {
            if !cursor.is_eof() {
                seen.push((
                    cursor.line_number(),
                    cursor.line().to_string(),
                    cursor.process().map(String::from),
                    cursor.journald_timestamp().map(String::from),
                ));
            }
            Ok(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn test_plain_dialect_delivers_lines_untouched() {
        let seen = collect("{\"a\":1}\nplain text\n", Dialect::Plain);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (0, "{\"a\":1}".to_string(), None, None));
        assert_eq!(seen[1], (1, "plain text".to_string(), None, None));
    }

    #[test]
    fn test_journald_prefix_is_stripped() {
        let input = "Jan 02 15:04:05 myhost edge-proxy[1234]: {\"msg\":\"hi\"}\n";
        let seen = collect(input, Dialect::Journald);
        assert_eq!(seen.len(), 1);
        let (number, line, process, timestamp) = &seen[0];
        assert_eq!(*number, 0);
        assert_eq!(line, " {\"msg\":\"hi\"}");
        assert_eq!(process.as_deref(), Some("edge-proxy"));
        assert_eq!(timestamp.as_deref(), Some("Jan 02 15:04:05"));
    }

    #[test]
    fn test_journald_process_without_pid_suffix() {
        let input = "Jan 02 15:04:05 myhost kernel: something happened\n";
        let seen = collect(input, Dialect::Journald);
        assert_eq!(seen[0].2.as_deref(), Some("kernel"));
        assert_eq!(seen[0].1, " something happened");
    }

    #[test]
    fn test_journald_dashed_line() {
        let input = "Jan 02 15:04:05 myhost app[1]: start\n-- Reboot --\n";
        let seen = collect(input, Dialect::Journald);
        assert_eq!(seen[1].2.as_deref(), Some("journald"));
        assert_eq!(seen[1].1, "-- Reboot --");
        // The previous timestamp persists across dashed lines.
        assert_eq!(seen[1].3.as_deref(), Some("Jan 02 15:04:05"));
    }

    #[test]
    fn test_preamble_is_discarded_but_counted() {
        let input = "-- Logs begin at Tue 2024-01-02 15:04:05 UTC. --\nJan 02 15:04:06 host app[1]: hello\n";
        let seen = collect(input, Dialect::Journald);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[0].1, " hello");
    }

    #[test]
    fn test_non_banner_first_line_is_delivered() {
        let input = "Jan 02 15:04:05 host app[1]: first\n";
        let seen = collect(input, Dialect::Journald);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, 0);
        assert_eq!(seen[0].1, " first");
    }

    #[test]
    fn test_eof_is_delivered_exactly_once() {
        let mut eof_count = 0;
        let mut lines = 0;
        scan_reader(
            Path::new("test.log"),
            Cursor::new("one\ntwo\n"),
            Dialect::Plain,
            |cursor| {
                if cursor.is_eof() {
                    eof_count += 1;
                    assert_eq!(cursor.line_number(), 2);
                } else {
                    lines += 1;
                }
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(lines, 2);
        assert_eq!(eof_count, 1);
    }

    #[test]
    fn test_callback_error_is_wrapped_with_line_context() {
        let err = scan_reader(
            Path::new("some.log"),
            Cursor::new("a\nb\n"),
            Dialect::Plain,
            |cursor| {
                if cursor.is_eof() {
                    return Ok(());
                }
                if cursor.line() == "b" {
                    Err(Error::Field(logsift_types::Error::Timestamp(
                        "boom".to_string(),
                    )))
                } else {
                    Ok(())
                }
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "error parsing some.log on line 1: boom");
    }

    #[test]
    fn test_split_first() {
        assert_eq!(split_first("a:b:c", ':'), ("a", "b:c"));
        assert_eq!(split_first("abc", ':'), ("", "abc"));
        assert_eq!(split_first("abc:", ':'), ("abc", ""));
    }
}
