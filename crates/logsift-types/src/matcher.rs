use crate::entry::Entry;
use crate::error::Result;
use chrono::{DateTime, Utc};
use regex::Regex;

/// A composable predicate over an [`Entry`].
///
/// Matchers are built once, when the rule table is constructed, and carry
/// no per-evaluation state; the same tree is reused across every entry of
/// a scan. Composite variants hold ordered children and evaluate them
/// left-to-right with short-circuiting.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Field value equals the given string
    FieldEquals { field: String, value: String },
    /// Field value starts with the given prefix
    FieldStartsWith { field: String, prefix: String },
    /// Field value contains the given substring
    FieldContains { field: String, substring: String },
    /// Field value matches a regex compiled at construction time
    FieldRegex { field: String, regex: Regex },
    /// All children match
    All(Vec<Matcher>),
    /// Any child matches
    Any(Vec<Matcher>),
    /// Matches every entry
    Always,
    /// Entry timestamp falls inside an open or closed interval
    TimeRange {
        before: Option<DateTime<Utc>>,
        after: Option<DateTime<Utc>>,
    },
}

impl Matcher {
    pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Matcher::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field_starts_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Matcher::FieldStartsWith {
            field: field.into(),
            prefix: prefix.into(),
        }
    }

    pub fn field_contains(field: impl Into<String>, substring: impl Into<String>) -> Self {
        Matcher::FieldContains {
            field: field.into(),
            substring: substring.into(),
        }
    }

    /// Compile a regex matcher. Pattern errors surface here, at rule-table
    /// build time, never during a scan.
    pub fn field_regex(field: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Matcher::FieldRegex {
            field: field.into(),
            regex: Regex::new(pattern)?,
        })
    }

    pub fn all(children: Vec<Matcher>) -> Self {
        Matcher::All(children)
    }

    pub fn any(children: Vec<Matcher>) -> Self {
        Matcher::Any(children)
    }

    pub fn always() -> Self {
        Matcher::Always
    }

    /// Build the inclusion predicate for a pair of optional bounds:
    /// [`Matcher::Always`] when neither bound is set, a [`Matcher::TimeRange`]
    /// otherwise. Bounds are exclusive on both ends.
    pub fn window(before: Option<DateTime<Utc>>, after: Option<DateTime<Utc>>) -> Self {
        if before.is_none() && after.is_none() {
            Matcher::Always
        } else {
            Matcher::TimeRange { before, after }
        }
    }

    /// Evaluate this matcher against an entry.
    ///
    /// Errors are only produced at match time by [`Matcher::TimeRange`],
    /// when a timestamp is present but malformed or a non-structured line
    /// carries none at all.
    pub fn matches(&self, entry: &mut Entry) -> Result<bool> {
        match self {
            Matcher::FieldEquals { field, value } => Ok(entry.get_string(field) == *value),
            Matcher::FieldStartsWith { field, prefix } => {
                Ok(entry.get_string(field).starts_with(prefix))
            }
            Matcher::FieldContains { field, substring } => {
                Ok(entry.get_string(field).contains(substring))
            }
            Matcher::FieldRegex { field, regex } => Ok(regex.is_match(&entry.get_string(field))),
            Matcher::All(children) => {
                for child in children {
                    if !child.matches(entry)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Matcher::Any(children) => {
                for child in children {
                    if child.matches(entry)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Matcher::Always => Ok(true),
            Matcher::TimeRange { before, after } => {
                // An entry with no timestamp is never excluded by time
                // filtering.
                let Some(t) = entry.timestamp()? else {
                    return Ok(true);
                };
                if let Some(before) = before
                    && t >= *before
                {
                    return Ok(false);
                }
                if let Some(after) = after
                    && t <= *after
                {
                    return Ok(false);
                }
                Ok(true)
            }
        }
    }
}
