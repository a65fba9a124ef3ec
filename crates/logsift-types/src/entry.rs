use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// Reserved pseudo path yielding the accumulated non-JSON block text.
pub const NON_JSON_FIELD: &str = "non_json";

/// Reserved pseudo path yielding the raw line of a systemd-originated
/// non-JSON line.
pub const SYSTEMD_FIELD: &str = "systemd";

// Journald lines carry no year; anchor at year 0 so values stay ordered
// and comparable within one file.
const JOURNALD_TIME_LAYOUT: &str = "%Y %b %d %H:%M:%S";

#[derive(Debug, Clone)]
enum Payload {
    /// A parsed JSON field tree
    Fields(Value),
    /// A bare non-JSON physical line
    Text,
    /// A finalized run of consecutive non-JSON lines
    Block,
    /// A non-JSON line recognized as systemd-originated
    Systemd,
}

/// One logical unit of input: a structured line, a bare text line, an
/// accumulated non-JSON block, or a systemd marker line.
///
/// Field lookups are memoized per entry; the cache lives and dies with the
/// entry, which is recreated for every logical unit.
#[derive(Debug, Clone)]
pub struct Entry {
    payload: Payload,
    raw: String,
    journald_timestamp: Option<String>,
    cache: HashMap<String, String>,
}

impl Entry {
    pub fn structured(fields: Value, raw: String, journald_timestamp: Option<String>) -> Self {
        Self::new(Payload::Fields(fields), raw, journald_timestamp)
    }

    pub fn text(raw: String, journald_timestamp: Option<String>) -> Self {
        Self::new(Payload::Text, raw, journald_timestamp)
    }

    pub fn block(text: String, journald_timestamp: Option<String>) -> Self {
        Self::new(Payload::Block, text, journald_timestamp)
    }

    pub fn systemd(raw: String, journald_timestamp: Option<String>) -> Self {
        Self::new(Payload::Systemd, raw, journald_timestamp)
    }

    fn new(payload: Payload, raw: String, journald_timestamp: Option<String>) -> Self {
        Self {
            payload,
            raw,
            journald_timestamp,
            cache: HashMap::new(),
        }
    }

    /// The text of this unit: the line as delivered to the classifier, or
    /// the accumulated block text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.payload, Payload::Fields(_))
    }

    pub fn is_systemd(&self) -> bool {
        matches!(self.payload, Payload::Systemd)
    }

    /// Look up a dotted field path and render it as a string.
    ///
    /// The two reserved paths address the block text and the systemd raw
    /// line; everything else walks the field tree. Missing paths and
    /// non-structured entries yield the empty string. Values are computed
    /// once per (entry, path) pair.
    pub fn get_string(&mut self, path: &str) -> String {
        if path == NON_JSON_FIELD {
            return match self.payload {
                Payload::Block => self.raw.clone(),
                _ => String::new(),
            };
        }
        if path == SYSTEMD_FIELD {
            return match self.payload {
                Payload::Systemd => self.raw.clone(),
                _ => String::new(),
            };
        }
        if let Some(cached) = self.cache.get(path) {
            return cached.clone();
        }
        let value = match &self.payload {
            Payload::Fields(fields) => lookup(fields, path).map(render).unwrap_or_default(),
            _ => String::new(),
        };
        self.cache.insert(path.to_string(), value.clone());
        value
    }

    /// Resolve this unit's timestamp.
    ///
    /// Structured entries read the `time` field as RFC-3339; an absent
    /// field is `Ok(None)` rather than an error. Non-structured units fall
    /// back to the journald timestamp substring, whose absence is an error
    /// (there is nothing else to anchor them to).
    pub fn timestamp(&mut self) -> Result<Option<DateTime<Utc>>> {
        if self.is_structured() {
            let value = self.get_string("time");
            if value.is_empty() {
                return Ok(None);
            }
            let parsed = DateTime::parse_from_rfc3339(&value).map_err(|_| {
                Error::Timestamp(format!("time is in an unexpected format: {}", value))
            })?;
            return Ok(Some(parsed.with_timezone(&Utc)));
        }
        let Some(raw) = &self.journald_timestamp else {
            return Err(Error::Timestamp("no journald timestamp found".to_string()));
        };
        let parsed = NaiveDateTime::parse_from_str(&format!("0000 {}", raw), JOURNALD_TIME_LAYOUT)
            .map_err(|_| {
                Error::Timestamp(format!("journald timestamp is in an unexpected format: {}", raw))
            })?;
        Ok(Some(parsed.and_utc()))
    }
}

fn lookup<'a>(fields: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = fields;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
