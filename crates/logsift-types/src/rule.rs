use crate::error::{Error, Result};
use crate::matcher::Matcher;
use std::collections::HashMap;

/// A named, described classification rule.
///
/// Rules are supplied as an ordered list; list order is the match priority
/// (the first satisfied rule wins).
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub matcher: Matcher,
}

impl Rule {
    pub fn new(id: impl Into<String>, description: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            matcher,
        }
    }
}

/// Reject rule tables with duplicate identifiers.
///
/// The first duplicate encountered in list order is reported, with both
/// the duplicate's index and the index of its earlier occurrence.
pub fn validate_rules(rules: &[Rule]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, rule) in rules.iter().enumerate() {
        if let Some(&first) = seen.get(rule.id.as_str()) {
            return Err(Error::DuplicateId {
                id: rule.id.clone(),
                first,
                second: index,
            });
        }
        seen.insert(&rule.id, index);
    }
    Ok(())
}
