use anyhow::{Context, Result, bail};
use logsift_types::{Matcher, Rule};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<RuleSpec>,
}

#[derive(Debug, Deserialize)]
struct RuleSpec {
    id: String,
    description: String,
    matcher: MatcherSpec,
}

/// One matcher table from the rule file. Exactly one form may be set:
/// a leaf (`equals`, `starts_with`, `contains`, `regex` — each with
/// `field`), `always`, or a composite (`all`, `any`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatcherSpec {
    field: Option<String>,
    equals: Option<String>,
    starts_with: Option<String>,
    contains: Option<String>,
    regex: Option<String>,
    always: Option<bool>,
    all: Option<Vec<MatcherSpec>>,
    any: Option<Vec<MatcherSpec>>,
}

/// Load a TOML rule table, compiling matchers (and their regexes) now so
/// bad patterns surface before any scanning.
pub fn load(path: &Path) -> Result<Vec<Rule>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules file {}", path.display()))?;
    let file: RuleFile = toml::from_str(&content)
        .with_context(|| format!("parsing rules file {}", path.display()))?;
    file.rules
        .into_iter()
        .map(|spec| {
            let matcher =
                compile(&spec.matcher).with_context(|| format!("in rule {}", spec.id))?;
            Ok(Rule::new(spec.id, spec.description, matcher))
        })
        .collect()
}

fn compile(spec: &MatcherSpec) -> Result<Matcher> {
    let forms = [
        spec.equals.is_some(),
        spec.starts_with.is_some(),
        spec.contains.is_some(),
        spec.regex.is_some(),
        spec.always.is_some(),
        spec.all.is_some(),
        spec.any.is_some(),
    ];
    if forms.iter().filter(|set| **set).count() != 1 {
        bail!(
            "matcher must have exactly one of equals, starts_with, contains, regex, always, all, any"
        );
    }

    if let Some(children) = &spec.all {
        if spec.field.is_some() {
            bail!("field does not apply to all");
        }
        return Ok(Matcher::all(compile_children(children)?));
    }
    if let Some(children) = &spec.any {
        if spec.field.is_some() {
            bail!("field does not apply to any");
        }
        return Ok(Matcher::any(compile_children(children)?));
    }
    if let Some(flag) = spec.always {
        if spec.field.is_some() {
            bail!("field does not apply to always");
        }
        if !flag {
            bail!("always must be true when present");
        }
        return Ok(Matcher::always());
    }

    let Some(field) = &spec.field else {
        bail!("matcher requires a field");
    };
    if let Some(value) = &spec.equals {
        return Ok(Matcher::field_equals(field, value));
    }
    if let Some(prefix) = &spec.starts_with {
        return Ok(Matcher::field_starts_with(field, prefix));
    }
    if let Some(substring) = &spec.contains {
        return Ok(Matcher::field_contains(field, substring));
    }
    if let Some(pattern) = &spec.regex {
        return Ok(Matcher::field_regex(field, pattern)?);
    }
    bail!("matcher must have exactly one of equals, starts_with, contains, regex, always, all, any")
}

fn compile_children(children: &[MatcherSpec]) -> Result<Vec<Matcher>> {
    children.iter().map(compile).collect()
}
