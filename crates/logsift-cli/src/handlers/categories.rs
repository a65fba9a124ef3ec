use crate::rules;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn handle(rules_file: &Path) -> Result<()> {
    for rule in rules::load(rules_file)? {
        println!("{}: {}", rule.id.bold(), rule.description);
    }
    Ok(())
}
