use chrono::TimeDelta;
use clap::ValueEnum;
use logsift_engine::SummaryFormat;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl From<OutputFormat> for SummaryFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => SummaryFormat::Text,
            OutputFormat::Json => SummaryFormat::Json,
        }
    }
}

/// Parse a bucket interval such as `45s`, `90m`, `1h` or `1h30m`.
pub fn parse_interval(s: &str) -> Result<TimeDelta, String> {
    let mut total = TimeDelta::zero();
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let value: i64 = digits
            .parse()
            .map_err(|_| format!("invalid interval '{}'", s))?;
        digits.clear();
        let segment = match c {
            's' => TimeDelta::try_seconds(value),
            'm' => TimeDelta::try_minutes(value),
            'h' => TimeDelta::try_hours(value),
            _ => return Err(format!("invalid interval '{}': unknown unit '{}'", s, c)),
        };
        let segment = segment.ok_or_else(|| format!("interval '{}' is out of range", s))?;
        total = total + segment;
    }
    if !digits.is_empty() {
        return Err(format!("invalid interval '{}': missing unit", s));
    }
    if total <= TimeDelta::zero() {
        return Err(format!("interval must be positive, got '{}'", s));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval_simple_units() {
        assert_eq!(parse_interval("45s").unwrap(), TimeDelta::seconds(45));
        assert_eq!(parse_interval("90m").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_interval("1h").unwrap(), TimeDelta::hours(1));
    }

    #[test]
    fn test_parse_interval_compound() {
        assert_eq!(
            parse_interval("1h30m").unwrap(),
            TimeDelta::minutes(90)
        );
    }

    #[test]
    fn test_parse_interval_rejects_garbage() {
        assert!(parse_interval("").is_err());
        assert!(parse_interval("h").is_err());
        assert!(parse_interval("10").is_err());
        assert!(parse_interval("10x").is_err());
        assert!(parse_interval("0s").is_err());
    }
}
