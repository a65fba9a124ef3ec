use crate::types::{OutputFormat, parse_interval};
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logsift")]
#[command(about = "Classify and summarize line-oriented log files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Echo log lines matched by allow-listed rules
    Filter {
        /// Log file to scan
        file: PathBuf,

        /// TOML rule table, evaluated in file order
        #[arg(long, short)]
        rules: PathBuf,

        /// Treat the input as journald output instead of bare JSON-lines
        #[arg(long)]
        journald: bool,

        /// Process only messages before this RFC-3339 timestamp
        #[arg(long, short = 'B')]
        before: Option<String>,

        /// Process only messages after this RFC-3339 timestamp
        #[arg(long, short = 'A')]
        after: Option<String>,

        /// Rule ids whose matches are echoed
        #[arg(long, short = 'i', value_delimiter = ',')]
        include: Vec<String>,

        /// Maximum unmatched log messages to echo
        #[arg(long, short = 'u', default_value = "1")]
        max_unmatched: usize,
    },

    /// Aggregate match counts into fixed-size time buckets
    Summarize {
        /// Log file to scan
        file: PathBuf,

        /// TOML rule table, evaluated in file order
        #[arg(long, short)]
        rules: PathBuf,

        /// Treat the input as journald output instead of bare JSON-lines
        #[arg(long)]
        journald: bool,

        /// Process only messages before this RFC-3339 timestamp
        #[arg(long, short = 'B')]
        before: Option<String>,

        /// Process only messages after this RFC-3339 timestamp
        #[arg(long, short = 'A')]
        after: Option<String>,

        /// Bucket duration, e.g. 45s, 90m, 1h30m
        #[arg(long, short = 'n', default_value = "1h", value_parser = parse_interval)]
        interval: TimeDelta,

        /// Rule ids excluded from bucket output
        #[arg(long, short = 'i', value_delimiter = ',')]
        ignore: Vec<String>,

        /// Maximum unmatched log messages to echo per bucket
        #[arg(long, short = 'u', default_value = "1")]
        max_unmatched: usize,

        /// Bucket output encoding
        #[arg(long, short = 'o', default_value = "text")]
        output: OutputFormat,
    },

    /// List the rule table's ids and descriptions
    Categories {
        /// TOML rule table
        #[arg(long, short)]
        rules: PathBuf,
    },
}
