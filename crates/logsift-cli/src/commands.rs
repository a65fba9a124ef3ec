use crate::args::{Cli, Commands};
use crate::handlers;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Filter {
            file,
            rules,
            journald,
            before,
            after,
            include,
            max_unmatched,
        } => handlers::filter::handle(
            &file,
            &rules,
            journald,
            before.as_deref(),
            after.as_deref(),
            include,
            max_unmatched,
        ),

        Commands::Summarize {
            file,
            rules,
            journald,
            before,
            after,
            interval,
            ignore,
            max_unmatched,
            output,
        } => handlers::summarize::handle(
            &file,
            &rules,
            journald,
            before.as_deref(),
            after.as_deref(),
            interval,
            ignore,
            max_unmatched,
            output,
        ),

        Commands::Categories { rules } => handlers::categories::handle(&rules),
    }
}
