use anyhow::Result;

use gamebattle_analytics::cli::Command;
use gamebattle_analytics::{
    handle_authors, handle_chart, handle_completions, handle_fetch, handle_history,
    handle_leaderboard, handle_suggest, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Fetch { preferences } => handle_fetch(*preferences),
        Command::History { file, limit } => handle_history(file, *limit),
        Command::Authors {
            file,
            filter,
            toggle,
            all,
        } => handle_authors(file, filter, toggle.as_deref(), *all),
        Command::Chart {
            file,
            filter,
            granularity,
        } => handle_chart(file, filter, *granularity),
        Command::Leaderboard {
            file,
            exclude,
            include_unrated,
            skip_uncounted,
        } => handle_leaderboard(file, exclude, *include_unrated, *skip_uncounted),
        Command::Suggest { file, input, pick } => handle_suggest(file, input, pick.as_deref()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
