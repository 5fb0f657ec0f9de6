use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::analytics::Granularity;

#[derive(Parser, Debug)]
#[command(name = "gamebattle-analytics", author, version, about = "GameBattle admin activity and ELO analytics")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the admin history from the backend into the local cache
    Fetch {
        /// Fetch the preference-only history instead of the combined one
        #[arg(long)]
        preferences: bool,
    },
    /// List events
    History {
        /// Read events from a JSON file instead of the cache
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Rank authors by number of events
    Authors {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Comma separated authors to highlight
        #[arg(long, default_value = "")]
        filter: String,
        /// Add the author to the filter, or remove it if already listed
        #[arg(short, long)]
        toggle: Option<String>,
        /// Show every author instead of the top ten
        #[arg(long)]
        all: bool,
    },
    /// Activity over time, optionally against selected authors
    Chart {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Comma separated authors for the selected series
        #[arg(long, default_value = "")]
        filter: String,
        #[arg(short, long, value_enum)]
        granularity: Option<Granularity>,
    },
    /// Leaderboard recomputed without the excluded authors' preferences
    Leaderboard {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Comma separated authors to exclude
        #[arg(short, long)]
        exclude: String,
        /// List games left without any counted comparison at the initial rating
        #[arg(long)]
        include_unrated: bool,
        /// Ignore preferences the backend did not count
        #[arg(long)]
        skip_uncounted: bool,
    },
    /// Autocomplete an author filter
    Suggest {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Filter text typed so far
        #[arg(short, long)]
        input: String,
        /// Complete the word being typed with this author
        #[arg(short, long)]
        pick: Option<String>,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
