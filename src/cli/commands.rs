use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hn-relay")]
#[command(about = "Relays the Hacker News front page to a Telegram channel")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Relay top stories now and then on every interval (RELAY_INTERVAL_HOURS)
    Run {
        /// Dry run - print messages instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Number of stories per run (overrides RELAY_STORY_COUNT)
        #[arg(short, long)]
        count: Option<usize>,

        /// Stop after this many runs (runs forever by default)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_runs: Option<u64>,
    },

    /// Relay top stories once and exit
    Once {
        /// Dry run - print messages instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Number of stories to relay (overrides RELAY_STORY_COUNT)
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// List the current top stories without sending anything
    Top {
        /// Number of stories to list (overrides RELAY_STORY_COUNT)
        #[arg(short, long)]
        count: Option<usize>,
    },
}
