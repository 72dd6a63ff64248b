use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "clippick",
    version,
    about = "Get a random Twitch clip from a streamer without repeats"
)]
pub struct Cli {
    /// Twitch streamer login name
    pub streamer: String,

    /// Ignore seen clip tracking
    #[arg(short = 'i', long = "ignore-db")]
    pub ignore_db: bool,

    /// Max number of clips to fetch from Twitch
    #[arg(
        short = 'l',
        long,
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub limit: u32,

    /// Seen clip database path (overrides CLIPS_DB_PATH)
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
