mod app;
mod cli;
mod config;
mod db;
mod error;
mod helix;
mod http;
mod paths;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    app::run(cli)
}
