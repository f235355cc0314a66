use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::Strategy;

#[derive(Parser, Debug)]
#[command(author, version, about = "fow.lol ranking crawler")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to 5001)
        #[arg(short, long, default_value_t = 5001)]
        port: u16,
    },
    /// Crawl a range of ranking pages and print progress as it happens
    Crawl {
        #[arg(short, long, default_value = "kr")]
        region: String,
        #[arg(short, long, default_value_t = 1)]
        start: u32,
        #[arg(short, long, default_value_t = 5)]
        end: u32,
        /// Print the collected records as JSON when done
        #[arg(long)]
        json: bool,
    },
    /// Fetch a single ranking page with one strategy
    Page {
        #[arg(short, long, default_value = "kr")]
        region: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// primary (headless browser) or fallback (plain HTTP)
        #[arg(short, long, default_value_t = Strategy::Primary)]
        method: Strategy,
    },
    /// Scan a page range for players at or above a win rate
    Scan {
        #[arg(short, long, default_value = "kr")]
        region: String,
        #[arg(short, long, default_value_t = 1)]
        start: u32,
        #[arg(short, long, default_value_t = 5)]
        end: u32,
        /// Minimum win rate in percent, 0 keeps everyone
        #[arg(short, long, default_value_t = 0.0)]
        winrate: f64,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
