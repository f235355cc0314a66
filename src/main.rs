use anyhow::Result;

use fow_ranking_crawler::cli::Command;
use fow_ranking_crawler::{handle_completions, handle_crawl, handle_page, handle_scan, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
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
        Command::Serve { port } => handle_serve(*port),
        Command::Crawl { region, start, end, json } => handle_crawl(region, *start, *end, *json),
        Command::Page { region, page, method } => handle_page(region, *page, *method),
        Command::Scan { region, start, end, winrate } => handle_scan(region, *start, *end, *winrate),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
