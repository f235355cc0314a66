pub mod api;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod pagination;
pub mod rate_limiter;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::Strategy;
use crate::services::crawl::CrawlService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_crawl(region: &str, start: u32, end: u32, json: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = CrawlService::new(AppConfig::new())?;
        service.crawl_range(region, start, end, json).await
    })
}

pub fn handle_page(region: &str, page: u32, method: Strategy) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = CrawlService::new(AppConfig::new())?;
        service.fetch_page(region, page, method).await
    })
}

pub fn handle_scan(region: &str, start: u32, end: u32, winrate: f64) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = CrawlService::new(AppConfig::new())?;
        service.scan(region, start, end, winrate).await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
