use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::config::settings::AppConfig;
use crate::fetchers::FowFetcher;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let fetcher = Arc::new(FowFetcher::new(&self.config.crawler)?);
        let state = Arc::new(AppState::new(&self.config, fetcher));
        let app = create_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
