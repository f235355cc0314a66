use anyhow::Result;
use log::info;

use super::{RawRows, TableParser};
use crate::config::settings::CrawlerSettings;
use crate::http::HttpClient;
use crate::pagination::{RankRange, build_ranking_url};

/// Fallback fetch: plain HTTP GET of the ranking page, parsed as static HTML
pub struct StaticFetcher {
    client: HttpClient,
    parser: TableParser,
    base_url: String,
    game_type: u8,
}

impl StaticFetcher {
    pub fn new(settings: &CrawlerSettings) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(&settings.user_agent, settings.timeout_secs)?,
            parser: TableParser::new()?,
            base_url: settings.base_url.clone(),
            game_type: settings.game_type,
        })
    }

    pub async fn fetch_rows(&self, region: &str, page: u32) -> Result<RawRows> {
        let url = build_ranking_url(&self.base_url, page, region, self.game_type);
        info!(
            "Static fetch: {} (Page {} = Ranks {})",
            url,
            page,
            RankRange::for_page(page)
        );

        let html = self.client.get_text(&url).await?;
        Ok(self.parser.parse_document(&html))
    }
}
