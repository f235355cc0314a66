use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::{self, JoinHandle};
use tokio::time::sleep;
use uuid::Uuid;

use super::{RawRows, TableParser};
use crate::config::settings::CrawlerSettings;
use crate::pagination::{RankRange, build_ranking_url};

const TABLE_CELL_SELECTOR: &str = "table tr td";
const POLL_INTERVAL: Duration = Duration::from_millis(250);
const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Primary fetch: render the ranking page in headless Chrome so scripted
/// content is populated before the table is read.
///
/// A fresh browser is launched per page and torn down afterwards.
pub struct BrowserFetcher {
    parser: TableParser,
    base_url: String,
    game_type: u8,
    user_agent: String,
    chrome_path: Option<PathBuf>,
    table_wait: Duration,
    render_settle: Duration,
    scroll_settle: Duration,
}

/// Throwaway Chrome profile directory, removed when dropped
struct ProfileDir {
    path: PathBuf,
}

impl ProfileDir {
    fn create() -> Result<Self> {
        let path = std::env::temp_dir().join(format!("fow_crawler_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).context("Failed to create browser profile directory")?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProfileDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            warn!("Failed to remove browser profile {}: {}", self.path.display(), e);
        }
    }
}

// Field order matters: the browser process goes before its profile directory
struct RunningBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
    _profile: ProfileDir,
}

impl Drop for RunningBrowser {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

impl BrowserFetcher {
    pub fn new(settings: &CrawlerSettings) -> Result<Self> {
        Ok(Self {
            parser: TableParser::new()?,
            base_url: settings.base_url.clone(),
            game_type: settings.game_type,
            user_agent: settings.user_agent.clone(),
            chrome_path: settings.chrome_path.clone(),
            table_wait: Duration::from_secs(settings.table_wait_secs),
            render_settle: Duration::from_millis(settings.render_settle_ms),
            scroll_settle: Duration::from_millis(settings.scroll_settle_ms),
        })
    }

    pub async fn fetch_rows(&self, region: &str, page: u32) -> Result<RawRows> {
        let url = build_ranking_url(&self.base_url, page, region, self.game_type);
        info!(
            "Browser fetch: {} (Page {} = Ranks {})",
            url,
            page,
            RankRange::for_page(page)
        );

        let profile = ProfileDir::create()?;
        let mut running = self.launch(profile).await?;
        let rendered = self.render(&running.browser, &url).await;
        Self::shutdown(&mut running).await;

        let html = rendered?;
        Ok(self.parser.parse_document(&html))
    }

    // --- Browser Lifecycle ---

    async fn launch(&self, profile: ProfileDir) -> Result<RunningBrowser> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(30))
            .window_size(1920, 1080)
            .user_data_dir(profile.path())
            .headless_mode(HeadlessMode::default())
            .arg(format!("--user-agent={}", self.user_agent))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--disable-extensions")
            .arg("--no-first-run");

        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        let config = builder
            .build()
            .map_err(|e| anyhow!("Failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch browser")?;

        let handler = task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {:?}", e);
                }
            }
        });

        Ok(RunningBrowser {
            browser,
            handler,
            _profile: profile,
        })
    }

    async fn shutdown(running: &mut RunningBrowser) {
        if let Err(e) = running.browser.close().await {
            warn!("Error closing browser: {}", e);
        }
        if let Err(e) = running.browser.wait().await {
            warn!("Error waiting for browser exit: {}", e);
        }
    }

    // --- Rendering ---

    async fn render(&self, browser: &Browser, url: &str) -> Result<String> {
        let page = browser
            .new_page(url)
            .await
            .context("Failed to open ranking page")?;

        page.wait_for_navigation()
            .await
            .context("Failed to wait for page load")?;

        self.wait_for_table(&page).await?;
        sleep(self.render_settle).await;

        // Lazy-loaded rows only appear after scrolling
        page.evaluate(SCROLL_TO_BOTTOM)
            .await
            .context("Failed to scroll ranking page")?;
        sleep(self.scroll_settle).await;

        page.content().await.context("Failed to read rendered HTML")
    }

    async fn wait_for_table(&self, page: &Page) -> Result<()> {
        let started = Instant::now();

        loop {
            if page.find_element(TABLE_CELL_SELECTOR).await.is_ok() {
                debug!("Table rows rendered after {:?}", started.elapsed());
                return Ok(());
            }

            if started.elapsed() >= self.table_wait {
                anyhow::bail!(
                    "Timeout waiting for ranking table after {}s",
                    self.table_wait.as_secs()
                );
            }

            sleep(POLL_INTERVAL).await;
        }
    }
}
