use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CrawlerSettings {
    pub base_url: String,
    /// Queue type in the ranking URL, 1 is solo/duo ranked
    pub game_type: u8,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Pause between pages of a background crawl
    pub page_delay_ms: u64,
    /// Pause between pages of a threshold scan, gentler than the bulk crawl
    pub scan_delay_ms: u64,
    pub chrome_path: Option<PathBuf>,
    pub table_wait_secs: u64,
    pub render_settle_ms: u64,
    pub scroll_settle_ms: u64,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.fow.lol/ranking".to_string(),
            game_type: 1,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 30,
            page_delay_ms: 2000,
            scan_delay_ms: 3000,
            chrome_path: None,
            table_wait_secs: 25,
            render_settle_ms: 5000,
            scroll_settle_ms: 2000,
        }
    }
}

impl CrawlerSettings {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    /// Buffered events per subscriber before slow subscribers start lagging
    pub event_capacity: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5001,
            event_capacity: 256,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub crawler: CrawlerSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self {
            crawler: CrawlerSettings::default(),
            server: ServerSettings::default(),
        };
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var("FOW_BASE_URL") {
            self.crawler.base_url = url;
        }
        if let Some(ms) = env_number("FOW_PAGE_DELAY_MS") {
            self.crawler.page_delay_ms = ms;
        }
        if let Some(ms) = env_number("FOW_SCAN_DELAY_MS") {
            self.crawler.scan_delay_ms = ms;
        }
        if let Ok(path) = env::var("CHROMIUM_PATH") {
            self.crawler.chrome_path = Some(PathBuf::from(path));
        }
    }
}

fn env_number<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}: not a number ({:?})", key, raw);
            None
        }
    }
}
