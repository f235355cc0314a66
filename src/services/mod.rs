pub mod crawl;
pub mod server;
