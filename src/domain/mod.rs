pub mod models;
pub mod progress;
pub mod session;

pub use models::{PageOutcome, PageResult, PlayerRecord, Strategy};
pub use progress::ProgressSnapshot;
pub use session::{CrawlSession, SessionSummary};
