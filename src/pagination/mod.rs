mod range;
mod urls;
mod window;

pub use range::PageRange;
pub use urls::build_ranking_url;
pub use window::{MAX_PAGE, PAGE_SIZE, RankRange};
