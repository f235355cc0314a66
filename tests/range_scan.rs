mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Script, ScriptedFetcher};
use fow_ranking_crawler::crawl::RangeFilterScanner;
use fow_ranking_crawler::domain::Strategy;
use fow_ranking_crawler::errors::CrawlError;

fn scanner(fetcher: ScriptedFetcher) -> (RangeFilterScanner, Arc<ScriptedFetcher>) {
    let fetcher = Arc::new(fetcher);
    (RangeFilterScanner::new(fetcher.clone(), Duration::ZERO), fetcher)
}

#[tokio::test]
async fn zero_threshold_keeps_everyone() {
    let (scanner, _) = scanner(
        ScriptedFetcher::new()
            .on(1, Strategy::Primary, Script::Rows(50))
            .on(2, Strategy::Primary, Script::Rows(50)),
    );

    let report = scanner.scan("kr", 1, 2, 0.0).await.unwrap();
    assert_eq!(report.total_found, 100);
    assert_eq!(report.records.len(), 100);
    assert_eq!(report.search_type, "all players");
    assert_eq!(report.threshold_label, "0% (all players)");
    assert_eq!(report.pages_searched, 2);
}

#[tokio::test]
async fn threshold_filters_by_win_rate() {
    let (scanner, _) = scanner(ScriptedFetcher::new().on(1, Strategy::Primary, Script::Rows(10)));

    let report = scanner.scan("kr", 1, 1, 50.0).await.unwrap();
    assert_eq!(report.total_found, 5);
    assert!(report.records.iter().all(|r| r.win_rate_text.contains("60.00%")));
    assert_eq!(report.threshold, 50.0);
    assert_eq!(report.search_type, "players with winrate >= 50%");
    assert_eq!(report.threshold_label, "50%");
    assert_eq!(report.region, "kr");
}

#[tokio::test]
async fn zero_threshold_keeps_unparseable_win_rates() {
    let (scanner, _) = scanner(
        ScriptedFetcher::new()
            .on(1, Strategy::Primary, Script::Rows(4))
            .on(2, Strategy::Primary, Script::Unrated(3)),
    );

    let report = scanner.scan("kr", 1, 2, 0.0).await.unwrap();
    assert_eq!(report.total_found, 7);
    assert!(report.records.iter().any(|r| r.win_rate_text == "n/a"));
}

#[tokio::test]
async fn positive_threshold_drops_unparseable_win_rates() {
    let (scanner, _) = scanner(
        ScriptedFetcher::new()
            .on(1, Strategy::Primary, Script::Rows(4))
            .on(2, Strategy::Primary, Script::Unrated(3)),
    );

    let report = scanner.scan("kr", 1, 2, 50.0).await.unwrap();
    assert_eq!(report.total_found, 2);
    assert!(report.records.iter().all(|r| r.win_rate_text.contains("60.00%")));
    assert_eq!(report.pages_searched, 2);
}

#[tokio::test]
async fn stops_at_first_empty_page() {
    let (scanner, fetcher) = scanner(
        ScriptedFetcher::new()
            .on(1, Strategy::Primary, Script::Rows(50))
            .on(2, Strategy::Primary, Script::Rows(50))
            .on(3, Strategy::Primary, Script::Empty)
            .on(3, Strategy::Fallback, Script::Empty)
            .on(4, Strategy::Primary, Script::Rows(50)),
    );

    let report = scanner.scan("kr", 1, 5, 0.0).await.unwrap();
    assert_eq!(report.total_found, 100);
    assert_eq!(report.pages_searched, 3);
    assert_eq!(report.start_page, 1);
    assert_eq!(report.end_page, 5);
    assert_eq!(fetcher.pages_called(), vec![1, 2, 3]);
}

#[tokio::test]
async fn transport_failures_do_not_stop_the_scan() {
    let (scanner, fetcher) = scanner(
        ScriptedFetcher::new()
            .on(1, Strategy::Primary, Script::Fail("timeout"))
            .on(1, Strategy::Fallback, Script::Fail("connection reset"))
            .on(2, Strategy::Primary, Script::Empty)
            .on(2, Strategy::Fallback, Script::Rows(20)),
    );

    let report = scanner.scan("kr", 1, 2, 55.0).await.unwrap();
    assert_eq!(report.total_found, 10);
    assert_eq!(report.pages_searched, 2);
    assert_eq!(fetcher.calls().len(), 4);
}

#[tokio::test]
async fn rejects_inverted_range() {
    let (scanner, fetcher) = scanner(ScriptedFetcher::new());

    let err = scanner.scan("kr", 4, 1, 0.0).await.unwrap_err();
    assert_eq!(err, CrawlError::InvalidRange { start: 4, end: 1 });
    assert!(fetcher.calls().is_empty());
}
