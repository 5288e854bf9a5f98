use integration_tests::harness::{capture_events, fixture_path};
use shoplog_core::parse::LogParser;
use tracing::Level;

#[test]
fn run_reports_start_and_summary() {
    // Act
    let (result, events) =
        capture_events(|| LogParser::default().parse_file(&fixture_path("shop_day.log")));

    // Assert
    assert!(result.is_ok());

    let start = events
        .iter()
        .find(|e| e.message() == Some("parsing log file"))
        .expect("expected start event");
    assert_eq!(start.level, Level::INFO);
    assert!(start.field("path").unwrap().ends_with("shop_day.log"));

    let summary = events
        .iter()
        .find(|e| e.message() == Some("parsed log"))
        .expect("expected summary event");
    assert_eq!(summary.level, Level::INFO);
    assert_eq!(summary.field("clients"), Some("3"));
    assert_eq!(summary.field("lines"), Some("14"));
    assert_eq!(summary.field("carts"), Some("3"));
    assert_eq!(summary.field("goods_views"), Some("7"));
}

/// Cart lines whose predecessor is not a product page are skipped quietly.
#[test]
fn catalog_misses_are_traced_with_line_numbers() {
    // Act
    let (_, events) =
        capture_events(|| LogParser::default().parse_file(&fixture_path("shop_day.log")));

    // Assert
    let skipped: Vec<_> = events
        .iter()
        .filter(|e| e.level == Level::TRACE && e.field("component") == Some("catalog"))
        .filter_map(|e| e.field("line_no"))
        .collect();

    assert_eq!(skipped, vec!["12", "13"]);
}
