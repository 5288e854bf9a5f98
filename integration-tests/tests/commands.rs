use integration_tests::harness::fixture_path;
use pretty_assertions::assert_eq;
use shoplog_core::cli::conf::init;
use shoplog_core::cli::group::write_dumps;
use shoplog_core::conf::{ShoplogConfig, discover_inputs, load_config};
use shoplog_core::parse::{LogParser, ParserOptions};
use std::fs;
use tempfile::tempdir;

#[test]
fn group_dumps_match_client_order() {
    // Arrange
    let dir = tempdir().unwrap();
    let groups = LogParser::default()
        .group_file(&fixture_path("shop_day.log"))
        .unwrap();

    // Act
    let (all, carts) = write_dumps(&groups, dir.path()).unwrap();

    // Assert
    let all = fs::read_to_string(all).unwrap();
    let clients: Vec<_> = all
        .lines()
        .map(|l| l.split_whitespace().nth(6).unwrap())
        .collect();
    assert_eq!(clients.len(), 14);
    assert!(clients[..6].iter().all(|c| *c == "121.165.118.201"));
    assert!(clients[6..11].iter().all(|c| *c == "190.12.44.7"));
    assert!(clients[11..].iter().all(|c| *c == "94.25.130.14"));

    let carts = fs::read_to_string(carts).unwrap();
    assert_eq!(carts.lines().count(), 5);
    assert!(carts.lines().all(|l| !l.contains("pay?")));
}

#[test]
fn init_then_load_yields_a_working_parser() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let path = init(dir.path()).unwrap();
    let cfg = load_config(&path).unwrap();
    let parser = LogParser::new(&ParserOptions::from(&cfg.parser));

    // Assert
    assert_eq!(cfg, ShoplogConfig::default());
    assert!(parser.parse_file(&fixture_path("shop_day.log")).is_ok());
}

#[test]
fn inputs_expand_from_fixture_glob() {
    // Arrange
    let pattern = fixture_path("*.log").to_string_lossy().into_owned();

    // Act
    let inputs = discover_inputs(&[pattern]).unwrap();

    // Assert
    assert_eq!(
        inputs,
        vec![fixture_path("malformed.log"), fixture_path("shop_day.log")]
    );
}
