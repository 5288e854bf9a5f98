use crate::cli::group::{ALL_LINES_FILE, CART_LINES_FILE, write_dumps};
use crate::parse::LogParser;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const LOG: &str = "\
shop_api      | 2018-08-01 00:01:35 [YQ4WUDJV] INFO: 1.1.1.1 https://all_to_the_bottom.com/
shop_api      | 2018-08-01 00:01:36 [AB12CD34] INFO: 2.2.2.2 https://all_to_the_bottom.com/fresh_fish/
shop_api      | 2018-08-01 00:01:37 [EF56GH78] INFO: 1.1.1.1 https://all_to_the_bottom.com/cart?goods_id=4&amount=1&cart_id=10
shop_api      | 2018-08-01 00:01:38 [IJ90KL12] INFO: 2.2.2.2 https://all_to_the_bottom.com/fresh_fish/salmon/
";

#[test]
fn dumps_group_lines_by_client_in_first_seen_order() {
    // Arrange
    let dir = tempdir().unwrap();
    let groups = LogParser::default().group_str(LOG).unwrap();
    let lines: Vec<&str> = LOG.lines().collect();

    // Act
    let (all, carts) = write_dumps(&groups, &dir.path().join("out")).unwrap();

    // Assert
    assert_eq!(all, dir.path().join("out").join(ALL_LINES_FILE));
    assert_eq!(carts, dir.path().join("out").join(CART_LINES_FILE));
    assert_eq!(
        fs::read_to_string(&all).unwrap(),
        format!("{}\n{}\n{}\n{}\n", lines[0], lines[2], lines[1], lines[3])
    );
    assert_eq!(fs::read_to_string(&carts).unwrap(), format!("{}\n", lines[2]));
}

#[test]
fn empty_log_writes_empty_dumps() {
    // Arrange
    let dir = tempdir().unwrap();
    let groups = LogParser::default().group_str("").unwrap();

    // Act
    let (all, carts) = write_dumps(&groups, dir.path()).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(all).unwrap(), "");
    assert_eq!(fs::read_to_string(carts).unwrap(), "");
}
