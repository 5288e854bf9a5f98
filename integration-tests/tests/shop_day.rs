use integration_tests::harness::{fixture_path, load_fixture};
use pretty_assertions::assert_eq;
use shoplog_core::parse::{
    CartEvent, CartId, CatalogItem, ClientId, GoodsId, LogParser, ParseError, ParserOptions,
    Timestamp,
};

fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

/// Clients come out in first-seen order.
#[test]
fn clients_are_listed_once_in_first_seen_order() {
    // Act
    let parsed = LogParser::default()
        .parse_file(&fixture_path("shop_day.log"))
        .unwrap();

    // Assert
    assert_eq!(
        parsed.clients,
        vec![
            ClientId::from("121.165.118.201"),
            ClientId::from("190.12.44.7"),
            ClientId::from("94.25.130.14"),
        ]
    );
}

/// Goods ids resolve from the page viewed just before adding to the cart.
#[test]
fn catalog_is_resolved_from_preceding_product_page() {
    // Act
    let parsed = LogParser::default()
        .parse_file(&fixture_path("shop_day.log"))
        .unwrap();

    // Assert
    let names: Vec<_> = parsed.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["fresh_fish", "frozen_fish"]);

    assert_eq!(
        parsed.categories.get("fresh_fish").unwrap().items,
        vec![CatalogItem {
            name: "salmon".to_string(),
            id: GoodsId::from("11"),
        }]
    );
    assert_eq!(
        parsed.categories.get("frozen_fish").unwrap().items,
        vec![CatalogItem {
            name: "pollock".to_string(),
            id: GoodsId::from("17"),
        }]
    );
}

/// One paid cart, and two abandoned ones from a client who switched carts.
#[test]
fn carts_are_reconstructed_per_client() {
    // Act
    let parsed = LogParser::default()
        .parse_file(&fixture_path("shop_day.log"))
        .unwrap();

    // Assert
    let carts: Vec<_> = parsed
        .carts
        .iter()
        .map(|c| {
            (
                c.client_id().as_str(),
                c.cart_id().as_str(),
                c.is_paid(),
                c.paid_time(),
            )
        })
        .collect();

    assert_eq!(
        carts,
        vec![
            (
                "121.165.118.201",
                "1502",
                true,
                Some(ts("2018-08-01 00:03:03"))
            ),
            ("190.12.44.7", "1503", false, None),
            ("190.12.44.7", "1507", false, None),
        ]
    );
}

/// Payment initiation lines carry a cart id but are not add-to-cart requests.
#[test]
fn cart_requests_skip_payment_initiation() {
    // Act
    let parsed = LogParser::default()
        .parse_file(&fixture_path("shop_day.log"))
        .unwrap();

    // Assert
    let request = |at: &str, goods: &str, amount: u32, cart: &str| CartEvent {
        timestamp: ts(at),
        goods_id: GoodsId::from(goods),
        amount,
        cart_id: CartId::from(cart),
    };

    assert_eq!(
        parsed.cart_requests,
        vec![
            request("2018-08-01 00:02:41", "11", 2, "1502"),
            request("2018-08-01 00:03:20", "17", 1, "1503"),
            request("2018-08-01 00:04:30", "17", 3, "1503"),
            request("2018-08-01 00:05:00", "21", 1, "1507"),
        ]
    );
}

/// Category and product pages count as views; cart and payment pages do not.
#[test]
fn goods_views_cover_category_and_product_pages() {
    // Act
    let parsed = LogParser::default()
        .parse_file(&fixture_path("shop_day.log"))
        .unwrap();

    // Assert
    let views: Vec<_> = parsed
        .goods_views
        .iter()
        .map(|v| (v.client_id.as_str(), v.category.as_str(), v.item.as_deref()))
        .collect();

    assert_eq!(
        views,
        vec![
            ("121.165.118.201", "fresh_fish", None),
            ("121.165.118.201", "fresh_fish", Some("salmon")),
            ("190.12.44.7", "frozen_fish", None),
            ("190.12.44.7", "frozen_fish", Some("pollock")),
            ("94.25.130.14", "caviar", None),
            ("94.25.130.14", "caviar", Some("black_caviar")),
            ("94.25.130.14", "fresh_fish", Some("salmon")),
        ]
    );
}

#[test]
fn worker_count_does_not_change_the_result() {
    // Arrange
    let input = load_fixture("shop_day.log");
    let sequential = LogParser::default().parse_str(&input).unwrap();

    for workers in [2, 3, 8] {
        // Act
        let parser = LogParser::new(&ParserOptions {
            workers,
            ..ParserOptions::default()
        });
        let parallel = parser.parse_str(&input).unwrap();

        // Assert
        assert_eq!(parallel, sequential, "workers = {workers}");
    }
}

#[test]
fn line_without_client_aborts_the_run() {
    // Act
    let err = LogParser::default()
        .parse_file(&fixture_path("malformed.log"))
        .unwrap_err();

    // Assert
    assert!(err.is_malformed_line());
    match err {
        ParseError::MalformedLine { line_no, .. } => assert_eq!(line_no, 3),
        other => panic!("expected malformed line, got {other:?}"),
    }
}

#[test]
fn level_marker_selects_which_lines_carry_a_client() {
    // Arrange
    let parser = LogParser::new(&ParserOptions {
        level_marker: "WARN".to_string(),
        workers: 1,
    });

    // Act
    let err = parser
        .parse_file(&fixture_path("shop_day.log"))
        .unwrap_err();

    // Assert
    match err {
        ParseError::MalformedLine { line_no, .. } => assert_eq!(line_no, 1),
        other => panic!("expected malformed line, got {other:?}"),
    }
}

#[test]
fn parsed_log_serializes_to_json() {
    // Act
    let parsed = LogParser::default()
        .parse_file(&fixture_path("shop_day.log"))
        .unwrap();
    let json = serde_json::to_value(&parsed).unwrap();

    // Assert
    assert_eq!(json["clients"][0], "121.165.118.201");
    assert_eq!(json["categories"][0]["name"], "fresh_fish");
    assert_eq!(json["categories"][0]["items"][0]["id"], "11");
    assert_eq!(json["carts"][0]["paid"], true);
    assert_eq!(json["carts"][0]["paid_time"], "2018-08-01 00:03:03");
    assert_eq!(json["carts"][1]["paid_time"], serde_json::Value::Null);
    assert_eq!(json["cart_requests"][0]["amount"], 2);
    assert_eq!(json["goods_views"][0]["item"], serde_json::Value::Null);
}
