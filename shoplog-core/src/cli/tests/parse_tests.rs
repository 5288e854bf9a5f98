use crate::cli::parse::{ParseArgs, country_counts, with_overrides};
use crate::conf::ShoplogConfig;
use crate::enrichment::geoip::{ClientCountry, CountryLookup, RESERVED_COUNTRY};
use crate::parse::ClientId;
use pretty_assertions::assert_eq;

fn args() -> ParseArgs {
    ParseArgs {
        inputs: vec!["access.log".to_string()],
        config: None,
        workers: None,
        level_marker: None,
        json: false,
        yaml: false,
        countries: false,
    }
}

fn entry(client: &str, country: CountryLookup) -> ClientCountry {
    ClientCountry {
        client_id: ClientId::from(client),
        country,
    }
}

#[test]
fn flags_override_config() {
    // Arrange
    let args = ParseArgs {
        workers: Some(8),
        level_marker: Some("DEBUG".to_string()),
        ..args()
    };

    // Act
    let cfg = with_overrides(&args, &ShoplogConfig::default());

    // Assert
    assert_eq!(cfg.parser.workers, 8);
    assert_eq!(cfg.parser.level_marker, "DEBUG");
}

#[test]
fn config_applies_without_flags() {
    // Arrange
    let mut base = ShoplogConfig::default();
    base.parser.workers = 3;

    // Act
    let cfg = with_overrides(&args(), &base);

    // Assert
    assert_eq!(cfg, base);
}

#[test]
fn country_counts_are_sorted_by_frequency_then_name() {
    // Arrange
    let countries = vec![
        entry("1.1.1.1", CountryLookup::Named("Japan".to_string())),
        entry("2.2.2.2", CountryLookup::Named("Brazil".to_string())),
        entry("3.3.3.3", CountryLookup::Named("Japan".to_string())),
        entry("10.0.0.1", CountryLookup::Reserved),
    ];

    // Act
    let counts = country_counts(&countries);

    // Assert
    assert_eq!(
        counts,
        vec![
            ("Japan".to_string(), 2),
            ("Brazil".to_string(), 1),
            (RESERVED_COUNTRY.to_string(), 1),
        ]
    );
}
