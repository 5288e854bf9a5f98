use crate::conf::error::ConfigError;
use crate::conf::types::ShoplogConfig;

pub fn validate_config(cfg: &ShoplogConfig) -> Result<(), ConfigError> {
    if cfg.parser.workers == 0 {
        return Err(ConfigError::InvalidWorkers {
            workers: cfg.parser.workers,
        });
    }

    let marker = &cfg.parser.level_marker;
    if marker.is_empty() || marker.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidLevelMarker {
            marker: marker.clone(),
        });
    }

    if cfg.geoip.enable && cfg.geoip.country_db.is_none() {
        return Err(ConfigError::MissingGeoipDatabase);
    }

    Ok(())
}
