use crate::conf::error::ConfigError;
use crate::conf::types::ShoplogConfig;
use crate::conf::validate::validate_config;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "shoplog.hcl";

/// Reads, parses and validates a config file. The file must exist.
pub fn load_config(path: &Path) -> Result<ShoplogConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg: ShoplogConfig = hcl::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Semantic validation
    //--------------------------------------------------------------------------
    validate_config(&cfg)?;

    Ok(cfg)
}

/// Loads `path` when given; otherwise the default path, falling back to
/// built-in defaults when no file exists there.
pub fn load_config_or_default(path: Option<&Path>) -> Result<ShoplogConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    match load_config(Path::new(DEFAULT_CONFIG_PATH)) {
        Err(ConfigError::ReadFile { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(ShoplogConfig::default())
        }
        other => other,
    }
}
