mod discover;
mod error;
mod loader;
pub mod types;
mod validate;


pub use discover::discover_inputs;
pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_PATH, load_config, load_config_or_default};
pub use types::ShoplogConfig;
pub use validate::validate_config;
