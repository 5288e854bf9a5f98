use crate::cli::{print_json, print_yaml};
use crate::conf::{DEFAULT_CONFIG_PATH, load_config_or_default};
use std::path::Path;

/// Prints the resolved config. A missing file at the default path dumps the
/// built-in defaults.
pub fn dump(path: &Path, json: bool, yaml: bool) -> anyhow::Result<()> {
    let explicit = (path != Path::new(DEFAULT_CONFIG_PATH)).then_some(path);
    let cfg = load_config_or_default(explicit)?;

    if yaml && !json {
        print_yaml(&cfg)
    } else {
        print_json(&cfg)
    }
}
