use crate::conf::error::ConfigError;
use glob::glob;
use std::path::PathBuf;

/// Expands input patterns into log files.
///
/// Each pattern is a plain path or a glob (e.g. `"logs/**/*.log"`). Matches of
/// one pattern are sorted; patterns keep their order and duplicates are
/// dropped. A pattern that matches no file is an error.
///
/// # Errors
///
/// Returns `ConfigError::Glob` if a pattern is malformed, and
/// `ConfigError::NoInputs` if a pattern matches nothing.
pub fn discover_inputs(patterns: &[String]) -> Result<Vec<PathBuf>, ConfigError> {
    let mut inputs: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let mut paths: Vec<_> = glob(pattern)
            .map_err(|e| ConfigError::Glob {
                pattern: pattern.to_string(),
                source: e,
            })?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();

        if paths.is_empty() {
            return Err(ConfigError::NoInputs {
                pattern: pattern.to_string(),
            });
        }

        paths.sort();
        for path in paths {
            if !inputs.contains(&path) {
                inputs.push(path);
            }
        }
    }

    Ok(inputs)
}
