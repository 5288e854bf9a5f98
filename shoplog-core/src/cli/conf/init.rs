use crate::conf::DEFAULT_CONFIG_PATH;
use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use rust_embed::RustEmbed;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "config-templates/"]
pub struct ConfigTemplates;

/// Writes the starter config to `dir/shoplog.hcl`. Never overwrites.
pub fn init(dir: &Path) -> Result<PathBuf> {
    if dir.is_file() {
        bail!("{} exists and is not a directory", dir.display());
    }

    let target = dir.join(DEFAULT_CONFIG_PATH);
    if target.exists() {
        bail!("{} already exists", target.display());
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    fs::write(&target, template(DEFAULT_CONFIG_PATH)?.trim_start())
        .with_context(|| format!("failed to create {}", target.display()))?;

    println!("{} Created {}", "✔".green(), target.display());
    println!();
    println!("Next steps:");
    println!("  shoplog config check {}", target.display());
    println!("  shoplog parse --config {} 'logs/*.log'", target.display());

    Ok(target)
}

/// Fetch an embedded config template as UTF-8 text
pub fn template(path: &str) -> Result<String> {
    let file = ConfigTemplates::get(path)
        .with_context(|| format!("missing embedded config template: {path}"))?;

    let s =
        std::str::from_utf8(file.data.as_ref()).context("config template is not valid UTF-8")?;

    Ok(s.to_owned())
}
