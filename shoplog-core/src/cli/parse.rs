use crate::cli::{print_json, print_yaml};
use crate::conf::types::GeoipConfig;
use crate::conf::{ShoplogConfig, discover_inputs, validate_config};
use crate::enrichment::geoip::{ClientCountry, CountryResolver};
use crate::parse::{LogParser, ParsedLog, ParserOptions};
use ahash::AHashMap;
use anyhow::{Result, bail};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Log files or glob patterns
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Derivation threads (overrides parser.workers)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Level token preceding the client id (overrides parser.level_marker)
    #[arg(long)]
    pub level_marker: Option<String>,

    /// Output as JSON
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    /// Output as YAML
    #[arg(long)]
    pub yaml: bool,

    /// Resolve client countries (requires geoip in config)
    #[arg(long)]
    pub countries: bool,
}

#[derive(Serialize)]
pub struct ParseReport<'a> {
    pub input: &'a Path,
    #[serde(flatten)]
    pub parsed: &'a ParsedLog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<ClientCountry>>,
}

pub fn run(args: &ParseArgs, cfg: &ShoplogConfig) -> Result<()> {
    let cfg = with_overrides(args, cfg);
    validate_config(&cfg)?;

    let inputs = discover_inputs(&args.inputs)?;
    let parser = LogParser::new(&ParserOptions::from(&cfg.parser));
    let resolver = if args.countries {
        Some(open_resolver(&cfg.geoip)?)
    } else {
        None
    };

    for path in &inputs {
        let parsed = parser.parse_file(path)?;
        let report = ParseReport {
            input: path,
            parsed: &parsed,
            countries: resolver.as_ref().map(|r| r.resolve_all(&parsed.clients)),
        };

        if args.yaml {
            print_yaml(&report)?;
        } else if args.json {
            print_json(&report)?;
        } else {
            print_summary(&report);
        }
    }

    Ok(())
}

pub fn with_overrides(args: &ParseArgs, cfg: &ShoplogConfig) -> ShoplogConfig {
    let mut cfg = cfg.clone();
    if let Some(workers) = args.workers {
        cfg.parser.workers = workers;
    }
    if let Some(marker) = &args.level_marker {
        cfg.parser.level_marker = marker.clone();
    }
    cfg
}

fn open_resolver(cfg: &GeoipConfig) -> Result<CountryResolver> {
    let Some(path) = cfg.country_db.as_deref().filter(|_| cfg.enable) else {
        bail!("--countries requires geoip.enable and geoip.country_db in the config");
    };
    Ok(CountryResolver::open(path)?)
}

fn print_summary(report: &ParseReport<'_>) {
    let parsed = report.parsed;
    let paid = parsed.paid_carts().count();

    println!("{} {}", "✔".green(), report.input.display().bold());
    println!("{} {} clients", "✔".green(), parsed.clients.len());
    println!(
        "{} {} categories ({} items)",
        "✔".green(),
        parsed.categories.len(),
        parsed.categories.item_count()
    );
    println!(
        "{} {} carts ({} paid, {} abandoned)",
        "✔".green(),
        parsed.carts.len(),
        paid,
        parsed.carts.len() - paid
    );
    println!("{} {} cart requests", "✔".green(), parsed.cart_requests.len());
    println!("{} {} goods views", "✔".green(), parsed.goods_views.len());

    if let Some(countries) = &report.countries {
        println!("{} countries:", "✔".green());
        for (country, clients) in country_counts(countries) {
            println!("  - {country}: {clients}");
        }
    }
    println!();
}

/// Clients per country, most common first.
pub fn country_counts(countries: &[ClientCountry]) -> Vec<(String, usize)> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for entry in countries {
        *counts.entry(entry.country.name()).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
