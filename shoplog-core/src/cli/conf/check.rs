use crate::conf::{ConfigError, load_config};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn check(path: &Path, plain: bool) -> anyhow::Result<()> {
    match load_config(path) {
        Ok(cfg) => {
            let tick = "✔".green();
            println!("{tick} Config loaded successfully");
            println!(
                "{tick} parser: level marker '{}', {} worker(s)",
                cfg.parser.level_marker, cfg.parser.workers
            );
            match (cfg.geoip.enable, &cfg.geoip.country_db) {
                (true, Some(db)) => println!("{tick} geoip: {}", db.display()),
                _ => println!("{tick} geoip: disabled"),
            }
            match &cfg.logging.file {
                Some(file) => println!("{tick} logging: {} -> {}", cfg.logging.level, file.display()),
                None => println!("{tick} logging: {} -> stderr", cfg.logging.level),
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(&err, plain);
            std::process::exit(1);
        }
    }
}

pub fn print_config_error(err: &ConfigError, plain: bool) {
    if plain {
        eprintln!("{err}");
        return;
    }

    eprintln!();
    eprintln!("{}: {err}", "error".red().bold());
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // Parser block
        //---------------------------------------------------------------------
        ConfigError::InvalidWorkers { .. } => Some(
            "The parser needs at least one worker thread.\n\
             \n\
             Example:\n\
             \n\
             parser {\n\
             \x20 workers = 4\n\
             }",
        ),

        ConfigError::InvalidLevelMarker { .. } => Some(
            "The level marker is the single token before `: <client_id>` on every log line.\n\
             \n\
             Example:\n\
             \n\
             parser {\n\
             \x20 level_marker = \"INFO\"\n\
             }",
        ),

        //---------------------------------------------------------------------
        // GeoIP block
        //---------------------------------------------------------------------
        ConfigError::MissingGeoipDatabase => Some(
            "Country lookups need a MaxMind country database.\n\
             \n\
             Example:\n\
             \n\
             geoip {\n\
             \x20 enable     = true\n\
             \x20 country_db = \"/var/lib/geoip/GeoLite2-Country.mmdb\"\n\
             }",
        ),

        //---------------------------------------------------------------------
        // Inputs
        //---------------------------------------------------------------------
        ConfigError::NoInputs { .. } => Some(
            "Inputs may be file paths or glob patterns such as \"logs/**/*.log\".\n\
             \n\
             Quote glob patterns so the shell does not expand them first.",
        ),

        ConfigError::ReadFile { .. } => Some(
            "Create a starter config with:\n\
             \n\
             shoplog config init",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
