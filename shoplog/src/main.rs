use clap::{Parser, Subcommand};
use shoplog_core::cli;
use shoplog_core::cli::conf::print_config_error;
use shoplog_core::conf::{ConfigError, ShoplogConfig, load_config_or_default};
use shoplog_core::logging::init_logging;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "shoplog",
    version,
    about = "shoplog: reconstruct shop activity from access logs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse logs into categories, carts, cart requests and goods views
    Parse(cli::parse::ParseArgs),

    /// Write the client-grouped views of a log
    Group(cli::group::GroupArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => {
            let cfg = load_or_exit(args.config.as_deref());
            let _guard = init_logging(&cfg.logging);
            cli::parse::run(&args, &cfg)
        }

        Command::Group(args) => {
            let cfg = load_or_exit(args.config.as_deref());
            let _guard = init_logging(&cfg.logging);
            cli::group::run(&args, &cfg)
        }

        Command::Config { cmd } => {
            let _guard = init_logging(&ShoplogConfig::default().logging);
            cli::conf::run(cmd)
        }
    };

    if let Err(e) = result {
        match e.downcast_ref::<ConfigError>() {
            Some(err) => print_config_error(err, false),
            None => eprintln!("shoplog error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn load_or_exit(path: Option<&Path>) -> ShoplogConfig {
    match load_config_or_default(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            print_config_error(&err, false);
            std::process::exit(1);
        }
    }
}
