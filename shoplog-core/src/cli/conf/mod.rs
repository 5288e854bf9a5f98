mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Print only the error text
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Write a starter config file into a directory
    Init {
        /// Directory receiving shoplog.hcl
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain } => check(&path, plain),
        ConfigCmd::Dump { path, json, yaml } => dump(&path, json, yaml),
        ConfigCmd::Init { path } => init(&path).map(|_| ()),
    }
}
