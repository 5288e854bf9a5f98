use crate::conf::ShoplogConfig;
use crate::parse::{ClientGroups, LogParser, ParserOptions};
use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const ALL_LINES_FILE: &str = "logs_sorted_by_client.txt";
pub const CART_LINES_FILE: &str = "logs_sorted_by_client_only_carts.txt";

#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Log file to group
    pub input: PathBuf,

    /// Directory receiving the grouped dumps
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &GroupArgs, cfg: &ShoplogConfig) -> Result<()> {
    let parser = LogParser::new(&ParserOptions::from(&cfg.parser));
    let groups = parser.group_file(&args.input)?;

    let (all, carts) = write_dumps(&groups, &args.out_dir)?;

    println!(
        "{} grouped {} lines from {} clients",
        "✔".green(),
        groups.line_count(),
        groups.len()
    );
    println!("  - {}", all.display());
    println!("  - {} ({} cart lines)", carts.display(), groups.cart_line_count());

    Ok(())
}

/// Writes both grouped views into `out_dir`, returning their paths.
pub fn write_dumps(groups: &ClientGroups, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let all = out_dir.join(ALL_LINES_FILE);
    let carts = out_dir.join(CART_LINES_FILE);

    write_file(&all, |w| groups.write_all_lines(w))?;
    write_file(&carts, |w| groups.write_cart_lines(w))?;

    Ok((all, carts))
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()?;
    Ok(())
}
