use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;

use crate::cli::output;
use crate::config::{self, StatuslineConfig, LOCAL_FILES};

/// Arguments for the `ccsl init` subcommand.
#[derive(ClapArgs, Debug, Default)]
pub struct Args {
    /// Write the global config instead of a project `.ccslrc.toml`
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Write the default configuration as TOML.
pub fn run(args: Args) -> Result<()> {
    let path = if args.global {
        config::global_path()?
    } else {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        cwd.join(LOCAL_FILES[0])
    };

    let existing = existing_config(&path, args.global);
    if let Some(existing) = existing.filter(|_| !args.force) {
        bail!(
            "{} already exists. Use --force to overwrite.",
            existing.display()
        );
    }

    config::save(&path, &StatuslineConfig::default())
        .with_context(|| format!("failed to write {}", path.display()))?;
    output::success(&format!("Wrote default config to {}", path.display()));
    output::info("Edit it, or try `ccsl themes --preview` and `ccsl theme <name>`.");
    Ok(())
}

/// Any config already sitting where `path` would go. For a project config
/// every local spelling counts.
fn existing_config(path: &Path, global: bool) -> Option<PathBuf> {
    if global {
        return path.is_file().then(|| path.to_path_buf());
    }
    let dir = path.parent()?;
    LOCAL_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}
