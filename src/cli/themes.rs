use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use colored::Colorize;

use crate::cli::preview::{load_config_reporting, preview_colors, preview_line};
use crate::cli::{output, GlobalArgs};
use crate::config::{self, StatuslineConfig};
use crate::error::CcslError;
use crate::statusline::theme;

/// Arguments for `ccsl themes`.
#[derive(ClapArgs, Debug, Default)]
pub struct ListArgs {
    /// Render the sample line under each theme
    #[arg(long)]
    pub preview: bool,
}

/// Arguments for `ccsl theme <name>`.
#[derive(ClapArgs, Debug)]
pub struct SetArgs {
    /// Built-in theme name (see `ccsl themes`)
    pub name: String,
}

/// List built-in themes on stdout, marking the active one.
pub fn list(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let color = preview_colors(global);
    let config = load_config_reporting(global);
    let active = config.custom_theme.is_none().then_some(config.theme.as_str());

    for name in theme::names() {
        println!("{}", theme_row(name, active == Some(*name)));
        if args.preview {
            let sample = StatuslineConfig {
                theme: name.to_string(),
                custom_theme: None,
                ..config.clone()
            };
            println!("    {}", preview_line(&sample, color));
        }
    }
    if let Some(custom) = &config.custom_theme {
        output::info(&format!("Active: custom theme '{}' from config", custom.name));
    }
    Ok(())
}

fn theme_row(name: &str, active: bool) -> String {
    let marker = if active { "*" } else { " " };
    format!("{} {} {}", marker, format!("{:<12}", name).bold(), theme::describe(name))
}

/// Persist `name` as the theme in the project config and show the result.
pub fn set(global: &GlobalArgs, args: SetArgs) -> Result<()> {
    if !theme::is_known(&args.name) {
        return Err(CcslError::UnknownTheme(args.name).into());
    }

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let path = config::local_path(&cwd);
    let mut updated = if path.is_file() {
        config::load(&path).with_context(|| format!("failed to read {}", path.display()))?
    } else {
        config::load_discovered(global.config.as_deref())?
    };

    if updated.custom_theme.take().is_some() {
        output::info("Removed inline custom theme so the named theme takes effect.");
    }
    updated.theme = args.name;

    config::save(&path, &updated).with_context(|| format!("failed to write {}", path.display()))?;
    output::success(&format!("Theme set to '{}' in {}", updated.theme, path.display()));

    let color = preview_colors(global);
    println!("{}", preview_line(&updated, color));
    Ok(())
}
