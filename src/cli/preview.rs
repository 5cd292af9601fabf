use std::io::IsTerminal;

use anyhow::Result;
use clap::Args as ClapArgs;

use crate::cli::render::finish_line;
use crate::cli::{install, output, GlobalArgs};
use crate::config::{self, StatuslineConfig};
use crate::error::CcslError;
use crate::statusline::sample::sample_snapshot;
use crate::statusline::{compose, theme};

/// Arguments for the `ccsl preview` subcommand.
#[derive(ClapArgs, Debug, Default)]
pub struct Args {
    /// Preview a built-in theme instead of the configured one
    #[arg(long)]
    pub theme: Option<String>,
}

pub fn run(global: &GlobalArgs, args: Args) -> Result<()> {
    let color = preview_colors(global);
    let mut config = load_config_reporting(global);

    if let Some(name) = args.theme {
        if !theme::is_known(&name) {
            return Err(CcslError::UnknownTheme(name).into());
        }
        config.theme = name;
        config.custom_theme = None;
    }

    let label = match &config.custom_theme {
        Some(custom) => format!("custom theme '{}'", custom.name),
        None => format!("theme '{}'", config.theme),
    };
    output::header(&format!("ccsl preview ({}, icons {})", label, config.icons));
    println!("{}", preview_line(&config, color));

    if !install::is_installed_on_disk() {
        output::info("Not registered with Claude Code yet; run `ccsl install`.");
    }
    Ok(())
}

/// The configured line rendered against the built-in sample snapshot.
pub fn preview_line(config: &StatuslineConfig, color: bool) -> String {
    finish_line(compose(&sample_snapshot(), config), color)
}

/// Interactive commands color only when stdout is a terminal.
pub fn preview_colors(global: &GlobalArgs) -> bool {
    let color = !global.color_disabled() && std::io::stdout().is_terminal();
    colored::control::set_override(color);
    color
}

/// Like the render-path loader, but a broken config file is reported.
pub fn load_config_reporting(global: &GlobalArgs) -> StatuslineConfig {
    config::load_discovered(global.config.as_deref()).unwrap_or_else(|err| {
        output::warning(&format!("{}; using defaults", err));
        StatuslineConfig::default()
    })
}
