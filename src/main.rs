mod cli;
mod config;
mod error;
mod statusline;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.global.log_level.as_deref());
    let global = cli.global;

    match cli.command {
        None if std::io::stdin().is_terminal() => cli::preview::run(&global, Default::default()),
        None | Some(Command::Render) => cli::render::run(&global),
        Some(Command::Preview(args)) => cli::preview::run(&global, args),
        Some(Command::Themes(args)) => cli::themes::list(&global, args),
        Some(Command::Theme(args)) => cli::themes::set(&global, args),
        Some(Command::Init(args)) => cli::init::run(args),
        Some(Command::Install(args)) => cli::install::run_install(args),
        Some(Command::Uninstall) => cli::install::run_uninstall(),
    }
}
