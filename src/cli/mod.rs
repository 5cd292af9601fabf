pub mod init;
pub mod install;
pub mod output;
pub mod preview;
pub mod render;
pub mod themes;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Themeable status line for Claude Code
#[derive(Parser)]
#[command(name = "ccsl", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Without a subcommand: render from stdin, or preview when stdin is a terminal.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file to use instead of discovery
    #[arg(long, global = true, env = "CCSL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Logging verbosity for stderr: off, error, warn, info, debug
    #[arg(long, global = true, env = "CCSL_LOG")]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    pub fn color_disabled(&self) -> bool {
        self.no_color || std::env::var("NO_COLOR").is_ok()
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a session snapshot from stdin and print the status line
    Render,

    /// Print the status line for built-in sample data
    Preview(preview::Args),

    /// List the built-in themes
    Themes(themes::ListArgs),

    /// Switch the project config to a built-in theme
    Theme(themes::SetArgs),

    /// Write a default config file
    Init(init::Args),

    /// Register ccsl as the status line command in Claude Code settings
    Install(install::Args),

    /// Remove the status line entry from Claude Code settings
    Uninstall,
}

/// Set up the stderr tracing subscriber. Logging is off unless asked for so
/// the host never sees noise from the render path.
pub fn init_logging(level: Option<&str>) {
    let filter = match level.unwrap_or("off") {
        "off" => "off",
        "error" => "error",
        "warn" => "warn",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        other => {
            eprintln!("warning: unknown log level '{}', logging disabled", other);
            "off"
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
