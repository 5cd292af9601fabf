use std::io::Read;

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::config::{self, StatuslineConfig};
use crate::statusline::{self, RESET};

/// Entry point for the render path. Wraps `run_inner` in `catch_unwind` so
/// that panics are swallowed and the process always exits 0 with one line.
pub fn run(global: &GlobalArgs) -> Result<()> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_inner(global)));

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => {
            tracing::debug!(%err, "render failed");
            println!();
            Ok(())
        }
        Err(_) => {
            tracing::debug!("render panicked");
            println!();
            Ok(())
        }
    }
}

fn run_inner(global: &GlobalArgs) -> Result<()> {
    // The host pipes stdout, so colored would switch itself off. Force it on
    // unless the user opted out.
    let color = !global.color_disabled();
    colored::control::set_override(color);

    let config = config::load_or_default(global.config.as_deref());
    let raw = read_stdin()?;

    println!("{}", render_bytes(&raw, &config, color));
    Ok(())
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().lock().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Raw stdin bytes to the final line. Anything that is not a usable snapshot
/// yields an empty line.
pub fn render_bytes(raw: &[u8], config: &StatuslineConfig, color: bool) -> String {
    let Ok(text) = std::str::from_utf8(raw) else {
        tracing::debug!("stdin is not valid UTF-8");
        return String::new();
    };
    match statusline::parse(text) {
        Some(snapshot) => finish_line(statusline::compose(&snapshot, config), color),
        None => String::new(),
    }
}

/// Drop the leading reset when colors are off so the line carries no escape
/// bytes at all.
pub fn finish_line(line: String, color: bool) -> String {
    if color {
        return line;
    }
    match line.strip_prefix(RESET) {
        Some(rest) => rest.to_string(),
        None => line,
    }
}
