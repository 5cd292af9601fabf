//! Terminal glyph capability detection.
//!
//! A heuristic over environment variables. It never fails: a terminal that
//! gives no recognizable signal is treated as ASCII-only.

use std::sync::OnceLock;

/// How rich a glyph set the terminal is assumed to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Nerd,
    Unicode,
    Ascii,
}

/// `TERM_PROGRAM` values of terminals that usually ship with a Nerd Font.
const NERD_FONT_TERMINALS: &[&str] = &["iTerm.app", "WezTerm", "Alacritty", "kitty", "Hyper", "Tabby"];

/// Raw environment values consulted by [`detect_from`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSignals<'a> {
    pub nerd_font: Option<&'a str>,
    pub term_program: Option<&'a str>,
    pub term: Option<&'a str>,
}

/// Detect the capability of the current terminal. Computed once per process.
pub fn detect() -> Capability {
    static DETECTED: OnceLock<Capability> = OnceLock::new();
    *DETECTED.get_or_init(|| {
        let nerd_font = std::env::var("NERD_FONT").ok();
        let term_program = std::env::var("TERM_PROGRAM").ok();
        let term = std::env::var("TERM").ok();
        let capability = detect_from(EnvSignals {
            nerd_font: nerd_font.as_deref(),
            term_program: term_program.as_deref(),
            term: term.as_deref(),
        });
        tracing::debug!(?capability, "detected terminal glyph capability");
        capability
    })
}

/// Classify explicit environment values. Priority: `NERD_FONT` override,
/// known terminal program, high-color `TERM`, then ASCII.
pub fn detect_from(signals: EnvSignals<'_>) -> Capability {
    if signals.nerd_font.is_some_and(env_truthy) {
        return Capability::Nerd;
    }

    let term_program = signals.term_program.unwrap_or("");
    if NERD_FONT_TERMINALS.iter().any(|t| term_program.contains(t)) {
        return Capability::Nerd;
    }

    let term = signals.term.unwrap_or("");
    if term.contains("256color") || term.contains("truecolor") {
        return Capability::Unicode;
    }

    Capability::Ascii
}

fn env_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
