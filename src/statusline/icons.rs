use serde::{Deserialize, Serialize};

use super::capability::{self, Capability};
use super::theme::Theme;

/// Configured icon set. `Auto` defers to terminal capability detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMode {
    #[default]
    Auto,
    Nerd,
    Unicode,
    Ascii,
}

impl IconMode {
    /// Resolve `Auto` through the capability detector.
    pub fn effective(self) -> Capability {
        match self {
            IconMode::Auto => capability::detect(),
            IconMode::Nerd => Capability::Nerd,
            IconMode::Unicode => Capability::Unicode,
            IconMode::Ascii => Capability::Ascii,
        }
    }
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Auto => write!(f, "auto"),
            IconMode::Nerd => write!(f, "nerd"),
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::Ascii => write!(f, "ascii"),
        }
    }
}

/// Semantic slot a glyph is looked up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKey {
    Model,
    Context,
    Tokens,
    Cost,
    Duration,
    Lines,
    Directory,
    Version,
    Usage,
    #[serde(alias = "resetTime")]
    ResetTime,
}

/// Glyph for `key`. A non-empty theme override wins; otherwise the table for
/// `mode` (after resolving `Auto`) is consulted.
pub fn icon(key: IconKey, theme: &Theme, mode: IconMode) -> String {
    if let Some(glyph) = theme.icons.get(&key).filter(|g| !g.is_empty()) {
        return glyph.clone();
    }
    glyph(key, mode.effective()).to_string()
}

/// Built-in glyph for `key` in the given capability class. May be empty.
pub fn glyph(key: IconKey, capability: Capability) -> &'static str {
    match capability {
        Capability::Nerd => nerd_glyph(key),
        Capability::Unicode => unicode_glyph(key),
        Capability::Ascii => ascii_glyph(key),
    }
}

fn nerd_glyph(key: IconKey) -> &'static str {
    match key {
        IconKey::Model => "\u{25C8}",
        IconKey::Context => "\u{25D0}",
        IconKey::Tokens => "\u{F0284}",
        IconKey::Cost => "$",
        IconKey::Duration => "\u{23F1}",
        IconKey::Lines => "\u{B1}",
        IconKey::Directory => "\u{F07C}",
        IconKey::Version => "v",
        IconKey::Usage => "\u{F0E4}",
        IconKey::ResetTime => "\u{F017}",
    }
}

fn unicode_glyph(key: IconKey) -> &'static str {
    match key {
        IconKey::Model => "\u{25C8}",
        IconKey::Context => "\u{25D0}",
        IconKey::Tokens => "\u{21C5}",
        IconKey::Cost => "$",
        IconKey::Duration => "\u{23F1}",
        IconKey::Lines => "\u{B1}",
        IconKey::Directory => "\u{1F4C1}",
        IconKey::Version => "v",
        IconKey::Usage => "\u{25D4}",
        IconKey::ResetTime => "\u{21BB}",
    }
}

fn ascii_glyph(key: IconKey) -> &'static str {
    match key {
        IconKey::Model => "*",
        IconKey::Context => "%",
        IconKey::Cost => "$",
        IconKey::Version => "v",
        IconKey::Tokens
        | IconKey::Duration
        | IconKey::Lines
        | IconKey::Directory
        | IconKey::Usage
        | IconKey::ResetTime => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statusline::theme;

    #[test]
    fn test_ascii_table() {
        let t = theme::resolve("neon");
        assert_eq!(icon(IconKey::Model, &t, IconMode::Ascii), "*");
        assert_eq!(icon(IconKey::Context, &t, IconMode::Ascii), "%");
        assert_eq!(icon(IconKey::Tokens, &t, IconMode::Ascii), "");
    }

    #[test]
    fn test_unicode_table() {
        let t = theme::resolve("neon");
        assert_eq!(icon(IconKey::Tokens, &t, IconMode::Unicode), "\u{21C5}");
        assert_eq!(icon(IconKey::Version, &t, IconMode::Unicode), "v");
    }

    #[test]
    fn test_theme_override_wins() {
        let mut t = theme::resolve("neon");
        t.icons.insert(IconKey::Model, ">>".to_string());
        assert_eq!(icon(IconKey::Model, &t, IconMode::Ascii), ">>");
        assert_eq!(icon(IconKey::Model, &t, IconMode::Nerd), ">>");
        assert_eq!(icon(IconKey::Model, &t, IconMode::Auto), ">>");
    }

    #[test]
    fn test_empty_theme_override_falls_through() {
        let mut t = theme::resolve("neon");
        t.icons.insert(IconKey::Model, String::new());
        assert_eq!(icon(IconKey::Model, &t, IconMode::Ascii), "*");
    }

    #[test]
    fn test_ascii_glyphs_are_ascii() {
        let keys = [
            IconKey::Model,
            IconKey::Context,
            IconKey::Tokens,
            IconKey::Cost,
            IconKey::Duration,
            IconKey::Lines,
            IconKey::Directory,
            IconKey::Version,
            IconKey::Usage,
            IconKey::ResetTime,
        ];
        for key in keys {
            assert!(glyph(key, Capability::Ascii).is_ascii(), "{:?}", key);
        }
    }

    #[test]
    fn test_icon_key_accepts_camel_case_alias() {
        let key: IconKey = serde_json::from_str(r#""resetTime""#).unwrap();
        assert_eq!(key, IconKey::ResetTime);
        let key: IconKey = serde_json::from_str(r#""reset_time""#).unwrap();
        assert_eq!(key, IconKey::ResetTime);
    }

    #[test]
    fn test_icon_mode_from_json() {
        let mode: IconMode = serde_json::from_str(r#""nerd""#).unwrap();
        assert_eq!(mode, IconMode::Nerd);
        assert_eq!(mode.effective(), Capability::Nerd);
        assert_eq!(IconMode::default().to_string(), "auto");
    }
}
