//! Built-in theme catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::icons::IconKey;
use super::style::Style;

/// Name of the theme used when a lookup misses.
pub const DEFAULT_THEME: &str = "minimal";

/// Registered theme names, in display order.
const THEME_NAMES: &[&str] = &["neon", "rainbow", "ocean", "minimal", "monochrome", "corporate"];

/// Named bundle of per-widget styles and optional icon overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub icons: BTreeMap<IconKey, String>,
}

/// Per-widget styles. Missing tier entries fall back to the base entry at
/// render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Style>,
    #[serde(alias = "contextHigh", skip_serializing_if = "Option::is_none")]
    pub context_high: Option<Style>,
    #[serde(alias = "contextCritical", skip_serializing_if = "Option::is_none")]
    pub context_critical: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Style>,
    #[serde(alias = "linesAdded", skip_serializing_if = "Option::is_none")]
    pub lines_added: Option<Style>,
    #[serde(alias = "linesRemoved", skip_serializing_if = "Option::is_none")]
    pub lines_removed: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Style>,
    #[serde(alias = "usageHigh", skip_serializing_if = "Option::is_none")]
    pub usage_high: Option<Style>,
    #[serde(alias = "usageCritical", skip_serializing_if = "Option::is_none")]
    pub usage_critical: Option<Style>,
    #[serde(alias = "resetTime", skip_serializing_if = "Option::is_none")]
    pub reset_time: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<Style>,
}

/// All registered theme names, in display order.
pub fn names() -> &'static [&'static str] {
    THEME_NAMES
}

pub fn is_known(name: &str) -> bool {
    THEME_NAMES.contains(&name)
}

/// Look up a built-in theme, falling back to [`DEFAULT_THEME`].
pub fn resolve(name: &str) -> Theme {
    match name {
        "neon" => neon(),
        "rainbow" => rainbow(),
        "ocean" => ocean(),
        "monochrome" => monochrome(),
        "corporate" => corporate(),
        "minimal" => minimal(),
        other => {
            tracing::debug!(theme = other, "unknown theme; using {}", DEFAULT_THEME);
            minimal()
        }
    }
}

/// One-line description shown by `ccsl themes`.
pub fn describe(name: &str) -> &'static str {
    match name {
        "neon" => "Vibrant cyberpunk with electric colors",
        "rainbow" => "Colorful gradient transitions",
        "ocean" => "Cool blues and teals",
        "minimal" => "Clean, understated (default)",
        "monochrome" => "Pure grayscale",
        "corporate" => "Professional muted blues",
        _ => "",
    }
}

fn neon() -> Theme {
    Theme {
        name: "neon".to_string(),
        colors: ThemeColors {
            model: Some(Style::fg("#00ffff").bold()),
            context: Some(Style::fg("#ff00ff")),
            context_high: Some(Style::fg("#ffff00")),
            context_critical: Some(Style::fg("#ff0000").bold()),
            tokens: Some(Style::fg("#00ff00")),
            cost: Some(Style::fg("#ffff00")),
            duration: Some(Style::fg("#00aaff")),
            lines: Some(Style::fg("#ff6600")),
            lines_added: Some(Style::fg("#00ff00")),
            lines_removed: Some(Style::fg("#ff0066")),
            directory: Some(Style::fg("#00ffff")),
            version: Some(Style::fg("#aaaaff")),
            usage: Some(Style::fg("#ff00ff")),
            usage_high: Some(Style::fg("#ffff00")),
            usage_critical: Some(Style::fg("#ff0000").bold()),
            reset_time: Some(Style::fg("#00aaff")),
            separator: Some(Style::fg("#666666")),
        },
        icons: BTreeMap::new(),
    }
}

fn rainbow() -> Theme {
    Theme {
        name: "rainbow".to_string(),
        colors: ThemeColors {
            model: Some(Style::fg("#ff0000").bold()),
            context: Some(Style::fg("#ff7f00")),
            context_high: Some(Style::fg("#ffff00")),
            context_critical: Some(Style::fg("#ff0000").bold()),
            tokens: Some(Style::fg("#00ff00")),
            cost: Some(Style::fg("#0000ff")),
            duration: Some(Style::fg("#4b0082")),
            lines: Some(Style::fg("#9400d3")),
            lines_added: Some(Style::fg("#00ff00")),
            lines_removed: Some(Style::fg("#ff0000")),
            directory: Some(Style::fg("#ff7f00")),
            version: Some(Style::fg("#9400d3")),
            usage: Some(Style::fg("#00ff00")),
            usage_high: Some(Style::fg("#ffff00")),
            usage_critical: Some(Style::fg("#ff0000").bold()),
            reset_time: Some(Style::fg("#4b0082")),
            separator: Some(Style::fg("#888888")),
        },
        icons: BTreeMap::new(),
    }
}

fn ocean() -> Theme {
    Theme {
        name: "ocean".to_string(),
        colors: ThemeColors {
            model: Some(Style::fg("#00bcd4").bold()),
            context: Some(Style::fg("#2d8b8b")),
            context_high: Some(Style::fg("#4dd0e1")),
            context_critical: Some(Style::fg("#ff5252").bold()),
            tokens: Some(Style::fg("#80deea")),
            cost: Some(Style::fg("#4dd0e1")),
            duration: Some(Style::fg("#0288d1")),
            lines: Some(Style::fg("#26c6da")),
            lines_added: Some(Style::fg("#69f0ae")),
            lines_removed: Some(Style::fg("#ff5252")),
            directory: Some(Style::fg("#00bcd4")),
            version: Some(Style::fg("#80deea")),
            usage: Some(Style::fg("#2d8b8b")),
            usage_high: Some(Style::fg("#4dd0e1")),
            usage_critical: Some(Style::fg("#ff5252").bold()),
            reset_time: Some(Style::fg("#0288d1")),
            separator: Some(Style::fg("#37474f")),
        },
        icons: BTreeMap::new(),
    }
}

fn minimal() -> Theme {
    Theme {
        name: "minimal".to_string(),
        colors: ThemeColors {
            model: Some(Style::fg("#888888")),
            context: Some(Style::fg("#ffffff")),
            context_high: Some(Style::fg("#e5c07b")),
            context_critical: Some(Style::fg("#e06c75").bold()),
            tokens: Some(Style::fg("#666666").dim()),
            cost: Some(Style::fg("#61afef")),
            duration: Some(Style::fg("#666666").dim()),
            lines: Some(Style::fg("#abb2bf")),
            lines_added: Some(Style::fg("#98c379")),
            lines_removed: Some(Style::fg("#e06c75")),
            directory: Some(Style::fg("#888888")),
            version: Some(Style::fg("#5c6370")),
            usage: Some(Style::fg("#abb2bf")),
            usage_high: Some(Style::fg("#e5c07b")),
            usage_critical: Some(Style::fg("#e06c75").bold()),
            reset_time: Some(Style::fg("#666666").dim()),
            separator: Some(Style::fg("#444444")),
        },
        icons: BTreeMap::new(),
    }
}

fn monochrome() -> Theme {
    Theme {
        name: "monochrome".to_string(),
        colors: ThemeColors {
            model: Some(Style::fg("#ffffff").bold()),
            context: Some(Style::fg("#cccccc")),
            context_high: Some(Style::fg("#ffffff").bold()),
            context_critical: Some(Style::fg("#ffffff").bold().underline()),
            tokens: Some(Style::fg("#aaaaaa")),
            cost: Some(Style::fg("#999999")),
            duration: Some(Style::fg("#888888")),
            lines: Some(Style::fg("#777777")),
            lines_added: Some(Style::fg("#cccccc")),
            lines_removed: Some(Style::fg("#888888")),
            directory: Some(Style::fg("#aaaaaa")),
            version: Some(Style::fg("#666666")),
            usage: Some(Style::fg("#cccccc")),
            usage_high: Some(Style::fg("#ffffff").bold()),
            usage_critical: Some(Style::fg("#ffffff").bold().underline()),
            reset_time: Some(Style::fg("#888888")),
            separator: Some(Style::fg("#444444")),
        },
        icons: BTreeMap::new(),
    }
}

fn corporate() -> Theme {
    Theme {
        name: "corporate".to_string(),
        colors: ThemeColors {
            model: Some(Style::fg("#3b82f6").bold()),
            context: Some(Style::fg("#64748b")),
            context_high: Some(Style::fg("#f59e0b")),
            context_critical: Some(Style::fg("#ef4444").bold()),
            tokens: Some(Style::fg("#4682b4")),
            cost: Some(Style::fg("#6b7280")),
            duration: Some(Style::fg("#64748b")),
            lines: Some(Style::fg("#94a3b8")),
            lines_added: Some(Style::fg("#22c55e")),
            lines_removed: Some(Style::fg("#ef4444")),
            directory: Some(Style::fg("#3b82f6")),
            version: Some(Style::fg("#94a3b8")),
            usage: Some(Style::fg("#64748b")),
            usage_high: Some(Style::fg("#f59e0b")),
            usage_critical: Some(Style::fg("#ef4444").bold()),
            reset_time: Some(Style::fg("#64748b")),
            separator: Some(Style::fg("#334155")),
        },
        icons: BTreeMap::new(),
    }
}
