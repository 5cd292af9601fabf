use serde::{Deserialize, Serialize};

use crate::statusline::icons::IconMode;
use crate::statusline::theme::{Theme, DEFAULT_THEME};

/// Widgets shown when the configuration does not list any.
pub const DEFAULT_WIDGETS: &[&str] = &["model", "context", "tokens", "cost"];

/// Default separator between visible widgets.
pub const DEFAULT_SEPARATOR: &str = " \u{2502} ";

/// User-configurable statusline settings.
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatuslineConfig {
    /// Built-in theme name. Ignored when `custom_theme` is set.
    pub theme: String,

    /// Widget ids in display order. Unknown ids render nothing.
    pub widgets: Vec<String>,

    pub separator: String,

    pub icons: IconMode,

    /// Spaces added on both sides of the line.
    pub padding: usize,

    #[serde(alias = "customTheme", skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,
}

impl Default for StatuslineConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            widgets: DEFAULT_WIDGETS.iter().map(|w| w.to_string()).collect(),
            separator: DEFAULT_SEPARATOR.to_string(),
            icons: IconMode::Auto,
            padding: 1,
            custom_theme: None,
        }
    }
}
