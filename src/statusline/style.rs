use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Declarative text style: hex colors plus weight/decoration flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dim: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Style {
    /// A style with only a foreground color.
    pub fn fg(hex: &str) -> Self {
        Style {
            fg: Some(hex.to_string()),
            ..Style::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// Apply `style` to `text`. `None` returns the text unchanged.
///
/// Every attribute is an independent SGR parameter, so the order in which
/// they are applied does not change the output. Invalid hex colors are
/// skipped; the remaining attributes still apply. Honors the global
/// `colored` override, so disabling color yields plain text.
pub fn paint(text: &str, style: Option<&Style>) -> String {
    let Some(style) = style else {
        return text.to_string();
    };
    if text.is_empty() {
        return String::new();
    }

    let mut out = text.normal();
    if let Some((r, g, b)) = style.fg.as_deref().and_then(parse_hex) {
        out = out.truecolor(r, g, b);
    }
    if let Some((r, g, b)) = style.bg.as_deref().and_then(parse_hex) {
        out = out.on_truecolor(r, g, b);
    }
    if style.bold {
        out = out.bold();
    }
    if style.dim {
        out = out.dimmed();
    }
    if style.italic {
        out = out.italic();
    }
    if style.underline {
        out = out.underline();
    }
    out.to_string()
}

/// Parse `#rrggbb`, `rrggbb`, or the short `#rgb` form.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&digits[0..1], 16).ok()?;
            let g = u8::from_str_radix(&digits[1..2], 16).ok()?;
            let b = u8::from_str_radix(&digits[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_style_is_identity() {
        assert_eq!(paint("Opus", None), "Opus");
        assert_eq!(paint("", None), "");
    }

    #[test]
    fn test_paint_with_color_disabled_is_plain() {
        colored::control::set_override(false);
        let style = Style::fg("#ff0000").bold().underline();
        assert_eq!(paint("critical", Some(&style)), "critical");
    }

    #[test]
    fn test_paint_does_not_mutate_style() {
        colored::control::set_override(false);
        let style = Style::fg("#00ffff").bold();
        let before = style.clone();
        let _ = paint("text", Some(&style));
        assert_eq!(style, before);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#00ffff"), Some((0, 255, 255)));
        assert_eq!(parse_hex("E06C75"), Some((0xe0, 0x6c, 0x75)));
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("#12"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn test_style_builder() {
        let style = Style::fg("#444444").dim();
        assert_eq!(style.fg.as_deref(), Some("#444444"));
        assert!(style.dim);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_from_json() {
        let style: Style = serde_json::from_str(r##"{"fg": "#3b82f6", "bold": true}"##).unwrap();
        assert_eq!(style, Style::fg("#3b82f6").bold());
    }
}
