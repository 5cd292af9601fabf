use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use super::capability::Capability;
use super::format::{format_cost, format_countdown, format_duration_ms, format_tokens};
use super::icons::{icon, IconKey};
use super::snapshot::Snapshot;
use super::style::{paint, Style};
use super::theme::{Theme, ThemeColors};
use crate::config::StatuslineConfig;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Output of one widget render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub visible: bool,
}

impl Fragment {
    pub fn hidden() -> Self {
        Fragment {
            text: String::new(),
            visible: false,
        }
    }

    pub fn shown(text: String) -> Self {
        Fragment {
            text,
            visible: true,
        }
    }
}

/// Every widget the registry knows. Configured identifiers that do not map
/// to a variant render nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Model,
    Context,
    Tokens,
    Cost,
    Duration,
    Lines,
    Directory,
    Version,
    Usage,
    ResetTime,
}

impl Widget {
    pub const ALL: [Widget; 10] = [
        Widget::Model,
        Widget::Context,
        Widget::Tokens,
        Widget::Cost,
        Widget::Duration,
        Widget::Lines,
        Widget::Directory,
        Widget::Version,
        Widget::Usage,
        Widget::ResetTime,
    ];

    /// Identifier used in configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Widget::Model => "model",
            Widget::Context => "context",
            Widget::Tokens => "tokens",
            Widget::Cost => "cost",
            Widget::Duration => "duration",
            Widget::Lines => "lines",
            Widget::Directory => "directory",
            Widget::Version => "version",
            Widget::Usage => "usage",
            Widget::ResetTime => "resetTime",
        }
    }

    pub fn from_id(id: &str) -> Option<Widget> {
        match id {
            "reset_time" => Some(Widget::ResetTime),
            _ => Widget::ALL.into_iter().find(|w| w.id() == id),
        }
    }

    fn icon_key(self) -> IconKey {
        match self {
            Widget::Model => IconKey::Model,
            Widget::Context => IconKey::Context,
            Widget::Tokens => IconKey::Tokens,
            Widget::Cost => IconKey::Cost,
            Widget::Duration => IconKey::Duration,
            Widget::Lines => IconKey::Lines,
            Widget::Directory => IconKey::Directory,
            Widget::Version => IconKey::Version,
            Widget::Usage => IconKey::Usage,
            Widget::ResetTime => IconKey::ResetTime,
        }
    }

    /// Render this widget. Invisible whenever its source fields are absent.
    pub fn render(self, snapshot: &Snapshot, theme: &Theme, config: &StatuslineConfig) -> Fragment {
        let ctx = RenderContext {
            theme,
            capability: config.icons.effective(),
            icon: icon(self.icon_key(), theme, config.icons),
        };
        match self {
            Widget::Model => render_model(snapshot, &ctx),
            Widget::Context => render_context(snapshot, &ctx),
            Widget::Tokens => render_tokens(snapshot, &ctx),
            Widget::Cost => render_cost(snapshot, &ctx),
            Widget::Duration => render_duration(snapshot, &ctx),
            Widget::Lines => render_lines(snapshot, &ctx),
            Widget::Directory => render_directory(snapshot, &ctx),
            Widget::Version => render_version(snapshot, &ctx),
            Widget::Usage => render_usage(snapshot, &ctx),
            Widget::ResetTime => render_reset_time(snapshot, &ctx, Utc::now()),
        }
    }
}

/// Per-call inputs shared by every renderer.
struct RenderContext<'a> {
    theme: &'a Theme,
    capability: Capability,
    icon: String,
}

impl RenderContext<'_> {
    fn colors(&self) -> &ThemeColors {
        &self.theme.colors
    }

    /// "icon text", or just "text" when the icon is empty.
    fn prefixed(&self, text: &str) -> String {
        if self.icon.is_empty() {
            text.to_string()
        } else {
            format!("{} {}", self.icon, text)
        }
    }
}

// ---------------------------------------------------------------------------
// Severity tiers
// ---------------------------------------------------------------------------

/// Color tier for bounded percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    High,
    Critical,
}

impl Severity {
    /// Context window: >= 80 critical, >= 60 high.
    pub fn for_context(percent: f64) -> Self {
        Self::classify(percent, 60.0, 80.0)
    }

    /// Plan quota: >= 90 critical, >= 70 high.
    pub fn for_usage(percent: f64) -> Self {
        Self::classify(percent, 70.0, 90.0)
    }

    fn classify(percent: f64, high: f64, critical: f64) -> Self {
        if percent >= critical {
            Severity::Critical
        } else if percent >= high {
            Severity::High
        } else {
            Severity::Normal
        }
    }
}

impl ThemeColors {
    fn context_tier(&self, severity: Severity) -> Option<&Style> {
        let tier = match severity {
            Severity::Critical => self.context_critical.as_ref(),
            Severity::High => self.context_high.as_ref(),
            Severity::Normal => None,
        };
        tier.or(self.context.as_ref())
    }

    fn usage_tier(&self, severity: Severity) -> Option<&Style> {
        let tier = match severity {
            Severity::Critical => self.usage_critical.as_ref(),
            Severity::High => self.usage_high.as_ref(),
            Severity::Normal => None,
        };
        tier.or(self.usage.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Progress bars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct BarGlyphs {
    width: usize,
    filled: &'static str,
    empty: &'static str,
}

const CONTEXT_BAR: BarGlyphs = BarGlyphs {
    width: 10,
    filled: "\u{2588}",
    empty: "\u{2591}",
};

const USAGE_BAR: BarGlyphs = BarGlyphs {
    width: 5,
    filled: "\u{25B0}",
    empty: "\u{25B1}",
};

/// Empty segments ignore the theme.
fn empty_segment_style() -> Style {
    Style::fg("#444444").dim()
}

/// Fixed-width bar, filled proportionally to `percent` (rounded to the
/// nearest segment, clamped to 0..=width).
fn progress_bar(percent: f64, glyphs: &BarGlyphs, filled_style: Option<&Style>) -> String {
    let width = glyphs.width;
    let filled = ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    let empty = width - filled;

    let mut out = paint(&glyphs.filled.repeat(filled), filled_style);
    out.push_str(&paint(&glyphs.empty.repeat(empty), Some(&empty_segment_style())));
    out
}

/// Keeps the preferred width but swaps in `#`/`-` on ASCII terminals.
fn bar_glyphs(capability: Capability, preferred: BarGlyphs) -> BarGlyphs {
    match capability {
        Capability::Ascii => BarGlyphs {
            width: preferred.width,
            filled: "#",
            empty: "-",
        },
        Capability::Nerd | Capability::Unicode => preferred,
    }
}

// ---------------------------------------------------------------------------
// Widget renderers
// ---------------------------------------------------------------------------

fn render_model(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(name) = snapshot
        .model
        .as_ref()
        .and_then(|m| m.display_name.as_deref())
        .filter(|n| !n.is_empty())
    else {
        return Fragment::hidden();
    };
    Fragment::shown(paint(&ctx.prefixed(name), ctx.colors().model.as_ref()))
}

/// "◐ ████░░░░░░ 43%", colored by context severity.
fn render_context(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(percent) = snapshot
        .context_window
        .as_ref()
        .and_then(|c| c.used_percentage)
        .filter(|p| p.is_finite())
    else {
        return Fragment::hidden();
    };

    let style = ctx.colors().context_tier(Severity::for_context(percent));
    let bar = progress_bar(percent, &bar_glyphs(ctx.capability, CONTEXT_BAR), style);
    let value = paint(&format!("{}%", percent.round() as i64), style);

    let text = if ctx.icon.is_empty() {
        format!("{} {}", bar, value)
    } else {
        format!("{} {} {}", paint(&ctx.icon, style), bar, value)
    };
    Fragment::shown(text)
}

/// "⇅ ↑15.2k ↓4.5k". A missing side reads as zero.
fn render_tokens(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(window) = snapshot.context_window.as_ref() else {
        return Fragment::hidden();
    };
    if window.total_input_tokens.is_none() && window.total_output_tokens.is_none() {
        return Fragment::hidden();
    }

    let (up, down) = match ctx.capability {
        Capability::Ascii => ("in:", "out:"),
        Capability::Nerd | Capability::Unicode => ("\u{2191}", "\u{2193}"),
    };
    let text = format!(
        "{}{} {}{}",
        up,
        format_tokens(window.total_input_tokens.unwrap_or(0)),
        down,
        format_tokens(window.total_output_tokens.unwrap_or(0)),
    );
    Fragment::shown(paint(&ctx.prefixed(&text), ctx.colors().tokens.as_ref()))
}

/// "$0.02". The currency glyph abuts the value.
fn render_cost(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(usd) = snapshot
        .cost
        .as_ref()
        .and_then(|c| c.total_cost_usd)
        .filter(|c| c.is_finite())
    else {
        return Fragment::hidden();
    };
    let symbol = if ctx.icon.is_empty() { "$" } else { ctx.icon.as_str() };
    let text = format!("{}{}", symbol, format_cost(usd));
    Fragment::shown(paint(&text, ctx.colors().cost.as_ref()))
}

fn render_duration(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(ms) = snapshot.cost.as_ref().and_then(|c| c.total_duration_ms) else {
        return Fragment::hidden();
    };
    let text = ctx.prefixed(&format_duration_ms(ms));
    Fragment::shown(paint(&text, ctx.colors().duration.as_ref()))
}

/// "± +156 -23" with added/removed colored independently.
fn render_lines(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(cost) = snapshot.cost.as_ref() else {
        return Fragment::hidden();
    };
    if cost.total_lines_added.is_none() && cost.total_lines_removed.is_none() {
        return Fragment::hidden();
    }

    let colors = ctx.colors();
    let added = paint(
        &format!("+{}", cost.total_lines_added.unwrap_or(0)),
        colors.lines_added.as_ref().or(colors.lines.as_ref()),
    );
    let removed = paint(
        &format!("-{}", cost.total_lines_removed.unwrap_or(0)),
        colors.lines_removed.as_ref().or(colors.lines.as_ref()),
    );

    let text = if ctx.icon.is_empty() {
        format!("{} {}", added, removed)
    } else {
        format!("{} {} {}", paint(&ctx.icon, colors.lines.as_ref()), added, removed)
    };
    Fragment::shown(text)
}

/// Basename of the workspace directory, falling back to the top-level cwd.
fn render_directory(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let dir = snapshot
        .workspace
        .as_ref()
        .and_then(|w| w.current_dir.as_deref())
        .filter(|d| !d.is_empty())
        .or_else(|| snapshot.cwd.as_deref().filter(|d| !d.is_empty()));
    let Some(dir) = dir else {
        return Fragment::hidden();
    };

    let name = Path::new(dir)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string());
    Fragment::shown(paint(&ctx.prefixed(&name), ctx.colors().directory.as_ref()))
}

/// "v1.0.80". The version glyph abuts the value.
fn render_version(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(version) = snapshot.version.as_deref().filter(|v| !v.is_empty()) else {
        return Fragment::hidden();
    };
    let prefix = if ctx.icon.is_empty() { "v" } else { ctx.icon.as_str() };
    let text = format!("{}{}", prefix, version);
    Fragment::shown(paint(&text, ctx.colors().version.as_ref()))
}

/// "◔ ▰▱▱▱▱ 120/500 (Pro)". The percentage is derived from used/limit when
/// the producer does not send one.
fn render_usage(snapshot: &Snapshot, ctx: &RenderContext<'_>) -> Fragment {
    let Some(usage) = snapshot.session_usage.as_ref() else {
        return Fragment::hidden();
    };
    if usage.requests_used.is_none() && usage.usage_percentage.is_none() {
        return Fragment::hidden();
    }

    let percent = usage
        .usage_percentage
        .filter(|p| p.is_finite())
        .or_else(|| match (usage.requests_used, usage.requests_limit) {
            (Some(used), Some(limit)) if limit > 0 => Some(used as f64 / limit as f64 * 100.0),
            _ => None,
        });

    let style = ctx
        .colors()
        .usage_tier(percent.map_or(Severity::Normal, Severity::for_usage));

    let mut parts: Vec<String> = Vec::new();
    if !ctx.icon.is_empty() {
        parts.push(paint(&ctx.icon, style));
    }
    if let Some(p) = percent {
        parts.push(progress_bar(p, &bar_glyphs(ctx.capability, USAGE_BAR), style));
    }

    let amount = match (usage.requests_used, usage.requests_limit, percent) {
        (Some(used), Some(limit), _) => Some(format!("{}/{}", used, limit)),
        (_, _, Some(p)) => Some(format!("{}%", p.round() as i64)),
        (Some(used), None, None) => Some(used.to_string()),
        (None, _, None) => None,
    };
    if let Some(amount) = amount {
        parts.push(paint(&amount, style));
    }
    if let Some(plan) = usage.plan.as_deref().filter(|p| !p.is_empty()) {
        parts.push(paint(&format!("({})", plan), style));
    }

    Fragment::shown(parts.join(" "))
}

/// Countdown to the quota reset. Prefers `reset_in_seconds`; otherwise diffs
/// `reset_at` against `now`. An unparsable timestamp is shown verbatim.
fn render_reset_time(snapshot: &Snapshot, ctx: &RenderContext<'_>, now: DateTime<Utc>) -> Fragment {
    let Some(usage) = snapshot.session_usage.as_ref() else {
        return Fragment::hidden();
    };

    let value = if let Some(seconds) = usage.reset_in_seconds {
        format_countdown(seconds)
    } else if let Some(raw) = usage.reset_at.as_deref().filter(|r| !r.is_empty()) {
        match parse_reset_at(raw) {
            Some(reset) => {
                let remaining = reset.signed_duration_since(now);
                format_countdown(remaining.num_seconds().max(0))
            }
            None => {
                tracing::debug!(reset_at = raw, "unparsable reset timestamp");
                raw.to_string()
            }
        }
    } else {
        return Fragment::hidden();
    };

    Fragment::shown(paint(&ctx.prefixed(&value), ctx.colors().reset_time.as_ref()))
}

/// Offset-less forms read as local time, the way a JS `Date` does.
const LOCAL_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// RFC 3339 first, then an ISO date-time without an offset.
fn parse_reset_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(reset) = DateTime::parse_from_rfc3339(raw) {
        return Some(reset.with_timezone(&Utc));
    }
    let naive = LOCAL_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
