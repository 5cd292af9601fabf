use std::borrow::Cow;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::snapshot::Snapshot;
use super::style::paint;
use super::theme::{self, Theme};
use super::widgets::{Fragment, Widget};
use crate::config::StatuslineConfig;

/// Leading SGR reset so no color state from the host bleeds into the line.
pub const RESET: &str = "\x1b[0m";

/// The theme in effect: an inline custom theme replaces named lookup.
pub fn active_theme(config: &StatuslineConfig) -> Cow<'_, Theme> {
    match &config.custom_theme {
        Some(custom) => Cow::Borrowed(custom),
        None => Cow::Owned(theme::resolve(&config.theme)),
    }
}

/// Render the configured widgets, in order, into one line.
///
/// Returns an empty string when nothing is visible. Otherwise the visible
/// fragments are joined with the styled separator, padded on both sides and
/// prefixed with [`RESET`].
pub fn compose(snapshot: &Snapshot, config: &StatuslineConfig) -> String {
    let theme = active_theme(config);

    let fragments: Vec<String> = config
        .widgets
        .iter()
        .filter_map(|id| {
            let widget = Widget::from_id(id);
            if widget.is_none() {
                tracing::debug!(widget = %id, "unknown widget id; skipping");
            }
            widget
        })
        .map(|widget| render_guarded(widget, snapshot, &theme, config))
        .filter(|fragment| fragment.visible && !fragment.text.is_empty())
        .map(|fragment| fragment.text)
        .collect();

    if fragments.is_empty() {
        return String::new();
    }

    let separator = paint(&config.separator, theme.colors.separator.as_ref());
    let padding = " ".repeat(config.padding);
    format!("{}{}{}{}", RESET, padding, fragments.join(&separator), padding)
}

/// A widget that panics is treated as invisible; the rest of the line still
/// renders.
fn render_guarded(
    widget: Widget,
    snapshot: &Snapshot,
    theme: &Theme,
    config: &StatuslineConfig,
) -> Fragment {
    catch_unwind(AssertUnwindSafe(|| widget.render(snapshot, theme, config))).unwrap_or_else(|_| {
        tracing::warn!(widget = widget.id(), "widget panicked; hiding it");
        Fragment::hidden()
    })
}
