use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Keys the producer sent that this version does not recognize.
pub type Extra = Map<String, Value>;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Session state piped by Claude Code on each statusline tick.
///
/// Every field is optional. Unrecognized keys land in `extra` at each level
/// so fields added by newer Claude Code releases survive the decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)] // Unrendered fields are kept for forward-compatibility.
pub struct Snapshot {
    pub hook_event_name: Option<String>,
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
    pub cwd: Option<String>,
    pub version: Option<String>,
    pub model: Option<ModelInfo>,
    pub workspace: Option<WorkspaceInfo>,
    pub output_style: Option<OutputStyle>,
    pub cost: Option<CostInfo>,
    pub context_window: Option<ContextWindow>,
    pub session_usage: Option<SessionUsage>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct ModelInfo {
    pub id: Option<String>,
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct WorkspaceInfo {
    pub current_dir: Option<String>,
    pub project_dir: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct OutputStyle {
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Cost and change accounting for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct CostInfo {
    pub total_cost_usd: Option<f64>,
    #[serde(deserialize_with = "whole_count")]
    pub total_duration_ms: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub total_api_duration_ms: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub total_lines_added: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub total_lines_removed: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Context-window accounting. `current_usage` keeps explicit `null` apart
/// from a missing key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct ContextWindow {
    #[serde(deserialize_with = "whole_count")]
    pub total_input_tokens: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub total_output_tokens: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub context_window_size: Option<u64>,
    pub used_percentage: Option<f64>,
    pub remaining_percentage: Option<f64>,
    pub current_usage: Presence<CurrentUsage>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Token breakdown of the most recent turn.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct CurrentUsage {
    #[serde(deserialize_with = "whole_count")]
    pub input_tokens: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub output_tokens: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub cache_read_input_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Plan quota block. Either `reset_in_seconds` or `reset_at` (RFC 3339)
/// may carry the reset time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
pub struct SessionUsage {
    #[serde(deserialize_with = "whole_count")]
    pub requests_used: Option<u64>,
    #[serde(deserialize_with = "whole_count")]
    pub requests_limit: Option<u64>,
    pub usage_percentage: Option<f64>,
    pub plan: Option<String>,
    pub reset_at: Option<String>,
    #[serde(deserialize_with = "whole_seconds")]
    pub reset_in_seconds: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A field that can be missing, explicitly `null`, or set.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Presence<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

#[cfg(test)]
impl<T> Presence<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Presence::Present(value) => Some(value),
            Presence::Absent | Presence::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Presence::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Presence::Absent)
    }
}

// Missing keys never reach this impl: `#[serde(default)]` on the parent
// yields `Absent`, so a `None` here always means a literal `null`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Presence::Present(value),
            None => Presence::Null,
        })
    }
}

// ---------------------------------------------------------------------------
// Lenient numbers
// ---------------------------------------------------------------------------

// Producers may send whole quantities as floats (`15234.0`, `45000.5`, `1e2`).
// Any finite number is accepted and floored.

fn whole_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n.floor() as u64)),
        Some(n) => Err(D::Error::custom(format_args!(
            "expected a non-negative number, got {}",
            n
        ))),
    }
}

fn whole_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) if n.is_finite() => Ok(Some(n.floor() as i64)),
        Some(n) => Err(D::Error::custom(format_args!("expected a finite number, got {}", n))),
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the raw stdin document.
///
/// Returns `None` for empty, whitespace-only, or syntactically invalid input.
/// A document that parses as JSON but does not match the expected shape is
/// salvaged field by field instead of being rejected.
pub fn parse(raw: &str) -> Option<Snapshot> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(%err, "stdin is not valid JSON");
            return None;
        }
    };

    match Snapshot::deserialize(&value) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::debug!(%err, "snapshot failed strict decoding; salvaging fields");
            Some(Snapshot::salvage(value))
        }
    }
}

impl Snapshot {
    /// Rebuild a snapshot from a decoded document that failed strict typing.
    /// Known fields of the wrong type are moved to the nearest `extra` map.
    fn salvage(value: Value) -> Self {
        let mut obj = match value {
            Value::Object(map) => map,
            other => {
                tracing::debug!(kind = json_kind(&other), "snapshot is not an object");
                return Snapshot::default();
            }
        };
        Snapshot {
            hook_event_name: take(&mut obj, "hook_event_name"),
            session_id: take(&mut obj, "session_id"),
            transcript_path: take(&mut obj, "transcript_path"),
            cwd: take(&mut obj, "cwd"),
            version: take(&mut obj, "version"),
            model: take_group(&mut obj, "model", ModelInfo::salvage),
            workspace: take_group(&mut obj, "workspace", WorkspaceInfo::salvage),
            output_style: take_group(&mut obj, "output_style", OutputStyle::salvage),
            cost: take_group(&mut obj, "cost", CostInfo::salvage),
            context_window: take_group(&mut obj, "context_window", ContextWindow::salvage),
            session_usage: take_group(&mut obj, "session_usage", SessionUsage::salvage),
            extra: obj,
        }
    }
}

impl ModelInfo {
    fn salvage(mut obj: Extra) -> Self {
        ModelInfo {
            id: take(&mut obj, "id"),
            display_name: take(&mut obj, "display_name"),
            extra: obj,
        }
    }
}

impl WorkspaceInfo {
    fn salvage(mut obj: Extra) -> Self {
        WorkspaceInfo {
            current_dir: take(&mut obj, "current_dir"),
            project_dir: take(&mut obj, "project_dir"),
            extra: obj,
        }
    }
}

impl OutputStyle {
    fn salvage(mut obj: Extra) -> Self {
        OutputStyle {
            name: take(&mut obj, "name"),
            extra: obj,
        }
    }
}

impl CostInfo {
    fn salvage(mut obj: Extra) -> Self {
        CostInfo {
            total_cost_usd: take(&mut obj, "total_cost_usd"),
            total_duration_ms: take_with(&mut obj, "total_duration_ms", whole_count),
            total_api_duration_ms: take_with(&mut obj, "total_api_duration_ms", whole_count),
            total_lines_added: take_with(&mut obj, "total_lines_added", whole_count),
            total_lines_removed: take_with(&mut obj, "total_lines_removed", whole_count),
            extra: obj,
        }
    }
}

impl ContextWindow {
    fn salvage(mut obj: Extra) -> Self {
        ContextWindow {
            total_input_tokens: take_with(&mut obj, "total_input_tokens", whole_count),
            total_output_tokens: take_with(&mut obj, "total_output_tokens", whole_count),
            context_window_size: take_with(&mut obj, "context_window_size", whole_count),
            used_percentage: take(&mut obj, "used_percentage"),
            remaining_percentage: take(&mut obj, "remaining_percentage"),
            current_usage: take_presence(&mut obj, "current_usage", CurrentUsage::salvage),
            extra: obj,
        }
    }
}

impl CurrentUsage {
    fn salvage(mut obj: Extra) -> Self {
        CurrentUsage {
            input_tokens: take_with(&mut obj, "input_tokens", whole_count),
            output_tokens: take_with(&mut obj, "output_tokens", whole_count),
            cache_creation_input_tokens: take_with(
                &mut obj,
                "cache_creation_input_tokens",
                whole_count,
            ),
            cache_read_input_tokens: take_with(&mut obj, "cache_read_input_tokens", whole_count),
            extra: obj,
        }
    }
}

impl SessionUsage {
    fn salvage(mut obj: Extra) -> Self {
        SessionUsage {
            requests_used: take_with(&mut obj, "requests_used", whole_count),
            requests_limit: take_with(&mut obj, "requests_limit", whole_count),
            usage_percentage: take(&mut obj, "usage_percentage"),
            plan: take(&mut obj, "plan"),
            reset_at: take(&mut obj, "reset_at"),
            reset_in_seconds: take_with(&mut obj, "reset_in_seconds", whole_seconds),
            extra: obj,
        }
    }
}

// ---------------------------------------------------------------------------
// Salvage helpers
// ---------------------------------------------------------------------------

/// Remove `key` and decode it as `T`. A value of the wrong type is put back
/// so it stays visible through `extra`.
fn take<T: DeserializeOwned>(obj: &mut Extra, key: &str) -> Option<T> {
    let value = obj.remove(key)?;
    if value.is_null() {
        return None;
    }
    match T::deserialize(&value) {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            obj.insert(key.to_string(), value);
            None
        }
    }
}

/// Like [`take`], with a field-specific decoder.
fn take_with<T>(
    obj: &mut Extra,
    key: &str,
    decode: fn(Value) -> Result<Option<T>, serde_json::Error>,
) -> Option<T> {
    let value = obj.remove(key)?;
    match decode(value.clone()) {
        Ok(decoded) => decoded,
        Err(_) => {
            obj.insert(key.to_string(), value);
            None
        }
    }
}

/// Decode a nested group, salvaging it field by field when strict decoding
/// fails. Non-object values are kept in the parent's `extra`.
fn take_group<T: DeserializeOwned>(
    obj: &mut Extra,
    key: &str,
    salvage: fn(Extra) -> T,
) -> Option<T> {
    let value = obj.remove(key)?;
    if let Ok(group) = T::deserialize(&value) {
        return Some(group);
    }
    match value {
        Value::Object(map) => Some(salvage(map)),
        Value::Null => None,
        other => {
            obj.insert(key.to_string(), other);
            None
        }
    }
}

fn take_presence<T: DeserializeOwned>(
    obj: &mut Extra,
    key: &str,
    salvage: fn(Extra) -> T,
) -> Presence<T> {
    match obj.remove(key) {
        None => Presence::Absent,
        Some(Value::Null) => Presence::Null,
        Some(value) => {
            if let Ok(decoded) = T::deserialize(&value) {
                return Presence::Present(decoded);
            }
            match value {
                Value::Object(map) => Presence::Present(salvage(map)),
                other => {
                    obj.insert(key.to_string(), other);
                    Presence::Absent
                }
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
