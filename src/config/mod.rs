pub mod schema;

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::CcslError;

pub use schema::StatuslineConfig;

/// Per-project file names, checked in this order in each directory.
pub const LOCAL_FILES: &[&str] = &[".ccslrc.toml", ".ccslrc.json", ".ccslrc"];

/// File names inside the global config directory.
const GLOBAL_FILES: &[&str] = &["config.toml", "config.json"];

/// On-disk encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// `.toml` is TOML; everything else (including the bare `.ccslrc`) is JSON.
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// Find the config file to use. An explicit path always wins; otherwise the
/// working directory and its ancestors are searched, then the global directory.
pub fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let cwd = std::env::current_dir().ok()?;
    discover_from(&cwd, global_dir().as_deref())
}

/// Search `start` and its parents for a local file, then `global_dir`.
pub fn discover_from(start: &Path, global_dir: Option<&Path>) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if let Some(found) = first_existing(dir, LOCAL_FILES) {
            return Some(found);
        }
    }
    global_dir.and_then(|dir| first_existing(dir, GLOBAL_FILES))
}

fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Parse config text. Missing keys take their defaults; a key whose value
/// does not fit (e.g. `padding = -1`) is dropped with a warning so the rest
/// of the file still applies.
pub fn parse_str(text: &str, format: Format) -> Result<StatuslineConfig, CcslError> {
    let doc = match format {
        Format::Toml => serde_json::to_value(toml::from_str::<toml::Table>(text)?)?,
        Format::Json => {
            if text.trim().is_empty() {
                return Ok(StatuslineConfig::default());
            }
            serde_json::from_str(text)?
        }
    };
    match doc {
        Value::Object(keys) => merge_over_defaults(keys),
        _ => Err(CcslError::Config(
            "top level of a config file must be a table/object".to_string(),
        )),
    }
}

fn merge_over_defaults(mut keys: Map<String, Value>) -> Result<StatuslineConfig, CcslError> {
    let rejected: Vec<String> = keys
        .iter()
        .filter(|(key, value)| decode_single(key, value).is_err())
        .map(|(key, _)| key.clone())
        .collect();
    for key in rejected {
        if let Some(value) = keys.remove(&key) {
            tracing::warn!(
                key = %key,
                value = %value,
                "ignoring invalid config value; using the default"
            );
        }
    }
    Ok(serde_json::from_value(Value::Object(keys))?)
}

fn decode_single(key: &str, value: &Value) -> Result<StatuslineConfig, serde_json::Error> {
    let mut single = Map::new();
    single.insert(key.to_string(), value.clone());
    serde_json::from_value(Value::Object(single))
}

/// Read and parse one config file.
pub fn load(path: &Path) -> Result<StatuslineConfig, CcslError> {
    let contents = std::fs::read_to_string(path)?;
    parse_str(&contents, Format::of(path))
}

/// Discover and load. No file anywhere is not an error: defaults apply.
pub fn load_discovered(explicit: Option<&Path>) -> Result<StatuslineConfig, CcslError> {
    match discover(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load(&path).map_err(|err| {
                CcslError::Config(format!("{}: {}", path.display(), err))
            })
        }
        None => {
            tracing::debug!("no config file found; using defaults");
            Ok(StatuslineConfig::default())
        }
    }
}

/// Render-path loader: any failure falls back to defaults.
pub fn load_or_default(explicit: Option<&Path>) -> StatuslineConfig {
    load_discovered(explicit).unwrap_or_else(|err| {
        tracing::debug!(%err, "config unusable; using defaults");
        StatuslineConfig::default()
    })
}

/// Local file in `dir` to write to: an existing one is reused, otherwise
/// `.ccslrc.toml`.
pub fn local_path(dir: &Path) -> PathBuf {
    first_existing(dir, LOCAL_FILES).unwrap_or_else(|| dir.join(LOCAL_FILES[0]))
}

/// Platform config directory for ccsl (~/.config/ccsl on Linux).
pub fn global_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ccsl"))
}

/// Global file to write to: an existing one is reused, otherwise `config.toml`.
pub fn global_path() -> Result<PathBuf, CcslError> {
    let dir = global_dir().ok_or(CcslError::HomeDirUnavailable)?;
    Ok(first_existing(&dir, GLOBAL_FILES).unwrap_or_else(|| dir.join(GLOBAL_FILES[0])))
}

/// Serialize `config` in the format implied by `path`, creating parent
/// directories as needed.
pub fn save(path: &Path, config: &StatuslineConfig) -> Result<(), CcslError> {
    let text = match Format::of(path) {
        Format::Toml => toml::to_string_pretty(config)?,
        Format::Json => format!("{}\n", serde_json::to_string_pretty(config)?),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statusline::icons::IconMode;

    #[test]
    fn test_format_by_extension() {
        assert_eq!(Format::of(Path::new("/a/.ccslrc.toml")), Format::Toml);
        assert_eq!(Format::of(Path::new("/a/.ccslrc.json")), Format::Json);
        assert_eq!(Format::of(Path::new("/a/.ccslrc")), Format::Json);
        assert_eq!(Format::of(Path::new("/a/config.toml")), Format::Toml);
    }

    #[test]
    fn test_discover_walks_up_to_ancestor() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".ccslrc.json"), "{}").unwrap();

        let found = discover_from(&nested, None).unwrap();
        assert_eq!(found, root.path().join(".ccslrc.json"));
    }

    #[test]
    fn test_discover_prefers_nearest_and_toml_first() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("proj");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".ccslrc.toml"), "").unwrap();
        std::fs::write(nested.join(".ccslrc"), "{}").unwrap();
        std::fs::write(nested.join(".ccslrc.toml"), "").unwrap();

        assert_eq!(discover_from(&nested, None).unwrap(), nested.join(".ccslrc.toml"));
    }

    #[test]
    fn test_discover_falls_back_to_global() {
        let project = tempfile::tempdir().unwrap();
        let global = tempfile::tempdir().unwrap();
        std::fs::write(global.path().join("config.json"), "{}").unwrap();

        let found = discover_from(project.path(), Some(global.path())).unwrap();
        assert_eq!(found, global.path().join("config.json"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/nonexistent/ccsl.toml");
        assert_eq!(discover(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn test_parse_toml_and_json() {
        let toml = parse_str("theme = \"neon\"\npadding = 0\n", Format::Toml).unwrap();
        assert_eq!(toml.theme, "neon");
        assert_eq!(toml.padding, 0);

        let json = parse_str(r#"{"widgets": ["cost"], "icons": "nerd"}"#, Format::Json).unwrap();
        assert_eq!(json.widgets, vec!["cost"]);
        assert_eq!(json.icons, IconMode::Nerd);
        assert_eq!(json.theme, "minimal");

        assert_eq!(parse_str("", Format::Json).unwrap(), StatuslineConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back_silently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(load_discovered(Some(&path)).is_err());
        assert_eq!(load_or_default(Some(&path)), StatuslineConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert_eq!(load_or_default(Some(&path)), StatuslineConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = StatuslineConfig {
            theme: "corporate".into(),
            widgets: vec!["usage".into(), "resetTime".into()],
            ..StatuslineConfig::default()
        };

        for name in ["nested/config.toml", ".ccslrc.json"] {
            let path = dir.path().join(name);
            save(&path, &config).unwrap();
            assert_eq!(load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_local_path_reuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(local_path(dir.path()), dir.path().join(".ccslrc.toml"));

        std::fs::write(dir.path().join(".ccslrc"), "{}").unwrap();
        assert_eq!(local_path(dir.path()), dir.path().join(".ccslrc"));
    }

    #[test]
    fn test_invalid_key_keeps_the_rest_of_the_file() {
        let toml = parse_str(
            "theme = \"ocean\"\npadding = -1\nicons = \"emoji\"\nseparator = \" / \"\n",
            Format::Toml,
        )
        .unwrap();
        assert_eq!(toml.theme, "ocean");
        assert_eq!(toml.separator, " / ");
        assert_eq!(toml.padding, 1);
        assert_eq!(toml.icons, IconMode::Auto);

        let json = parse_str(
            r#"{"widgets": ["cost"], "padding": "wide", "customTheme": 3, "icons": "ascii"}"#,
            Format::Json,
        )
        .unwrap();
        assert_eq!(json.widgets, vec!["cost"]);
        assert_eq!(json.icons, IconMode::Ascii);
        assert_eq!(json.padding, 1);
        assert!(json.custom_theme.is_none());
    }

    #[test]
    fn test_non_table_root_is_an_error() {
        assert!(parse_str("[1, 2]", Format::Json).is_err());
        assert!(parse_str("\"ocean\"", Format::Json).is_err());
    }
}
