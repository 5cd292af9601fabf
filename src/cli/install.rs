use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use serde_json::{Map, Value};

use crate::cli::output;
use crate::error::CcslError;

/// Key Claude Code reads the status line command from.
pub const STATUSLINE_KEY: &str = "statusLine";

/// Arguments for the `ccsl install` subcommand.
#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Command Claude Code should run for the status line
    #[arg(long, default_value = "ccsl")]
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed,
    NotInstalled,
}

pub fn run_install(args: Args) -> Result<()> {
    let path = settings_path()?;
    let outcome = install(&path, &args.command)
        .with_context(|| format!("failed to update {}", path.display()))?;
    match outcome {
        InstallOutcome::Created => {
            output::success(&format!("Created {} with statusLine", path.display()))
        }
        InstallOutcome::Updated => output::success(&format!(
            "statusLine set to `{}` in {} (previous file saved as {})",
            args.command,
            path.display(),
            backup_path(&path).display()
        )),
        InstallOutcome::Unchanged => {
            output::info(&format!("statusLine already configured in {}", path.display()))
        }
    }
    Ok(())
}

pub fn run_uninstall() -> Result<()> {
    let path = settings_path()?;
    let outcome =
        uninstall(&path).with_context(|| format!("failed to update {}", path.display()))?;
    match outcome {
        UninstallOutcome::Removed => {
            output::success(&format!("Removed statusLine from {}", path.display()))
        }
        UninstallOutcome::NotInstalled => {
            output::info(&format!("No statusLine entry in {}", path.display()))
        }
    }
    Ok(())
}

/// `$CLAUDE_CONFIG_DIR/settings.json`, else `~/.claude/settings.json`.
pub fn settings_path() -> Result<PathBuf, CcslError> {
    settings_path_from(std::env::var_os("CLAUDE_CONFIG_DIR"), dirs::home_dir())
}

pub fn settings_path_from(
    config_dir: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, CcslError> {
    if let Some(dir) = config_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir).join("settings.json"));
    }
    home.map(|h| h.join(".claude").join("settings.json"))
        .ok_or(CcslError::HomeDirUnavailable)
}

/// The `statusLine` value. Claude Code requires the `type` discriminator.
pub fn statusline_value(command: &str) -> Value {
    serde_json::json!({
        "type": "command",
        "command": command,
    })
}

/// Point `statusLine` at `command`, leaving every other key alone.
/// Returns false when the entry was already identical.
pub fn merge_statusline(settings: &mut Map<String, Value>, command: &str) -> bool {
    let desired = statusline_value(command);
    if settings.get(STATUSLINE_KEY) == Some(&desired) {
        return false;
    }
    settings.insert(STATUSLINE_KEY.to_string(), desired);
    true
}

/// Remove `statusLine`. Returns whether it was present.
pub fn remove_statusline(settings: &mut Map<String, Value>) -> bool {
    settings.remove(STATUSLINE_KEY).is_some()
}

/// True when the configured status line command runs ccsl.
pub fn is_installed(settings: &Value) -> bool {
    settings
        .get(STATUSLINE_KEY)
        .and_then(|s| s.get("command"))
        .and_then(Value::as_str)
        .is_some_and(|cmd| cmd.contains("ccsl"))
}

/// Best-effort check against the settings file on disk.
pub fn is_installed_on_disk() -> bool {
    settings_path()
        .ok()
        .and_then(|path| std::fs::read_to_string(path).ok())
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .is_some_and(|settings| is_installed(&settings))
}

/// Merge the status line into the settings file at `path`, creating it when
/// missing. An existing file is backed up before it is rewritten.
pub fn install(path: &Path, command: &str) -> Result<InstallOutcome, CcslError> {
    match read_settings(path)? {
        None => {
            let mut settings = Map::new();
            merge_statusline(&mut settings, command);
            write_settings(path, &settings)?;
            Ok(InstallOutcome::Created)
        }
        Some(mut settings) => {
            if !merge_statusline(&mut settings, command) {
                return Ok(InstallOutcome::Unchanged);
            }
            backup(path)?;
            write_settings(path, &settings)?;
            Ok(InstallOutcome::Updated)
        }
    }
}

/// Remove the status line from the settings file at `path`. A missing file
/// or missing entry is not an error.
pub fn uninstall(path: &Path) -> Result<UninstallOutcome, CcslError> {
    let Some(mut settings) = read_settings(path)? else {
        return Ok(UninstallOutcome::NotInstalled);
    };
    if !remove_statusline(&mut settings) {
        return Ok(UninstallOutcome::NotInstalled);
    }
    backup(path)?;
    write_settings(path, &settings)?;
    Ok(UninstallOutcome::Removed)
}

/// `None` when the file does not exist. An empty file counts as `{}`.
fn read_settings(path: &Path) -> Result<Option<Map<String, Value>>, CcslError> {
    if !path.exists() {
        return Ok(None);
    }
    if std::fs::metadata(path)?.permissions().readonly() {
        return Err(CcslError::Config(format!(
            "{} is read-only; fix with: chmod u+w {}",
            path.display(),
            path.display()
        )));
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Some(Map::new()));
    }
    match serde_json::from_str::<Value>(&contents)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(CcslError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

fn write_settings(path: &Path, settings: &Map<String, Value>) -> Result<(), CcslError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let formatted = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{}\n", formatted))?;
    Ok(())
}

/// `settings.json` -> `settings.json.backup`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("settings.json"));
    name.push(".backup");
    path.with_file_name(name)
}

fn backup(path: &Path) -> Result<(), CcslError> {
    std::fs::copy(path, backup_path(path))?;
    Ok(())
}
