use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO: &str = r#"{
    "model": {"display_name": "Opus"},
    "context_window": {"used_percentage": 42.5, "total_input_tokens": 15234, "total_output_tokens": 4521},
    "cost": {"total_cost_usd": 0.0234}
}"#;

const ASCII_CONFIG: &str = "icons = \"ascii\"\nseparator = \" | \"\npadding = 0\n";

// Helper to get a Command for the `ccsl` binary, isolated from the user's
// config, settings and environment.
fn ccsl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ccsl").expect("binary exists");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("CLAUDE_CONFIG_DIR", home.path().join(".claude"))
        .env_remove("NO_COLOR")
        .env_remove("CCSL_CONFIG")
        .env_remove("CCSL_LOG");
    cmd
}

fn ascii_config(home: &TempDir) -> std::path::PathBuf {
    let path = home.path().join("ascii.toml");
    std::fs::write(&path, ASCII_CONFIG).unwrap();
    path
}

// -----------------------------------------------------------------------
// Basic CLI
// -----------------------------------------------------------------------

#[test]
fn help_shows_description() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status line"));
}

#[test]
fn version_shows_semver() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

// -----------------------------------------------------------------------
// Render path
// -----------------------------------------------------------------------

#[test]
fn render_empty_stdin_prints_empty_line() {
    let home = TempDir::new().unwrap();
    ccsl(&home).write_stdin("").assert().success().stdout("\n");
}

#[test]
fn render_malformed_json_prints_empty_line() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .arg("render")
        .write_stdin("{\"model\": ")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn render_binary_stdin_prints_empty_line() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .write_stdin(vec![0xffu8, 0xfe, 0x00, 0x9f, 0x92])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn render_prints_exactly_one_line() {
    let home = TempDir::new().unwrap();
    let output = ccsl(&home).write_stdin(SCENARIO).output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "expected one line, got: {:?}", lines);
    assert!(stdout.contains("Opus"));
}

#[test]
fn render_scenario_with_config_file() {
    let home = TempDir::new().unwrap();
    let config = ascii_config(&home);
    ccsl(&home)
        .arg("--no-color")
        .arg("--config")
        .arg(&config)
        .write_stdin(SCENARIO)
        .assert()
        .success()
        .stdout("* Opus | % ####------ 43% | in:15.2k out:4.5k | $0.02\n");
}

#[test]
fn render_reads_config_from_env() {
    let home = TempDir::new().unwrap();
    let config = ascii_config(&home);
    ccsl(&home)
        .arg("--no-color")
        .env("CCSL_CONFIG", &config)
        .write_stdin(r#"{"model": {"display_name": "Haiku"}}"#)
        .assert()
        .success()
        .stdout("* Haiku\n");
}

#[test]
fn render_discovers_project_config() {
    let home = TempDir::new().unwrap();
    let project = home.path().join("proj").join("src");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(
        home.path().join("proj").join(".ccslrc.json"),
        r#"{"widgets": ["version"], "padding": 0, "icons": "ascii"}"#,
    )
    .unwrap();

    ccsl(&home)
        .current_dir(&project)
        .arg("--no-color")
        .write_stdin(r#"{"version": "1.0.80", "model": {"display_name": "Opus"}}"#)
        .assert()
        .success()
        .stdout("v1.0.80\n");
}

#[test]
fn render_colored_by_default() {
    let home = TempDir::new().unwrap();
    let output = ccsl(&home).write_stdin(SCENARIO).output().expect("failed to run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("\x1b[0m"), "{:?}", stdout);
    assert!(stdout.matches('\x1b').count() > 1, "{:?}", stdout);
}

#[test]
fn render_no_color_flag_has_no_escapes() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .arg("--no-color")
        .write_stdin(SCENARIO)
        .assert()
        .success()
        .stdout(predicate::str::contains('\x1b').not());
}

#[test]
fn render_no_color_env_has_no_escapes() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .env("NO_COLOR", "1")
        .write_stdin(SCENARIO)
        .assert()
        .success()
        .stdout(predicate::str::contains('\x1b').not());
}

#[test]
fn render_survives_broken_config() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("broken.toml");
    std::fs::write(&config, "theme = [unterminated").unwrap();
    ccsl(&home)
        .arg("--no-color")
        .arg("--config")
        .arg(&config)
        .write_stdin(SCENARIO)
        .assert()
        .success()
        .stdout(predicate::str::contains("Opus"));
}

#[test]
fn render_unknown_fields_are_ignored() {
    let home = TempDir::new().unwrap();
    let config = ascii_config(&home);
    ccsl(&home)
        .arg("--no-color")
        .arg("--config")
        .arg(&config)
        .write_stdin(r#"{"model": {"display_name": "Opus", "tier": 9}, "future": {"x": [1]}}"#)
        .assert()
        .success()
        .stdout("* Opus\n");
}

// -----------------------------------------------------------------------
// Themes and preview
// -----------------------------------------------------------------------

#[test]
fn themes_lists_all_builtins() {
    let home = TempDir::new().unwrap();
    let assert = ccsl(&home).arg("themes").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for name in ["neon", "rainbow", "ocean", "minimal", "monochrome", "corporate"] {
        assert!(stdout.contains(name), "missing {}: {}", name, stdout);
    }
    assert!(stdout.contains("* minimal"));
}

#[test]
fn preview_renders_sample_data() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .args(["preview", "--theme", "neon", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Opus"))
        .stdout(predicate::str::contains('\x1b').not());
}

#[test]
fn preview_rejects_unknown_theme() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .args(["preview", "--theme", "sparkles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn theme_writes_project_config() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .args(["theme", "ocean", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Opus"));

    let written = std::fs::read_to_string(home.path().join(".ccslrc.toml")).unwrap();
    assert!(written.contains("theme = \"ocean\""), "{}", written);

    ccsl(&home)
        .arg("themes")
        .assert()
        .success()
        .stdout(predicate::str::contains("* ocean"));
}

#[test]
fn theme_rejects_unknown_name() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .args(["theme", "sparkles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
    assert!(!home.path().join(".ccslrc.toml").exists());
}

// -----------------------------------------------------------------------
// Init
// -----------------------------------------------------------------------

#[test]
fn init_writes_default_config_once() {
    let home = TempDir::new().unwrap();
    ccsl(&home).arg("init").assert().success();

    let path = home.path().join(".ccslrc.toml");
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("theme = \"minimal\""), "{}", written);
    assert!(written.contains("padding = 1"), "{}", written);

    ccsl(&home)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ccsl(&home).args(["init", "--force"]).assert().success();
}

#[test]
fn init_global_writes_to_config_dir() {
    let home = TempDir::new().unwrap();
    ccsl(&home).args(["init", "--global"]).assert().success();
    assert!(home
        .path()
        .join(".config")
        .join("ccsl")
        .join("config.toml")
        .is_file());
}

// -----------------------------------------------------------------------
// Install / uninstall
// -----------------------------------------------------------------------

#[test]
fn install_then_uninstall_round_trip() {
    let home = TempDir::new().unwrap();
    let settings = home.path().join(".claude").join("settings.json");
    std::fs::create_dir_all(settings.parent().unwrap()).unwrap();
    std::fs::write(&settings, r#"{"model": "opus"}"#).unwrap();

    ccsl(&home).arg("install").assert().success();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings).unwrap()).unwrap();
    assert_eq!(value["model"], "opus");
    assert_eq!(value["statusLine"]["type"], "command");
    assert_eq!(value["statusLine"]["command"], "ccsl");
    assert!(home.path().join(".claude").join("settings.json.backup").is_file());

    ccsl(&home).arg("uninstall").assert().success();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({"model": "opus"}));
}

#[test]
fn install_custom_command_creates_settings() {
    let home = TempDir::new().unwrap();
    ccsl(&home)
        .args(["install", "--command", "ccsl --no-color"])
        .assert()
        .success();
    let settings = home.path().join(".claude").join("settings.json");
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(settings).unwrap()).unwrap();
    assert_eq!(value["statusLine"]["command"], "ccsl --no-color");
}

#[test]
fn install_refuses_non_object_settings() {
    let home = TempDir::new().unwrap();
    let settings = home.path().join(".claude").join("settings.json");
    std::fs::create_dir_all(settings.parent().unwrap()).unwrap();
    std::fs::write(&settings, "\"just a string\"").unwrap();

    ccsl(&home)
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a JSON object"));
    assert_eq!(
        std::fs::read_to_string(&settings).unwrap(),
        "\"just a string\""
    );
}
