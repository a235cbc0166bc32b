use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn swatch_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_swatch"))
}

fn run_swatch(args: &[&str]) -> Output {
    Command::new(swatch_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn swatch")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn json_error(output: &Output) -> Value {
    let line = stderr(output)
        .lines()
        .rev()
        .find(|line| line.starts_with('{'))
        .map(str::to_string)
        .expect("json error line");
    serde_json::from_str(&line).expect("valid json")
}

#[test]
fn pick_text_falls_back_to_near_black_on_cyan() {
    let output = run_swatch(&["pick-text", "#06b6d4", "#d1d5db"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "#111827");
}

#[test]
fn mix_uses_the_muted_weight_by_default() {
    let output = run_swatch(&["mix", "#06b6d4", "#111827"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "#172c3e");
}

#[test]
fn invalid_color_exits_with_input_error() {
    let output = run_swatch(&["contrast", "cyan", "#fff"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid hex color"));
    assert!(output.stdout.is_empty());
}

#[test]
fn json_errors_are_structured() {
    let output = run_swatch(&["--json", "swap", "primary", "border"]);
    assert_eq!(output.status.code(), Some(2));
    let value = json_error(&output);
    assert_eq!(value["status"], "error");
    assert_eq!(value["exit_code"], 2);
}

#[test]
fn json_argument_errors_are_structured() {
    for args in [
        &["--json", "generate", "--seed", "abc"][..],
        &["--json", "swap", "primary"][..],
    ] {
        let output = run_swatch(args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        let value = json_error(&output);
        assert_eq!(value["status"], "error");
        assert_eq!(value["exit_code"], 2);
        assert!(
            value["error"].as_str().expect("error text").starts_with("invalid argument"),
            "{value}"
        );
    }
}

#[test]
fn help_and_version_still_exit_cleanly() {
    let output = run_swatch(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));

    let output = run_swatch(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("swatch "));
}

#[test]
fn seeded_generate_is_stable_json() {
    let first = run_swatch(&["--json", "generate", "--seed", "42"]);
    let second = run_swatch(&["--json", "generate", "--seed", "42"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let value: Value = serde_json::from_slice(&first.stdout).expect("valid json");
    assert_eq!(value["kind"], "palette");
    for role in ["primary", "secondary", "accent", "background", "surface", "text"] {
        let hex = value["colors"][role].as_str().expect("hex string");
        assert_eq!(hex.len(), 7, "{role}: {hex}");
    }
}

#[test]
fn palette_output_reloads_as_a_profile() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("site.env");

    let output = run_swatch(&["--profile", "builtin:midnight", "set", "accent", "#ff0000"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    fs::write(&path, &output.stdout).expect("write profile");

    let profile = path.to_str().expect("utf-8 path");
    let output = run_swatch(&["--profile", profile, "--json", "roles"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let roles = value["roles"].as_array().expect("roles array");
    assert_eq!(roles.len(), 6);
    assert_eq!(roles[0]["color"], "#06b6d4");
    assert_eq!(roles[0]["locked"], true);
    assert_eq!(roles[2]["color"], "#ff0000");
}

#[test]
fn locked_role_edit_is_refused() {
    let output = run_swatch(&["--profile", "builtin:midnight", "set", "primary", "#000"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("color role primary is locked"));
}

#[test]
fn missing_profile_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.env");
    let output = run_swatch(&["--profile", path.to_str().expect("utf-8 path"), "audit"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let output = run_swatch(&["-v", "swap", "primary", "accent"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("swapped roles"));
    assert!(stdout(&output).starts_with("primary=#eab308"));
}
