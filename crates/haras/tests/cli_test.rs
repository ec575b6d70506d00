//! Integration tests for the `haras` CLI binary.
//!
//! Argument parsing, help output, shell completions and the errors raised
//! before any request reaches a backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

const SANDBOX: &str = "/tmp/haras-cli-test-nonexistent";

/// The `haras` binary with every `HARAS_*` variable cleared and the
/// config/data directories pointed at a path that does not exist.
fn haras_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("haras");
    cmd.env("HOME", SANDBOX)
        .env("XDG_CONFIG_HOME", SANDBOX)
        .env("XDG_DATA_HOME", SANDBOX)
        .env_remove("HARAS_PROFILE")
        .env_remove("HARAS_URL")
        .env_remove("HARAS_CONFIG")
        .env_remove("HARAS_OUTPUT")
        .env_remove("HARAS_INSECURE")
        .env_remove("HARAS_TIMEOUT")
        .env_remove("HARAS_EMAIL")
        .env_remove("HARAS_PASSWORD");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = haras_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    haras_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("animals")
            .and(predicate::str::contains("terrenos"))
            .and(predicate::str::contains("dashboard"))
            .and(predicate::str::contains("auth")),
    );
}

#[test]
fn test_version_flag() {
    haras_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("haras"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    haras_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    haras_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = haras_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_animals_list_without_config() {
    haras_cmd()
        .args(["animals", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_config_show_without_config() {
    haras_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_invalid_output_format() {
    let output = haras_cmd()
        .args(["--output", "invalid", "animals", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure for invalid output format");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_commands_require_login() {
    // Port 9 is never contacted: the missing session is caught locally.
    haras_cmd()
        .args(["--url", "http://127.0.0.1:9", "animals", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_auth_status_without_session() {
    haras_cmd()
        .args(["--url", "http://127.0.0.1:9", "auth", "status"])
        .assert()
        .code(3);
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_animals_subcommands_exist() {
    haras_cmd()
        .args(["animals", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("delete"))
                .and(predicate::str::contains("genealogia")),
        );
}

#[test]
fn test_saude_subcommands_exist() {
    haras_cmd()
        .args(["saude", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("proximas").and(predicate::str::contains("aplicar")));
}

#[test]
fn test_stock_subcommands_exist() {
    haras_cmd()
        .args(["racao", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("entrada")
                .and(predicate::str::contains("movimentacoes"))
                .and(predicate::str::contains("planos"))
                .and(predicate::str::contains("fornecimentos"))
                .and(predicate::str::contains("estoque-baixo")),
        );
    haras_cmd()
        .args(["manejo", "analises", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upload").and(predicate::str::contains("download")));
    haras_cmd()
        .args(["ferrageamento", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vencimentos").and(predicate::str::contains("ferradores")));
    haras_cmd()
        .args(["medicamentos", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aplicar").and(predicate::str::contains("previsao")));
}

#[test]
fn test_relatorio_requires_period() {
    let output = haras_cmd()
        .args(["ferrageamento", "relatorio", "--data-inicio", "01/01/2024"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("--data-fim"));
}

#[test]
fn test_config_subcommands_exist() {
    haras_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

// ── Config file round-trip ──────────────────────────────────────────

#[test]
fn test_config_set_creates_default_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();

    haras_cmd()
        .args(["--config", path, "config", "set", "url", "http://localhost:8000"])
        .assert()
        .success();

    haras_cmd()
        .args(["--config", path, "config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));

    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("http://localhost:8000"), "config file:\n{written}");
}

#[test]
fn test_config_use_unknown_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    haras_cmd()
        .args(["--config", path.to_str().unwrap(), "config", "use", "outra"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outra"));
}
