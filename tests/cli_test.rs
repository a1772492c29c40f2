//! CLI integration tests
//! Run with: cargo test --test cli_test

use std::path::Path;
use std::process::{Command, Output};

use httpmock::prelude::*;
use tempfile::TempDir;

const ENV_KEYS: [&str; 6] = [
    "BOT_TOKEN",
    "CLIENT_ID",
    "GUILD_ID",
    "TARGET_URL",
    "HTTP_USERNAME",
    "HTTP_PASSWORD",
];

fn relay(dir: &Path, target_url: &str, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_research-relay"));
    cmd.current_dir(dir);
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.env("TARGET_URL", target_url)
        .env("HTTP_USERNAME", "relay")
        .env("HTTP_PASSWORD", "s3cret")
        .args(args)
        .output()
        .expect("binary should run")
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("relay.yaml");
    let logs = dir.join("logs");
    std::fs::write(
        &path,
        format!("logging:\n  directory: {}\n  console: true\n", logs.display()),
    )
    .unwrap();
    path.display().to_string()
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let out = relay(dir.path(), "http://127.0.0.1:9", &["version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("research-relay v"));
}

#[test]
fn test_init_config_writes_file_without_secrets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relay.yaml");
    let out = relay(
        dir.path(),
        "http://127.0.0.1:9",
        &["--config", path.to_str().unwrap(), "init-config"],
    );
    assert!(out.status.success());

    let yaml = std::fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("dashboard-url"));
    assert!(!yaml.contains("s3cret"));
}

#[test]
fn test_invoke_posts_parameters_and_prints_embed() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/research")
            .header("authorization", "Basic cmVsYXk6czNjcmV0")
            .json_body(serde_json::json!({
                "trend_topic": "rust async",
                "count": 3,
                "lang": "english",
            }));
        then.status(200).body("{}");
    });

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let out = relay(
        dir.path(),
        &server.url("/research"),
        &["--config", &config, "invoke", "--trend-topic", "rust async", "--count", "3"],
    );

    assert!(out.status.success());
    mock.assert();

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("✅ Research Completed by DeepSeek AI"));
    assert!(stdout.contains("📊 count: 3 | time: 0s | lang: english"));

    let files: Vec<_> = std::fs::read_dir(dir.path().join("logs")).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn test_invoke_failure_replies_privately() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/research");
        then.status(500).body("boom");
    });

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let out = relay(
        dir.path(),
        &server.url("/research"),
        &["--config", &config, "invoke", "--trend-topic", "x"],
    );

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[BOT] (only you) ❌ Research Request Failed"));
    assert!(stdout.contains("Request failed with status code 500"));
}
