use super::{load_settings_from, normalize_server_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("script_workbench_{label}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

#[test]
fn prepends_http_scheme_when_missing() {
    assert_eq!(
        normalize_server_url("localhost:9000"),
        "http://localhost:9000"
    );
    assert_eq!(
        normalize_server_url(" https://wallet.example "),
        "https://wallet.example"
    );
}

#[test]
fn blank_server_url_falls_back_to_default() {
    assert_eq!(normalize_server_url("   "), Settings::default().server_url);
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let settings =
        load_settings_from(Path::new("/nonexistent/client.toml"), |_| None).expect("settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_are_overridden_by_environment() {
    let root = temp_root("layering");
    let path = root.join("client.toml");
    fs::write(
        &path,
        "server_url = \"http://from-file:1\"\nlog_filter = \"debug\"\n",
    )
    .expect("write settings");

    let from_file = load_settings_from(&path, |_| None).expect("file settings");
    assert_eq!(from_file.server_url, "http://from-file:1");
    assert_eq!(from_file.log_filter, "debug");

    let env_vars: HashMap<&str, &str> = [
        ("SERVER_URL", "http://from-env:2"),
        ("APP__SERVER_URL", "from-app-env:3"),
        ("RUST_LOG", "warn"),
    ]
    .into_iter()
    .collect();
    let layered = load_settings_from(&path, |key| env_vars.get(key).map(|v| v.to_string()))
        .expect("layered settings");
    assert_eq!(layered.server_url, "http://from-app-env:3");
    assert_eq!(layered.log_filter, "warn");

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn malformed_file_is_reported() {
    let root = temp_root("malformed");
    let path = root.join("client.toml");
    fs::write(&path, "server_url = [").expect("write settings");

    let err = load_settings_from(&path, |_| None).expect_err("must fail");
    assert!(
        err.to_string().contains("failed to parse settings file"),
        "unexpected error: {err}"
    );

    fs::remove_dir_all(root).expect("cleanup");
}
