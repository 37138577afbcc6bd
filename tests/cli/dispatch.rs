//! Dispatch tests through the binary

use crate::common::run_host;
use tempfile::TempDir;

#[test]
fn test_unknown_plugin_reports_not_found() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let dir = plugins.path().to_str().unwrap();

    let run = run_host(home.path(), &["--plugin-dir", dir, "nope", "run"]);

    assert_eq!(run.code, Some(2));
    assert_eq!(run.stdout, "Plugin 'nope' not found.\n");
}

#[test]
fn test_arguments_after_plugin_are_not_host_options() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let dir = plugins.path().to_str().unwrap();

    // --format after the plugin name belongs to the plugin, so output stays text
    let run = run_host(
        home.path(),
        &["--plugin-dir", dir, "nope", "get", "--format", "json"],
    );

    assert_eq!(run.code, Some(2));
    assert_eq!(run.stdout, "Plugin 'nope' not found.\n");
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();

    let run = run_host(home.path(), &["--version"]);

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains(env!("CARGO_PKG_VERSION")));
}
