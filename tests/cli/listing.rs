//! Plugin listing tests

use crate::common::{module_file, run_host, touch_files};
use tempfile::TempDir;

#[test]
fn test_empty_plugin_dir_lists_no_plugins() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let dir = plugins.path().to_str().unwrap();

    let run = run_host(home.path(), &["--plugin-dir", dir]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    assert_eq!(
        run.stdout,
        "Available Plugins:\n\
         Usage: <plugin> <command> [args]\n\
         Use '<plugin> help' to get a list of available commands for a plugin.\n\
         Use '<plugin> <command> help' for help on a specific command.\n"
    );
}

#[test]
fn test_help_word_matches_bare_listing() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let dir = plugins.path().to_str().unwrap();

    let bare = run_host(home.path(), &["--plugin-dir", dir]);
    let help = run_host(home.path(), &["--plugin-dir", dir, "help"]);

    assert_eq!(help.code, Some(0));
    assert_eq!(bare.stdout, help.stdout);
}

#[test]
fn test_listing_as_json() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let dir = plugins.path().to_str().unwrap();

    let run = run_host(home.path(), &["--plugin-dir", dir, "--format", "json"]);

    assert_eq!(run.code, Some(0));
    let document: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert_eq!(document["plugins"], serde_json::json!([]));
    assert_eq!(document["usage"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_broken_module_is_skipped_with_warning() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let broken = module_file("broken");
    touch_files(plugins.path(), &[&broken, "README.txt"]);
    let dir = plugins.path().to_str().unwrap();

    let run = run_host(home.path(), &["--plugin-dir", dir, "--no-color"]);

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.starts_with("Available Plugins:\nUsage:"));
    assert!(
        run.stderr.contains("Error loading plugin from") && run.stderr.contains(&broken),
        "stderr: {}",
        run.stderr
    );
    assert!(!run.stderr.contains("README.txt"));
}

#[test]
fn test_quiet_suppresses_load_warnings() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    touch_files(plugins.path(), &[&module_file("broken")]);
    let dir = plugins.path().to_str().unwrap();

    let run = run_host(home.path(), &["--plugin-dir", dir, "-q"]);

    assert_eq!(run.code, Some(0));
    assert!(run.stderr.is_empty(), "stderr: {}", run.stderr);
}
