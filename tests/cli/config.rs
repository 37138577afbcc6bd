//! Configuration and fatal startup error tests

use crate::common::run_host;
use tempfile::TempDir;

#[test]
fn test_missing_plugin_dir_is_fatal() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("no-such-plugins");

    let run = run_host(home.path(), &["--plugin-dir", missing.to_str().unwrap()]);

    assert_eq!(run.code, Some(3));
    assert!(run.stdout.is_empty());
    assert!(
        run.stderr.contains(&format!(
            "Plugins directory '{}' not found.",
            missing.display()
        )),
        "stderr: {}",
        run.stderr
    );
}

#[test]
fn test_missing_plugin_dir_is_reported_with_logging_off() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("no-such-plugins");
    let expected = format!("Plugins directory '{}' not found.", missing.display());

    for quiet in [&["--log-level", "off"][..], &["-qq"][..]] {
        let mut args = vec!["--plugin-dir", missing.to_str().unwrap()];
        args.extend_from_slice(quiet);

        let run = run_host(home.path(), &args);

        assert_eq!(run.code, Some(3), "args: {:?}", args);
        assert!(run.stdout.is_empty());
        assert!(
            run.stderr.contains(&expected),
            "args: {:?} stderr: {}",
            args,
            run.stderr
        );
    }
}

#[test]
fn test_plugin_dir_from_config_file() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let config = home.path().join("plughost.toml");
    std::fs::write(
        &config,
        format!(
            "plugin-dir = {:?}\nformat = \"json\"\n",
            plugins.path().to_str().unwrap()
        ),
    )
    .unwrap();

    let run = run_host(home.path(), &["--config-file", config.to_str().unwrap()]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    let document: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert!(document["plugins"].is_array());
}

#[test]
fn test_default_config_location_is_used() {
    let home = TempDir::new().unwrap();
    let plugins = TempDir::new().unwrap();
    let config_dir = home.path().join("Plughost");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("plughost.toml"),
        format!("plugin-dir = {:?}\n", plugins.path().to_str().unwrap()),
    )
    .unwrap();

    let run = run_host(home.path(), &[]);

    if cfg!(target_os = "linux") {
        assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
        assert!(run.stdout.starts_with("Available Plugins:"));
    }
}

#[test]
fn test_missing_explicit_config_is_fatal() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("absent.toml");

    let run = run_host(home.path(), &["--config-file", config.to_str().unwrap()]);

    assert_eq!(run.code, Some(3));
    assert!(run
        .stderr
        .contains("The specified configuration file does not exist"));
}

#[test]
fn test_invalid_config_value_is_fatal() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("plughost.toml");
    std::fs::write(&config, "format = \"xml\"\n").unwrap();

    let run = run_host(home.path(), &["--config-file", config.to_str().unwrap()]);

    assert_eq!(run.code, Some(3));
    assert!(run.stderr.contains("Invalid value 'xml' for 'format'"));
}
