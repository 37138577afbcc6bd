//! Common test utilities for running the host binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

/// Result of one host invocation
pub struct HostRun {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for HostRun {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Run the host with `args`, isolated from any user configuration
///
/// `config_home` stands in for the user's configuration directory so a real
/// `plughost.toml` on the test machine is never picked up. Output is piped,
/// so colors stay off unless forced.
pub fn run_host(config_home: &Path, args: &[&str]) -> HostRun {
    Command::new(env!("CARGO_BIN_EXE_plughost"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("FORCE_COLOR")
        .output()
        .expect("failed to run plughost binary")
        .into()
}

/// Create empty files in `dir`
pub fn touch_files(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"").expect("failed to create test file");
    }
}

/// File name of a plugin module called `stem` on this platform
pub fn module_file(stem: &str) -> String {
    format!(
        "{}{}.{}",
        std::env::consts::DLL_PREFIX,
        stem,
        std::env::consts::DLL_EXTENSION
    )
}

/// Directory holding the built fixture modules
///
/// The fixture workspace under `tests/fixtures` is compiled once per test
/// run with the same cargo (and so the same compiler) that built the host.
/// A cached dependency set is tried first so the build works offline.
pub fn fixture_modules_dir() -> &'static Path {
    static BUILT: OnceLock<PathBuf> = OnceLock::new();
    BUILT.get_or_init(|| {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Cargo.toml");
        let target_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("fixtures");
        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());

        let build = |offline: bool| {
            let mut command = Command::new(&cargo);
            command
                .arg("build")
                .arg("--workspace")
                .arg("--manifest-path")
                .arg(&manifest)
                .arg("--target-dir")
                .arg(&target_dir);
            if offline {
                command.arg("--offline");
            }
            command.output().expect("failed to run cargo")
        };

        let output = match build(true) {
            output if output.status.success() => output,
            _ => build(false),
        };
        assert!(
            output.status.success(),
            "building fixture modules failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
        target_dir.join("debug")
    })
}

/// Copy the built fixture module `stem` into `dir`, returning its new path
pub fn install_fixture(stem: &str, dir: &Path) -> PathBuf {
    let file_name = module_file(stem);
    let destination = dir.join(&file_name);
    std::fs::copy(fixture_modules_dir().join(&file_name), &destination)
        .expect("failed to copy fixture module");
    destination
}
