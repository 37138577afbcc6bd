//! Build metadata and plugin API version shared by the host and plugin modules.
//! Includes the version.rs generated by the build script, so a plugin module built
//! against this crate carries the same constants the host checks it against.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the API version string from build script into u32.
/// Falls back to a stable default if parsing fails.
pub fn get_api_version() -> u32 {
    PLUGIN_API_VERSION.parse().unwrap_or(20261019)
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Compiler that built this crate
pub fn rustc_version() -> &'static str {
    RUSTC_VERSION
}

/// One-line version banner for `--version`
pub fn long_version() -> String {
    format!(
        "{} (plugin API {}, built {}, git {}, {})",
        env!("CARGO_PKG_VERSION"),
        get_api_version(),
        build_time(),
        git_hash(),
        rustc_version()
    )
}
