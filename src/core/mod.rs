//! Core services and infrastructure

pub mod error_handling;
pub mod logging;
pub mod strings;
pub mod styles; // centralized styling palette for CLI & help output
pub mod version;
