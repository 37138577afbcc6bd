//! Test modules for the plugin system
//!
//! Discovery, dispatch, help rendering and module ABI suites sharing the
//! test doubles in `utils`.

mod utils;
