//! Command line interface
//!
//! Global options are parsed with clap and layered over the configuration file.

pub mod args;
pub mod config;
