//! CLI Integration Test Modules

pub mod config;
pub mod dispatch;
pub mod listing;
