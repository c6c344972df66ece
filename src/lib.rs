//! Multi-environment client for Vault's versioned KV secret engine.

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod ui;

pub use error::{Error, Result};
