//! Vault HTTP API access
//!
//! `client` is the raw session handle, `kv` translates logical secret paths onto the
//! KV v2 data and metadata planes, and `secrets` ties both to the configured
//! environment.

pub mod client;
pub mod constants;
pub mod kv;
pub mod models;
pub mod secrets;

pub use client::VaultClient;
pub use models::{AuthInfo, TokenInfo, VaultResponse};
pub use secrets::{ClientOptions, SecretClient, SecretData};
