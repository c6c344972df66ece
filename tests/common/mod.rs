//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;
use vaultenv::config::{Config, ConfigStore};

/// Config file inside `dir` with a single `dev` environment pointing at `vault_addr`.
pub fn dev_only_store(dir: &TempDir, vault_addr: &str, token: &str) -> ConfigStore {
    let store = ConfigStore::new(dir.path().join("config.yaml"));
    let mut config = store.default_config();
    config.environments.retain(|name, _| name == "dev");

    let dev = config.environment_mut("dev").unwrap();
    dev.vault_addr = vault_addr.to_string();
    dev.token = token.to_string();

    store.save(&config).unwrap();
    store
}

/// Default dev/prod config inside `dir`, with both environments pointing at `vault_addr`.
pub fn dev_and_prod_store(dir: &TempDir, vault_addr: &str) -> ConfigStore {
    let store = ConfigStore::new(dir.path().join("config.yaml"));
    let mut config = store.default_config();
    for env in config.environments.values_mut() {
        env.vault_addr = vault_addr.to_string();
    }
    store.save(&config).unwrap();
    store
}

pub fn token_of(store: &ConfigStore, env: &str) -> String {
    store.load().unwrap().environment(env).unwrap().token.clone()
}

pub fn load(path: &Path) -> Config {
    ConfigStore::new(path).load().unwrap()
}
