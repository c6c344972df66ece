use super::commands::{AuthCommands, EnvCommands, LoginArgs, SecretsCommands};
use crate::config::{Config, ConfigStore, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultenv")]
#[command(about = "A CLI tool for managing Vault KV secrets across multiple environments")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file (default is $XDG_CONFIG_HOME/vaultenv/config.yaml)
    #[arg(long, global = true, env = "VAULTENV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Environment to use for this invocation (e.g. dev, prod)
    #[arg(long = "env", global = true)]
    pub environment: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

impl GlobalOptions {
    pub fn store(&self) -> crate::error::Result<ConfigStore> {
        match &self.config {
            Some(path) => Ok(ConfigStore::new(path)),
            None => ConfigStore::from_default_location(),
        }
    }

    /// `--format` if given, otherwise the configured default
    pub fn format(&self, config: &Config) -> OutputFormat {
        self.format.unwrap_or(config.output_format)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage and switch between environments
    Env(EnvCommands),
    /// Authenticate to Vault in the current environment
    Login(LoginArgs),
    /// Remove the saved token of the current environment
    Logout,
    /// Authentication operations
    Auth(AuthCommands),
    /// Manage secrets in the KV v2 engine
    Secrets(SecretsCommands),
}
