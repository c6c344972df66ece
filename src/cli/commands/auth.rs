use crate::auth::AuthMethod;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Authentication method
    #[arg(long, value_enum, default_value_t = AuthMethod::Token)]
    pub method: AuthMethod,
    /// Vault token (token method)
    #[arg(long)]
    pub token: Option<String>,
    /// Username (userpass method)
    #[arg(long)]
    pub username: Option<String>,
    /// Password (userpass method)
    #[arg(long)]
    pub password: Option<String>,
    /// AppRole role ID (approle method)
    #[arg(long)]
    pub role_id: Option<String>,
    /// AppRole secret ID (approle method)
    #[arg(long)]
    pub secret_id: Option<String>,
    /// Import missing credentials from VAULT_* environment variables
    #[arg(long)]
    pub from_env: bool,
    /// Import missing credentials from the specified .env file
    #[arg(long)]
    pub from_env_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommands {
    /// Show authentication status of the current environment
    Status,
}
