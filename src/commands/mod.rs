//! Handlers for each CLI subcommand

pub mod auth;
pub mod env;
pub mod secrets;

use crate::api::{ClientOptions, SecretClient};
use crate::cli::{Commands, GlobalOptions};
use crate::cli::commands::{AuthSubcommands, EnvSubcommands, SecretsSubcommands};
use crate::discovery::ClusterResolver;
use anyhow::{Context, Result};

pub async fn dispatch(global: &GlobalOptions, command: Commands) -> Result<()> {
    match command {
        Commands::Env(args) => match args.command {
            EnvSubcommands::List => env::list_command(global),
            EnvSubcommands::Use { name } => env::use_command(global, name),
            EnvSubcommands::Current => env::current_command(global),
            EnvSubcommands::Info => env::info_command(global),
        },
        Commands::Login(args) => auth::login_command(global, args).await,
        Commands::Logout => auth::logout_command(global).await,
        Commands::Auth(args) => match args.command {
            AuthSubcommands::Status => auth::status_command(global).await,
        },
        Commands::Secrets(args) => match args.command {
            SecretsSubcommands::List { path } => secrets::list_command(global, &path).await,
            SecretsSubcommands::Get { path, field } => {
                secrets::get_command(global, &path, field.as_deref()).await
            }
            SecretsSubcommands::Put { path, pairs, file } => {
                secrets::put_command(global, &path, &pairs, file.as_deref()).await
            }
            SecretsSubcommands::Delete { path } => secrets::delete_command(global, &path).await,
        },
    }
}

/// Secret client for the environment selected by `--env` or the configuration
pub(crate) async fn connect(global: &GlobalOptions) -> Result<SecretClient> {
    let store = global.store()?;
    let options = ClientOptions {
        environment: global.environment.clone(),
        resolver: Some(Box::new(ClusterResolver::new())),
    };

    SecretClient::connect(store, options)
        .await
        .context("Failed to create Vault client")
}
