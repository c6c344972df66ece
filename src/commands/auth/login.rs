use anyhow::{Context, Result};
use colored::*;
use log::{error, info};

use crate::auth::{AuthMethod, CredentialSource};
use crate::cli::GlobalOptions;
use crate::cli::commands::LoginArgs;
use crate::commands::connect;
use crate::ui::{is_interactive, prompt_password, prompt_username};

/// Credential fields from flags, then `--from-env`, then `--from-env-file`
pub fn gather_credentials(args: &LoginArgs) -> Result<CredentialSource> {
    let mut source = CredentialSource {
        token: args.token.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        role_id: args.role_id.clone(),
        secret_id: args.secret_id.clone(),
    };

    if args.from_env {
        source = source.or(CredentialSource::from_env());
    }
    if let Some(path) = &args.from_env_file {
        source = source.or(CredentialSource::from_env_file(path)?);
    }

    Ok(source)
}

pub async fn login_command(global: &GlobalOptions, args: LoginArgs) -> Result<()> {
    info!("Starting login with {} method", args.method);

    let mut source = gather_credentials(&args)?;

    if args.method == AuthMethod::Userpass && is_interactive() {
        source.username = Some(prompt_username(source.username.take())?);
        source.password = Some(prompt_password(source.password.take())?);
    }

    let credential = source.into_credential(args.method)?;

    let mut client = connect(global).await?;
    match client.login(&credential).await {
        Ok(_) => {
            println!(
                "{} Successfully authenticated to Vault ({})",
                "✓".bright_green(),
                client.environment_name().bright_green().bold()
            );
            Ok(())
        }
        Err(e) => {
            error!("Login to {} failed: {}", client.environment_name(), e);
            Err(e).with_context(|| format!("{} authentication failed", args.method))
        }
    }
}
