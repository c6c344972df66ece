//! Authentication status display

use anyhow::Result;
use colored::*;
use log::{info, warn};

use crate::cli::GlobalOptions;
use crate::commands::connect;
use crate::output::render_token_info;

/// Prints the token details, or "Not authenticated" when the lookup fails.
pub async fn status_command(global: &GlobalOptions) -> Result<()> {
    info!("Executing auth status command");

    let client = connect(global).await?;
    let format = global.format(client.config());

    match client.token_info().await {
        Ok(token_info) => {
            info!("Token lookup for {} succeeded", client.environment_name());
            println!("{}", render_token_info(&token_info, format)?);
        }
        Err(e) => {
            warn!("Token lookup for {} failed: {}", client.environment_name(), e);
            println!("{}", "Not authenticated".bright_yellow());
        }
    }

    Ok(())
}
