use anyhow::{Context, Result};
use colored::*;
use log::info;

use crate::cli::GlobalOptions;
use crate::commands::connect;

pub async fn logout_command(global: &GlobalOptions) -> Result<()> {
    info!("Executing logout command");

    let mut client = connect(global).await?;
    client.logout().context("Logout failed")?;

    println!(
        "{} Logged out of {}",
        "✓".bright_green(),
        client.environment_name().bright_green().bold()
    );
    Ok(())
}
