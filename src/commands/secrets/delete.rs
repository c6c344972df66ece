use anyhow::{Context, Result};
use colored::*;
use log::info;

use crate::cli::GlobalOptions;
use crate::commands::connect;

pub async fn delete_command(global: &GlobalOptions, path: &str) -> Result<()> {
    info!("Deleting secret {}", path);

    let client = connect(global).await?;
    client
        .delete(path)
        .await
        .with_context(|| format!("Failed to delete secret {}", path))?;

    println!("{} Secret deleted: {}", "✓".bright_green(), path);
    Ok(())
}
