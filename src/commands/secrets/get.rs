use anyhow::{Context, Result};
use log::info;

use crate::cli::GlobalOptions;
use crate::commands::connect;
use crate::output::{display_value, render_secret};

pub async fn get_command(global: &GlobalOptions, path: &str, field: Option<&str>) -> Result<()> {
    info!("Reading secret {}", path);

    let client = connect(global).await?;
    let secret = client
        .get(path)
        .await
        .with_context(|| format!("Failed to get secret {}", path))?;

    if let Some(field) = field {
        let value = secret
            .get(field)
            .with_context(|| format!("Field '{}' not found in {}", field, path))?;
        println!("{}", display_value(value));
        return Ok(());
    }

    println!("{}", render_secret(&secret, global.format(client.config()))?);
    Ok(())
}
