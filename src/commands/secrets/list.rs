use anyhow::{Context, Result};
use log::info;

use crate::cli::GlobalOptions;
use crate::commands::connect;
use crate::output::render_keys;

pub async fn list_command(global: &GlobalOptions, path: &str) -> Result<()> {
    info!("Listing secrets at {}", path);

    let client = connect(global).await?;
    let keys = client
        .list(path)
        .await
        .with_context(|| format!("Failed to list secrets at {}", path))?;

    let rendered = render_keys(&keys, global.format(client.config()))?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}
