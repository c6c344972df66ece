use anyhow::{Context, Result};
use log::info;

use crate::cli::GlobalOptions;
use crate::output::render_environments;

pub fn list_command(global: &GlobalOptions) -> Result<()> {
    info!("Executing env list command");

    let config = global.store()?.load().context("Failed to load config")?;
    let rendered = render_environments(&config, global.format(&config))?;
    println!("{}", rendered);

    Ok(())
}
