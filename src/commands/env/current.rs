use anyhow::{Context, Result};

use crate::cli::GlobalOptions;

pub fn current_command(global: &GlobalOptions) -> Result<()> {
    let config = global.store()?.load().context("Failed to load config")?;
    println!("{}", config.current_environment);
    Ok(())
}
