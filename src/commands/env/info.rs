use anyhow::{Context, Result};
use log::info;

use crate::cli::GlobalOptions;
use crate::output::{environment_summaries, render_environment};

pub fn info_command(global: &GlobalOptions) -> Result<()> {
    let config = global.store()?.load().context("Failed to load config")?;
    let name = global
        .environment
        .as_deref()
        .unwrap_or(&config.current_environment);
    info!("Showing details for environment {}", name);

    let summaries = environment_summaries(&config);
    let summary = summaries
        .iter()
        .find(|s| s.key == name)
        .with_context(|| format!("Environment '{}' not found", name))?;

    println!("{}", render_environment(summary, global.format(&config))?);
    Ok(())
}
