use anyhow::{Context, Result};
use colored::*;
use log::info;

use crate::cli::GlobalOptions;
use crate::ui::{is_interactive, prompt_environment_selection};

pub fn use_command(global: &GlobalOptions, name: Option<String>) -> Result<()> {
    info!("Starting env use");

    let store = global.store()?;
    let mut config = store.load().context("Failed to load config")?;

    let selected_env = match name {
        Some(name) => name,
        None if is_interactive() => {
            let env_names = config.list_environments();
            prompt_environment_selection(&env_names, &config.current_environment)?
        }
        None => anyhow::bail!("Environment name is required when not running interactively"),
    };

    config.set_current_environment(&selected_env)?;
    store.save(&config).context("Failed to save config")?;

    println!(
        "{} Switched to environment: {}",
        "✓".bright_green(),
        selected_env.bright_green().bold()
    );
    Ok(())
}
