use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use vaultenv::cli::Cli;
use vaultenv::commands;
use vaultenv::config::default_config_dir;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    info!("Starting vaultenv");
    debug!(
        "Config override: {:?}, environment override: {:?}",
        cli.global.config, cli.global.environment
    );

    commands::dispatch(&cli.global, cli.command).await
}

/// Logs go to a file next to the config (truncated on each run) so they never mix
/// with command output.
fn init_logging(cli: &Cli) {
    let log_dir = cli
        .global
        .config
        .as_ref()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| default_config_dir().ok());

    // The directory itself is created by the config store with private permissions.
    let log_file = log_dir.filter(|dir| dir.is_dir()).and_then(|dir| {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(dir.join("vaultenv.log"))
            .ok()
    });

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(log_file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    builder.init();
}
