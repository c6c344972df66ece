use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct EnvCommands {
    #[command(subcommand)]
    pub command: EnvSubcommands,
}

#[derive(Subcommand, Debug)]
pub enum EnvSubcommands {
    /// List available environments
    List,
    /// Switch to a different environment
    Use {
        /// Environment name to switch to (prompts when omitted)
        name: Option<String>,
    },
    /// Show the current environment name
    Current,
    /// Show current environment details
    Info,
}
