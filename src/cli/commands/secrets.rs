use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SecretsCommands {
    #[command(subcommand)]
    pub command: SecretsSubcommands,
}

#[derive(Subcommand, Debug)]
pub enum SecretsSubcommands {
    /// List secrets at a path
    List {
        /// Path under the KV mount, e.g. secret/app
        path: String,
    },
    /// Read a secret
    Get {
        path: String,
        /// Print only this field
        #[arg(long)]
        field: Option<String>,
    },
    /// Write a secret
    Put {
        path: String,
        /// Fields as key=value pairs
        #[arg(value_name = "KEY=VALUE", required_unless_present = "file")]
        pairs: Vec<String>,
        /// JSON file containing the secret data
        #[arg(long, conflicts_with = "pairs")]
        file: Option<PathBuf>,
    },
    /// Delete the latest version of a secret
    Delete { path: String },
}
