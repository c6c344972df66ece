pub mod auth;
pub mod env;
pub mod secrets;

pub use auth::{AuthCommands, AuthSubcommands, LoginArgs};
pub use env::{EnvCommands, EnvSubcommands};
pub use secrets::{SecretsCommands, SecretsSubcommands};
