pub mod prompts;

pub use prompts::{is_interactive, prompt_environment_selection, prompt_password, prompt_username};
