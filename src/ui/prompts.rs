use anyhow::Result;
use dialoguer::{Input, Password, Select};
use is_terminal::IsTerminal;

/// Whether stdin is attached to a terminal, i.e. prompting makes sense
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

pub fn prompt_username(default: Option<String>) -> Result<String> {
    if let Some(username) = default {
        return Ok(username);
    }
    Ok(Input::<String>::new().with_prompt("Username").interact_text()?)
}

pub fn prompt_password(default: Option<String>) -> Result<String> {
    if let Some(password) = default {
        return Ok(password);
    }
    Ok(Password::new().with_prompt("Password").interact()?)
}

pub fn prompt_environment_selection(env_names: &[&str], current_env: &str) -> Result<String> {
    let items: Vec<String> = env_names
        .iter()
        .map(|env| {
            if *env == current_env {
                format!("{} (current)", env)
            } else {
                env.to_string()
            }
        })
        .collect();
    let default_index = env_names
        .iter()
        .position(|env| *env == current_env)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Select environment")
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(env_names[selection].to_string())
}
