use super::Credential;
use crate::error::{Error, Result};
use clap::ValueEnum;
use log::info;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub const TOKEN_VAR: &str = "VAULT_TOKEN";
pub const USERNAME_VAR: &str = "VAULT_USERNAME";
pub const PASSWORD_VAR: &str = "VAULT_PASSWORD";
pub const ROLE_ID_VAR: &str = "VAULT_ROLE_ID";
pub const SECRET_ID_VAR: &str = "VAULT_SECRET_ID";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AuthMethod {
    #[default]
    Token,
    Userpass,
    Approle,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Token => write!(f, "token"),
            AuthMethod::Userpass => write!(f, "userpass"),
            AuthMethod::Approle => write!(f, "approle"),
        }
    }
}

/// Credential fields gathered from flags, environment variables or a `.env` file.
/// Any field may be missing until [`CredentialSource::into_credential`] is called.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct CredentialSource {
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<String>,
    pub secret_id: Option<String>,
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialSource")
            .field("token", &redact(&self.token))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("role_id", &self.role_id)
            .field("secret_id", &redact(&self.secret_id))
            .finish()
    }
}

impl CredentialSource {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            token: get(TOKEN_VAR),
            username: get(USERNAME_VAR),
            password: get(PASSWORD_VAR),
            role_id: get(ROLE_ID_VAR),
            secret_id: get(SECRET_ID_VAR),
        }
    }

    pub fn from_env() -> Self {
        info!("Importing credentials from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `VAULT_*` entries from a `.env` file without touching the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        info!("Importing credentials from .env file: {:?}", path);

        if !path.exists() {
            return Err(Error::Validation(format!(
                "environment file not found: {}",
                path.display()
            )));
        }

        let mut vars = HashMap::new();
        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            Error::Validation(format!("failed to load {}: {}", path.display(), e))
        })?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                Error::Validation(format!("failed to parse {}: {}", path.display(), e))
            })?;
            vars.insert(key, value);
        }

        Ok(Self::from_lookup(|key| vars.get(key).cloned()))
    }

    /// Fills fields missing from `self` with the ones in `fallback`.
    pub fn or(self, fallback: CredentialSource) -> Self {
        Self {
            token: self.token.or(fallback.token),
            username: self.username.or(fallback.username),
            password: self.password.or(fallback.password),
            role_id: self.role_id.or(fallback.role_id),
            secret_id: self.secret_id.or(fallback.secret_id),
        }
    }

    pub fn into_credential(self, method: AuthMethod) -> Result<Credential> {
        match method {
            AuthMethod::Token => {
                let token = self.token.ok_or_else(|| {
                    Error::Validation("token is required for token auth".to_string())
                })?;
                Ok(Credential::Token(token))
            }
            AuthMethod::Userpass => match (self.username, self.password) {
                (Some(username), Some(password)) => {
                    Ok(Credential::UserPass { username, password })
                }
                _ => Err(Error::Validation(
                    "username and password are required for userpass auth".to_string(),
                )),
            },
            AuthMethod::Approle => match (self.role_id, self.secret_id) {
                (Some(role_id), Some(secret_id)) => {
                    Ok(Credential::AppRole { role_id, secret_id })
                }
                _ => Err(Error::Validation(
                    "role-id and secret-id are required for approle auth".to_string(),
                )),
            },
        }
    }
}
