use super::client::VaultClient;
use super::kv;
use super::models::TokenInfo;
use crate::auth::{self, Credential};
use crate::config::{Config, ConfigStore, Environment};
use crate::discovery::AddressResolver;
use crate::error::{Error, Result};
use log::{debug, info, warn};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Field name to value mapping of one secret version
pub type SecretData = BTreeMap<String, Value>;

/// How [`SecretClient::connect`] picks and reaches its environment.
#[derive(Default)]
pub struct ClientOptions {
    /// Bind to this environment instead of the configured current one. Not persisted.
    pub environment: Option<String>,
    /// Consulted when the environment has no `vault_addr` and `auto_refresh` is enabled.
    pub resolver: Option<Box<dyn AddressResolver>>,
}

/// Binds the active environment of a [`Config`] to a live Vault session and
/// exposes KV v2 secret operations on it.
#[derive(Debug)]
pub struct SecretClient {
    store: ConfigStore,
    config: Config,
    environment: String,
    session: VaultClient,
}

impl SecretClient {
    /// Connect to the current environment. Fails if its address is not configured.
    pub async fn new(store: ConfigStore) -> Result<Self> {
        Self::connect(store, ClientOptions::default()).await
    }

    pub async fn connect(store: ConfigStore, options: ClientOptions) -> Result<Self> {
        let config = store.load()?;
        let environment = options
            .environment
            .unwrap_or_else(|| config.current_environment.clone());

        let env = config
            .environment(&environment)
            .ok_or_else(|| Error::Config(format!("environment not found: {}", environment)))?;

        let address = if !env.vault_addr.is_empty() {
            env.vault_addr.clone()
        } else if let Some(resolver) = options.resolver.as_ref().filter(|_| config.auto_refresh) {
            let address = resolver.resolve(env).await?;
            info!("Resolved Vault address for {}: {}", environment, address);
            address
        } else {
            return Err(Error::Config(format!(
                "vault address not configured for environment: {}",
                environment
            )));
        };

        let mut session = VaultClient::new(address)?;
        if env.has_token() {
            debug!("Attaching saved token for {}", environment);
            session.set_token(env.token.clone());
        }

        Ok(Self {
            store,
            config,
            environment,
            session,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn environment_name(&self) -> &str {
        &self.environment
    }

    pub fn environment(&self) -> Result<&Environment> {
        self.config
            .environment(&self.environment)
            .ok_or_else(|| Error::Config(format!("environment not found: {}", self.environment)))
    }

    pub fn session(&self) -> &VaultClient {
        &self.session
    }

    /// Key names directly under `path`. Empty when there is nothing there.
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let metadata_path = kv::metadata_path(path);
        debug!("Listing {} ({})", path, metadata_path);

        let response = self.session.list(&metadata_path).await?;
        let keys = response
            .and_then(|r| r.data)
            .and_then(|data| match data.get("keys") {
                Some(Value::Array(keys)) => Some(
                    keys.iter()
                        .filter_map(|k| k.as_str().map(str::to_string))
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default();

        Ok(keys)
    }

    /// Latest version of the secret at `path`.
    pub async fn get(&self, path: &str) -> Result<SecretData> {
        let data_path = kv::data_path(path);
        debug!("Reading {} ({})", path, data_path);

        let data = self
            .session
            .read(&data_path)
            .await?
            .and_then(|r| r.data)
            .ok_or_else(|| Error::NotFound(path.to_string()))?;

        // KV v2 nests the fields under data.data next to version metadata;
        // a deleted version keeps the metadata with data.data set to null.
        let versioned = kv::is_data_plane(&data_path);
        let fields = match data {
            Value::Object(mut outer) if versioned && outer.contains_key("metadata") => {
                match outer.remove("data") {
                    Some(Value::Object(fields)) => fields,
                    _ => return Err(Error::NotFound(path.to_string())),
                }
            }
            Value::Object(fields) => fields,
            _ => return Err(Error::NotFound(path.to_string())),
        };

        Ok(fields.into_iter().collect())
    }

    pub async fn put(&self, path: &str, data: &SecretData) -> Result<()> {
        let data_path = kv::data_path(path);
        info!("Writing {} field(s) to {}", data.len(), data_path);

        let body = json!({ "data": data });
        self.session
            .write(&data_path, &body)
            .await
            .map_err(|e| into_write_error(&data_path, e))?;
        Ok(())
    }

    /// Soft-deletes the latest version of the secret at `path`.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let data_path = kv::data_path(path);
        info!("Deleting {}", data_path);

        self.session
            .delete(&data_path)
            .await
            .map_err(|e| into_write_error(&data_path, e))
    }

    /// Authenticates with `credential`, then stores the token on the bound environment.
    /// On failure neither the session nor the configuration file changes.
    pub async fn login(&mut self, credential: &Credential) -> Result<String> {
        let token = auth::authenticate(&self.session, credential).await?;
        self.save_token(token.clone())?;
        self.session.set_token(token.clone());
        info!("Logged in to {} with {} method", self.environment, credential.method());
        Ok(token)
    }

    pub async fn login_with_token(&mut self, token: &str) -> Result<String> {
        self.login(&Credential::Token(token.to_string())).await
    }

    pub async fn login_with_userpass(&mut self, username: &str, password: &str) -> Result<String> {
        self.login(&Credential::UserPass {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn login_with_approle(&mut self, role_id: &str, secret_id: &str) -> Result<String> {
        self.login(&Credential::AppRole {
            role_id: role_id.to_string(),
            secret_id: secret_id.to_string(),
        })
        .await
    }

    /// Forgets the saved token, whether or not the service still considers it valid.
    pub fn logout(&mut self) -> Result<()> {
        self.save_token(String::new())?;
        self.session.clear_token();
        info!("Logged out of {}", self.environment);
        Ok(())
    }

    /// Looks up the session token. Callers render an error as "not authenticated".
    pub async fn token_info(&self) -> Result<TokenInfo> {
        if self.session.token().is_none() {
            return Err(Error::Auth(format!(
                "not logged in to environment {}",
                self.environment
            )));
        }

        let response = self.session.lookup_self().await?;
        let data = response.data.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| Error::Api {
            status: 200,
            path: crate::api::constants::auth::TOKEN_LOOKUP_SELF.to_string(),
            message: format!("unexpected token lookup payload: {}", e),
        })
    }

    fn save_token(&mut self, token: String) -> Result<()> {
        let mut config = self.config.clone();
        let env = config
            .environment_mut(&self.environment)
            .ok_or_else(|| Error::Config(format!("environment not found: {}", self.environment)))?;
        env.token = token;

        self.store.save(&config)?;
        self.config = config;
        Ok(())
    }
}

fn into_write_error(path: &str, err: Error) -> Error {
    match err {
        Error::Api { message, .. } => Error::Write {
            path: path.to_string(),
            message,
        },
        other => {
            warn!("Write to {} failed: {}", path, other);
            other
        }
    }
}
