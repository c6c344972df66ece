//! Authentication against Vault.
//!
//! [`authenticate`] speaks the login protocol for each [`Credential`] variant and
//! returns the session token. It never touches the configuration file; persisting
//! the token is left to the caller.

pub mod credentials;

use crate::api::VaultClient;
use crate::api::constants;
use crate::error::{Error, Result};
use log::{debug, info};
use serde_json::json;
use std::fmt;

pub use credentials::{AuthMethod, CredentialSource};

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Token(String),
    UserPass { username: String, password: String },
    AppRole { role_id: String, secret_id: String },
}

impl Credential {
    pub fn method(&self) -> AuthMethod {
        match self {
            Credential::Token(_) => AuthMethod::Token,
            Credential::UserPass { .. } => AuthMethod::Userpass,
            Credential::AppRole { .. } => AuthMethod::Approle,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
            Credential::UserPass { username, .. } => f
                .debug_struct("UserPass")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credential::AppRole { role_id, .. } => f
                .debug_struct("AppRole")
                .field("role_id", role_id)
                .field("secret_id", &"<redacted>")
                .finish(),
        }
    }
}

/// Performs the login handshake for `credential` and returns the session token.
///
/// `session` is only used to reach the service; its own token is never replaced.
pub async fn authenticate(session: &VaultClient, credential: &Credential) -> Result<String> {
    info!(
        "Authenticating to {} with {} method",
        session.address(),
        credential.method()
    );

    match credential {
        Credential::Token(token) => {
            if token.is_empty() {
                return Err(Error::Validation(
                    "token is required for token auth".to_string(),
                ));
            }

            session
                .with_token(token.clone())
                .lookup_self()
                .await
                .map_err(|e| into_auth_error("token lookup", e))?;

            debug!("Token accepted by {}", session.address());
            Ok(token.clone())
        }
        Credential::UserPass { username, password } => {
            if username.is_empty() {
                return Err(Error::Validation(
                    "username is required for userpass auth".to_string(),
                ));
            }

            let path = constants::auth::userpass_login(username);
            let body = json!({ "password": password });
            login(session, &path, &body).await
        }
        Credential::AppRole { role_id, secret_id } => {
            if role_id.is_empty() || secret_id.is_empty() {
                return Err(Error::Validation(
                    "role-id and secret-id are required for approle auth".to_string(),
                ));
            }

            let body = json!({ "role_id": role_id, "secret_id": secret_id });
            login(session, constants::auth::APPROLE_LOGIN, &body).await
        }
    }
}

async fn login(session: &VaultClient, path: &str, body: &serde_json::Value) -> Result<String> {
    let response = session
        .write(path, body)
        .await
        .map_err(|e| into_auth_error(path, e))?;

    let token = response
        .and_then(|r| r.auth)
        .map(|auth| auth.client_token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Auth(format!("no client token in {} response", path)))?;

    debug!("Client token issued by {}", path);
    Ok(token)
}

/// Rejections by the remote service become [`Error::Auth`]; transport failures stay as they are.
fn into_auth_error(operation: &str, err: Error) -> Error {
    match err {
        Error::Api {
            status, message, ..
        } => Error::Auth(format!("{} rejected ({}): {}", operation, status, message)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!(
            "{:?} {:?} {:?}",
            Credential::Token("s.abc".to_string()),
            Credential::UserPass {
                username: "jane".to_string(),
                password: "hunter2".to_string()
            },
            Credential::AppRole {
                role_id: "role".to_string(),
                secret_id: "shh".to_string()
            }
        );
        assert!(!rendered.contains("s.abc"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("shh"));
        assert!(rendered.contains("jane"));
    }

    #[tokio::test]
    async fn approle_with_empty_ids_fails_before_any_request() {
        // Nothing listens on port 9; a request would surface as Error::Http.
        let session = VaultClient::new("http://127.0.0.1:9").unwrap();
        let credential = Credential::AppRole {
            role_id: String::new(),
            secret_id: "secret".to_string(),
        };

        let err = authenticate(&session, &credential).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn userpass_with_empty_username_fails_before_any_request() {
        let session = VaultClient::new("http://127.0.0.1:9").unwrap();
        let credential = Credential::UserPass {
            username: String::new(),
            password: "pw".to_string(),
        };

        let err = authenticate(&session, &credential).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
