//! Vault HTTP API constants

/// Every API path is served under this version prefix
pub const API_VERSION_PREFIX: &str = "v1";

/// Header carrying the session token
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Mount of the versioned KV engine that logical paths are relative to
pub const KV_MOUNT_PREFIX: &str = "secret/";

/// Data plane prefix (read/write/delete)
pub const KV_DATA_PREFIX: &str = "secret/data/";

/// Metadata plane prefix (list)
pub const KV_METADATA_PREFIX: &str = "secret/metadata/";

pub const USER_AGENT: &str = concat!("vaultenv/", env!("CARGO_PKG_VERSION"));

/// Auth endpoints
pub mod auth {
    pub const TOKEN_LOOKUP_SELF: &str = "auth/token/lookup-self";

    pub const APPROLE_LOGIN: &str = "auth/approle/login";

    /// Userpass login for `username`, URL-encoded into the last segment
    pub fn userpass_login(username: &str) -> String {
        format!("auth/userpass/login/{}", urlencoding::encode(username))
    }
}

/// Build the full request URL for an API path
pub fn api_url(address: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        address.trim_end_matches('/'),
        API_VERSION_PREFIX,
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_without_duplicate_slashes() {
        assert_eq!(
            api_url("https://vault.example.com/", "/secret/data/foo"),
            "https://vault.example.com/v1/secret/data/foo"
        );
        assert_eq!(
            api_url("http://127.0.0.1:8200", "auth/token/lookup-self"),
            "http://127.0.0.1:8200/v1/auth/token/lookup-self"
        );
    }

    #[test]
    fn userpass_login_encodes_username() {
        assert_eq!(
            auth::userpass_login("jane doe"),
            "auth/userpass/login/jane%20doe"
        );
    }
}
