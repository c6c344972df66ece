use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic response envelope returned by the Vault HTTP API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultResponse {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub auth: Option<AuthInfo>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

/// `auth` block of a login response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthInfo {
    pub client_token: String,
    #[serde(default)]
    pub accessor: String,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub renewable: bool,
}

/// Error body, e.g. `{"errors": ["permission denied"]}`
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Subset of the token self-lookup data shown by `auth status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub accessor: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub ttl: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<String>,
    #[serde(default)]
    pub renewable: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entity_id: String,
}
