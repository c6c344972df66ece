//! Login and token persistence against a mock Vault server

mod common;

use common::{dev_only_store, token_of};
use mockito::{Matcher, Server};
use serde_json::json;
use tempfile::TempDir;
use vaultenv::Error;
use vaultenv::api::SecretClient;
use vaultenv::auth::Credential;
use vaultenv::config::ConfigStore;

fn login_response(token: &str) -> String {
    json!({
        "auth": {
            "client_token": token,
            "accessor": "acc",
            "policies": ["default"],
            "lease_duration": 3600,
            "renewable": true
        }
    })
    .to_string()
}

#[tokio::test]
async fn token_login_persists_token() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    let lookup = server
        .mock("GET", "/v1/auth/token/lookup-self")
        .match_header("x-vault-token", "s.valid")
        .with_status(200)
        .with_body(r#"{"data":{"accessor":"acc","policies":["default"],"ttl":0}}"#)
        .create_async()
        .await;

    let mut client = SecretClient::new(store.clone()).await.unwrap();
    let token = client.login_with_token("s.valid").await.unwrap();

    assert_eq!(token, "s.valid");
    assert_eq!(client.session().token(), Some("s.valid"));
    assert_eq!(token_of(&store, "dev"), "s.valid");
    lookup.assert_async().await;
}

#[tokio::test]
async fn token_login_with_minimal_hand_written_config() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        format!(
            "current_environment: \"dev\"\n\
             environments: {{dev: {{vault_addr: \"{}\", token: \"\"}}}}\n",
            server.url()
        ),
    )
    .unwrap();

    let lookup = server
        .mock("GET", "/v1/auth/token/lookup-self")
        .match_header("x-vault-token", "s.abcdef")
        .with_status(200)
        .with_body(r#"{"data":{"accessor":"acc","policies":["default"],"ttl":3600}}"#)
        .create_async()
        .await;

    let store = ConfigStore::new(&path);
    let mut client = SecretClient::new(store.clone()).await.unwrap();
    client.login_with_token("s.abcdef").await.unwrap();

    lookup.assert_async().await;
    assert_eq!(token_of(&store, "dev"), "s.abcdef");
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("s.abcdef"));
}

#[tokio::test]
async fn rejected_token_leaves_state_untouched() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "s.old");
    let before = std::fs::read_to_string(store.path()).unwrap();

    server
        .mock("GET", "/v1/auth/token/lookup-self")
        .match_header("x-vault-token", "s.bogus")
        .with_status(403)
        .with_body(r#"{"errors":["permission denied"]}"#)
        .create_async()
        .await;

    let mut client = SecretClient::new(store.clone()).await.unwrap();
    let err = client.login_with_token("s.bogus").await.unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(client.session().token(), Some("s.old"));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[tokio::test]
async fn empty_token_is_rejected_locally() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    let lookup = server
        .mock("GET", "/v1/auth/token/lookup-self")
        .expect(0)
        .create_async()
        .await;

    let mut client = SecretClient::new(store).await.unwrap();
    let err = client.login_with_token("").await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    lookup.assert_async().await;
}

#[tokio::test]
async fn userpass_login_stores_issued_token() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    let login = server
        .mock("POST", "/v1/auth/userpass/login/jane")
        .match_body(Matcher::Json(json!({"password": "pw"})))
        .with_status(200)
        .with_body(login_response("s.issued"))
        .create_async()
        .await;

    let mut client = SecretClient::new(store.clone()).await.unwrap();
    let token = client.login_with_userpass("jane", "pw").await.unwrap();

    assert_eq!(token, "s.issued");
    assert_eq!(token_of(&store, "dev"), "s.issued");
    login.assert_async().await;
}

#[tokio::test]
async fn userpass_username_is_url_encoded() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    let login = server
        .mock("POST", "/v1/auth/userpass/login/jane%40example.com")
        .with_status(200)
        .with_body(login_response("s.issued"))
        .create_async()
        .await;

    let mut client = SecretClient::new(store).await.unwrap();
    client
        .login_with_userpass("jane@example.com", "pw")
        .await
        .unwrap();

    login.assert_async().await;
}

#[tokio::test]
async fn bad_password_is_auth_error() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    server
        .mock("POST", "/v1/auth/userpass/login/jane")
        .with_status(400)
        .with_body(r#"{"errors":["invalid username or password"]}"#)
        .create_async()
        .await;

    let mut client = SecretClient::new(store.clone()).await.unwrap();
    let err = client.login_with_userpass("jane", "wrong").await.unwrap_err();

    assert!(matches!(err, Error::Auth(msg) if msg.contains("invalid username or password")));
    assert_eq!(token_of(&store, "dev"), "");
    assert_eq!(client.session().token(), None);
}

#[tokio::test]
async fn login_response_without_token_is_auth_error() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    server
        .mock("POST", "/v1/auth/userpass/login/jane")
        .with_status(200)
        .with_body(r#"{"auth":null}"#)
        .create_async()
        .await;

    let mut client = SecretClient::new(store).await.unwrap();
    let err = client.login_with_userpass("jane", "pw").await.unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn approle_login_sends_both_ids() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    let login = server
        .mock("POST", "/v1/auth/approle/login")
        .match_body(Matcher::Json(json!({"role_id": "r-1", "secret_id": "s-1"})))
        .with_status(200)
        .with_body(login_response("s.approle"))
        .create_async()
        .await;

    let mut client = SecretClient::new(store.clone()).await.unwrap();
    client
        .login(&Credential::AppRole {
            role_id: "r-1".to_string(),
            secret_id: "s-1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(token_of(&store, "dev"), "s.approle");
    login.assert_async().await;
}

#[tokio::test]
async fn approle_with_missing_secret_id_makes_no_request() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = dev_only_store(&dir, &server.url(), "");

    let login = server
        .mock("POST", "/v1/auth/approle/login")
        .expect(0)
        .create_async()
        .await;

    let mut client = SecretClient::new(store).await.unwrap();
    let err = client.login_with_approle("r-1", "").await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    login.assert_async().await;
}
