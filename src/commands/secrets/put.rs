use anyhow::{Context, Result};
use colored::*;
use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::api::SecretData;
use crate::cli::GlobalOptions;
use crate::commands::connect;
use crate::error::Error;

/// Parses `key=value` arguments. Values keep any further `=` characters.
pub fn parse_pairs(pairs: &[String]) -> Result<SecretData, Error> {
    let mut data = SecretData::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::Validation(format!("invalid key=value pair: {}", pair)))?;
        if key.is_empty() {
            return Err(Error::Validation(format!("empty key in pair: {}", pair)));
        }
        data.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(data)
}

/// Reads a JSON object of fields from `path`.
pub fn read_data_file(path: &Path) -> Result<SecretData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;

    match value {
        Value::Object(fields) => Ok(fields.into_iter().collect()),
        _ => Err(Error::Validation(format!(
            "{} must contain a JSON object",
            path.display()
        ))
        .into()),
    }
}

pub async fn put_command(
    global: &GlobalOptions,
    path: &str,
    pairs: &[String],
    file: Option<&Path>,
) -> Result<()> {
    info!("Writing secret {}", path);

    let data = match file {
        Some(file) => read_data_file(file)?,
        None => parse_pairs(pairs)?,
    };
    if data.is_empty() {
        return Err(Error::Validation("no secret data given".to_string()).into());
    }

    let client = connect(global).await?;
    client
        .put(path, &data)
        .await
        .with_context(|| format!("Failed to write secret {}", path))?;

    println!("{} Secret written to {}", "✓".bright_green(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_pairs_splitting_on_first_equals() {
        let data =
            parse_pairs(&args(&["user=admin", "dsn=postgres://h/db?sslmode=require"])).unwrap();

        assert_eq!(data["user"], json!("admin"));
        assert_eq!(data["dsn"], json!("postgres://h/db?sslmode=require"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let data = parse_pairs(&args(&["flag="])).unwrap();
        assert_eq!(data["flag"], json!(""));
    }

    #[test]
    fn pair_without_equals_is_validation_error() {
        let err = parse_pairs(&args(&["user=admin", "oops"])).unwrap_err();
        assert!(matches!(err, Error::Validation(msg) if msg.contains("oops")));
    }

    #[test]
    fn pair_without_key_is_validation_error() {
        assert!(matches!(parse_pairs(&args(&["=value"])), Err(Error::Validation(_))));
    }

    #[test]
    fn reads_json_object_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        fs::write(&path, r#"{"user": "admin", "port": 5432}"#).unwrap();

        let data = read_data_file(&path).unwrap();
        assert_eq!(data["port"], json!(5432));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn rejects_non_object_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        fs::write(&path, "[1, 2]").unwrap();

        assert!(read_data_file(&path).is_err());
    }
}
