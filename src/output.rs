//! Rendering of command results as table, JSON or YAML

use crate::api::{SecretData, TokenInfo};
use crate::config::{Config, OutputFormat};
use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets};
use serde::Serialize;
use serde_json::Value;

/// Environment as shown by `env list` / `env info`. Never includes the token.
#[derive(Debug, Serialize)]
pub struct EnvironmentSummary<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub current: bool,
    pub project_id: &'a str,
    pub region: &'a str,
    pub cluster_name: &'a str,
    pub namespace: &'a str,
    pub service_name: &'a str,
    pub vault_addr: &'a str,
    pub logged_in: bool,
}

pub fn environment_summaries(config: &Config) -> Vec<EnvironmentSummary<'_>> {
    config
        .environments
        .iter()
        .map(|(key, env)| EnvironmentSummary {
            key,
            name: &env.name,
            current: *key == config.current_environment,
            project_id: &env.project_id,
            region: &env.region,
            cluster_name: &env.cluster_name,
            namespace: &env.namespace,
            service_name: &env.service_name,
            vault_addr: &env.vault_addr,
            logged_in: env.has_token(),
        })
        .collect()
}

pub fn render_environments(config: &Config, format: OutputFormat) -> Result<String> {
    let summaries = environment_summaries(config);
    match format {
        OutputFormat::Table => {
            let mut table = base_table(&["Environment", "Current", "Cluster", "Region"]);
            for env in &summaries {
                table.add_row(vec![
                    env.key,
                    if env.current { "✓" } else { "" },
                    env.cluster_name,
                    env.region,
                ]);
            }
            Ok(table.to_string())
        }
        _ => serialize(&summaries, format),
    }
}

pub fn render_environment(
    summary: &EnvironmentSummary<'_>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let addr = if summary.vault_addr.is_empty() {
                "(discovered at runtime)"
            } else {
                summary.vault_addr
            };
            Ok([
                format!("Environment: {}", summary.key),
                format!("Name:        {}", summary.name),
                format!("Project ID:  {}", summary.project_id),
                format!("Cluster:     {}", summary.cluster_name),
                format!("Region:      {}", summary.region),
                format!("Namespace:   {}", summary.namespace),
                format!("Vault Addr:  {}", addr),
            ]
            .join("\n"))
        }
        _ => serialize(summary, format),
    }
}

pub fn render_keys(keys: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(keys.join("\n")),
        _ => serialize(&keys, format),
    }
}

pub fn render_secret(data: &SecretData, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut table = base_table(&["Key", "Value"]);
            for (key, value) in data {
                table.add_row(vec![key.clone(), display_value(value)]);
            }
            Ok(table.to_string())
        }
        _ => serialize(data, format),
    }
}

pub fn render_token_info(info: &TokenInfo, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut lines = vec!["Authenticated: Yes".to_string()];
            if !info.display_name.is_empty() {
                lines.push(format!("Display Name: {}", info.display_name));
            }
            if !info.accessor.is_empty() {
                lines.push(format!("Token Accessor: {}", info.accessor));
            }
            lines.push(format!("Policies: [{}]", info.policies.join(", ")));
            lines.push(format!("TTL: {}s", info.ttl));
            if let Some(expire_time) = &info.expire_time {
                lines.push(format!("Expires: {}", expire_time));
            }
            Ok(lines.join("\n"))
        }
        _ => serialize(info, format),
    }
}

/// Plain text for a secret value: strings unquoted, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .context("Failed to serialize output as YAML"),
        // tables are rendered by the callers
        OutputFormat::Json | OutputFormat::Table => {
            serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
        }
    }
}

fn base_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}
