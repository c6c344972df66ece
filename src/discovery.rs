//! Service address discovery for environments without a configured `vault_addr`.

use crate::config::Environment;
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::process::Command;

/// Port the in-cluster Vault service listens on
pub const DISCOVERED_PORT: u16 = 8200;

/// Resolves a reachable service address for an environment.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, environment: &Environment) -> Result<String>;
}

/// Looks up the load balancer IP of the Vault service with `gcloud` and `kubectl`.
#[derive(Debug, Clone)]
pub struct ClusterResolver {
    gcloud: String,
    kubectl: String,
}

impl Default for ClusterResolver {
    fn default() -> Self {
        Self {
            gcloud: "gcloud".to_string(),
            kubectl: "kubectl".to_string(),
        }
    }
}

impl ClusterResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use alternative binaries, e.g. wrappers or absolute paths
    pub fn with_binaries(gcloud: impl Into<String>, kubectl: impl Into<String>) -> Self {
        Self {
            gcloud: gcloud.into(),
            kubectl: kubectl.into(),
        }
    }

    async fn fetch_credentials(&self, environment: &Environment) -> Result<()> {
        let zone = format!("{}-a", environment.region);

        let zonal = self
            .run(
                environment,
                &self.gcloud,
                &[
                    "container",
                    "clusters",
                    "get-credentials",
                    &environment.cluster_name,
                    "--zone",
                    &zone,
                    "--project",
                    &environment.project_id,
                ],
            )
            .await;
        match zonal {
            Ok(_) => return Ok(()),
            Err(e) => debug!(
                "Zonal lookup for {} failed, trying region {}: {}",
                environment.cluster_name, environment.region, e
            ),
        }

        self.run(
            environment,
            &self.gcloud,
            &[
                "container",
                "clusters",
                "get-credentials",
                &environment.cluster_name,
                "--region",
                &environment.region,
                "--project",
                &environment.project_id,
            ],
        )
        .await
        .map(|_| ())
        .map_err(|e| {
            with_context(
                e,
                &format!(
                    "failed to get cluster credentials (tried zone {} and region {})",
                    zone, environment.region
                ),
            )
        })
    }

    /// Runs `program` and returns its trimmed stdout.
    async fn run(
        &self,
        environment: &Environment,
        program: &str,
        args: &[&str],
    ) -> Result<String> {
        debug!("Running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                discovery_error(environment, format!("failed to run {}: {}", program, e))
            })?;

        if !output.status.success() {
            return Err(discovery_error(
                environment,
                format!(
                    "{} exited with {}: {}",
                    program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl AddressResolver for ClusterResolver {
    async fn resolve(&self, environment: &Environment) -> Result<String> {
        info!(
            "Discovering Vault address for cluster {} in {}",
            environment.cluster_name, environment.region
        );

        self.fetch_credentials(environment).await?;

        let ip = self
            .run(
                environment,
                &self.kubectl,
                &[
                    "get",
                    "svc",
                    &environment.service_name,
                    "-n",
                    &environment.namespace,
                    "-o",
                    "jsonpath={.status.loadBalancer.ingress[0].ip}",
                ],
            )
            .await
            .map_err(|e| with_context(e, "failed to get service IP"))?;

        if ip.is_empty() {
            warn!("Service {} has no external IP yet", environment.service_name);
            return Err(discovery_error(
                environment,
                format!(
                    "no external IP found for service {} in namespace {}",
                    environment.service_name, environment.namespace
                ),
            ));
        }

        Ok(address_for_ip(&ip, environment.use_nip_io))
    }
}

/// `http://<ip>:8200`, or the nip.io wildcard host for the IP when `use_nip_io` is set.
pub fn address_for_ip(ip: &str, use_nip_io: bool) -> String {
    if use_nip_io {
        format!("http://{}.nip.io:{}", ip, DISCOVERED_PORT)
    } else {
        format!("http://{}:{}", ip, DISCOVERED_PORT)
    }
}

fn discovery_error(environment: &Environment, message: String) -> Error {
    Error::Discovery {
        environment: environment.name.clone(),
        message,
    }
}

fn with_context(err: Error, context: &str) -> Error {
    match err {
        Error::Discovery {
            environment,
            message,
        } => Error::Discovery {
            environment,
            message: format!("{}: {}", context, message),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_addresses_for_both_schemes() {
        assert_eq!(address_for_ip("10.0.0.7", false), "http://10.0.0.7:8200");
        assert_eq!(address_for_ip("10.0.0.7", true), "http://10.0.0.7.nip.io:8200");
    }

    fn environment() -> Environment {
        Environment {
            name: "Development".to_string(),
            project_id: "p".to_string(),
            region: "us-central1".to_string(),
            cluster_name: "dev".to_string(),
            namespace: "vault".to_string(),
            service_name: "vault".to_string(),
            vault_addr: String::new(),
            vault_port: "8200".to_string(),
            use_nip_io: false,
            token: String::new(),
        }
    }

    #[tokio::test]
    async fn missing_binaries_surface_as_discovery_error() {
        let resolver = ClusterResolver::with_binaries(
            "/nonexistent/vaultenv-gcloud",
            "/nonexistent/vaultenv-kubectl",
        );

        let err = resolver.resolve(&environment()).await.unwrap_err();

        let Error::Discovery {
            environment,
            message,
        } = &err
        else {
            panic!("expected discovery error, got {:?}", err);
        };
        assert_eq!(environment, "Development");
        assert!(message.starts_with(
            "failed to get cluster credentials (tried zone us-central1-a and region us-central1)"
        ));
        assert!(message.contains("failed to run /nonexistent/vaultenv-gcloud"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_tool_reports_exit_status() {
        let resolver = ClusterResolver::with_binaries("false", "false");

        let err = resolver.resolve(&environment()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Discovery { ref message, .. } if message.contains("false exited with")
        ));
    }

    #[test]
    fn context_is_prepended_once() {
        let err = with_context(
            discovery_error(&environment(), "kubectl exited with 1".to_string()),
            "failed to get service IP",
        );
        assert_eq!(
            err.to_string(),
            "could not resolve service address for environment 'Development': \
             failed to get service IP: kubectl exited with 1"
        );
    }
}
