use crate::error::{Error, Result};
use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.yaml";

const CONFIG_HEADER: &str = "\
# vaultenv configuration
#
# WARNING: session tokens obtained by `vaultenv login` are stored in this
# file in plain text. Keep it private (mode 0600) and run `vaultenv logout`
# on shared machines.
";

/// One deployment target with its own Vault address and session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Display name, e.g. "Development"
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub service_name: String,
    /// Used verbatim when set; empty means the address has to be discovered.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vault_addr: String,
    #[serde(default)]
    pub vault_port: String,
    #[serde(default, rename = "use_nipio")]
    pub use_nip_io: bool,
    /// Session token, stored in plain text. Empty when logged out.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl Environment {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Missing or unknown names surface as a config error when a client binds to it.
    #[serde(default)]
    pub current_environment: String,
    #[serde(default)]
    pub environments: BTreeMap<String, Environment>,
    #[serde(default)]
    pub token_file: PathBuf,
    #[serde(default)]
    pub cache_dir: PathBuf,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub auto_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = default_config_dir().unwrap_or_else(|_| PathBuf::from(".vaultenv"));
        Self::with_base_dir(&base_dir)
    }
}

impl Config {
    /// The canonical default configuration, with auxiliary paths placed under `base_dir`.
    pub fn with_base_dir(base_dir: &Path) -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(
            "dev".to_string(),
            Environment {
                name: "Development".to_string(),
                project_id: "platform-infra".to_string(),
                region: "us-central1".to_string(),
                cluster_name: "dev-gke-cluster".to_string(),
                namespace: "vault".to_string(),
                service_name: "vault".to_string(),
                vault_addr: "https://vault-dev.example.com".to_string(),
                vault_port: "443".to_string(),
                use_nip_io: false,
                token: String::new(),
            },
        );
        environments.insert(
            "prod".to_string(),
            Environment {
                name: "Production".to_string(),
                project_id: "platform-infra".to_string(),
                region: "us-central1".to_string(),
                cluster_name: "prod-gke-cluster".to_string(),
                namespace: "vault".to_string(),
                service_name: "vault".to_string(),
                vault_addr: "https://vault.example.com".to_string(),
                vault_port: "443".to_string(),
                use_nip_io: false,
                token: String::new(),
            },
        );

        Self {
            current_environment: "dev".to_string(),
            environments,
            token_file: base_dir.join("tokens"),
            cache_dir: base_dir.join("cache"),
            output_format: OutputFormat::Table,
            auto_refresh: true,
        }
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    pub fn environment_mut(&mut self, name: &str) -> Option<&mut Environment> {
        self.environments.get_mut(name)
    }

    pub fn current_environment(&self) -> Result<&Environment> {
        self.environments.get(&self.current_environment).ok_or_else(|| {
            Error::Config(format!(
                "environment '{}' not found",
                self.current_environment
            ))
        })
    }

    pub fn current_environment_mut(&mut self) -> Result<&mut Environment> {
        let name = self.current_environment.clone();
        self.environments
            .get_mut(&name)
            .ok_or_else(|| Error::Config(format!("environment '{}' not found", name)))
    }

    /// Makes `name` the active environment. Unknown names leave the configuration untouched.
    pub fn set_current_environment(&mut self, name: &str) -> Result<()> {
        if !self.environments.contains_key(name) {
            return Err(Error::Config(format!("environment '{}' not found", name)));
        }

        info!("Setting current environment to: {}", name);
        self.current_environment = name.to_string();
        Ok(())
    }

    pub fn list_environments(&self) -> Vec<&str> {
        self.environments.keys().map(|s| s.as_str()).collect()
    }
}

/// `$XDG_CONFIG_HOME/vaultenv` on Linux, `~/.vaultenv` elsewhere.
pub fn default_config_dir() -> Result<PathBuf> {
    let dir = if cfg!(target_os = "linux") {
        dirs::config_dir()
            .ok_or_else(|| Error::Config("failed to get XDG config directory".to_string()))?
            .join("vaultenv")
    } else {
        dirs::home_dir()
            .ok_or_else(|| Error::Config("failed to get home directory".to_string()))?
            .join(".vaultenv")
    };
    Ok(dir)
}

/// Reads and writes the whole [`Config`] at a single location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(default_config_dir()?.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default configuration with auxiliary paths next to this store's file.
    pub fn default_config(&self) -> Config {
        match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => Config::with_base_dir(dir),
            None => Config::default(),
        }
    }

    /// Loads the configuration, creating and persisting the default one if the file is missing.
    pub fn load(&self) -> Result<Config> {
        debug!("Loading config from: {:?}", self.path);

        if !self.path.exists() {
            info!("Config file doesn't exist, creating default config");
            let config = self.default_config();
            self.save(&config)?;
            return Ok(config);
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| Error::store(&self.path, e))?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| Error::store(&self.path, e))?;

        debug!(
            "Loaded config with {} environments",
            config.environments.len()
        );
        Ok(config)
    }

    /// Writes the full configuration. The file is replaced atomically and is only
    /// readable by the owner.
    pub fn save(&self, config: &Config) -> Result<()> {
        debug!("Saving config to: {:?}", self.path);

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => Path::new("."),
        };
        if !dir.exists() {
            create_private_dir(dir).map_err(|e| Error::store(dir, e))?;
            info!("Created config directory: {:?}", dir);
        }

        let body = serde_yaml::to_string(config).map_err(|e| Error::store(&self.path, e))?;
        let content = format!("{}\n{}", CONFIG_HEADER, body);

        // Each save gets its own temp file; tempfile creates it with mode 0600.
        let mut tmp = tempfile::Builder::new()
            .prefix(".config.")
            .suffix(".yaml.tmp")
            .tempfile_in(dir)
            .map_err(|e| Error::store(dir, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| Error::store(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::store(&self.path, e.error))?;

        info!("Config saved successfully");
        Ok(())
    }
}

fn create_private_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}
