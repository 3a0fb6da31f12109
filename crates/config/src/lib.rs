//! vaultdb-config - invocation and telemetry configuration loading
//!
//! A module invocation is resolved from two layers, lowest priority first:
//!
//! 1. `VAULT_ADDR`, `VAULT_TOKEN` and `VAULT_NAMESPACE` from the environment
//! 2. the JSON args file handed over by the host framework
//!
//! The same merged document feeds the shared [`ConnectionOptions`], the
//! host-level [`HostFlags`] and the module's own parameter struct.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use secrecy::Secret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load module arguments: {0}")]
    Load(#[from] figment::Error),

    #[error("Module arguments file not found: {}", .0.display())]
    MissingArguments(PathBuf),
}

/// Shared Vault connection and authentication options
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionOptions {
    /// Vault server address
    pub url: Option<String>,

    /// Vault Enterprise namespace
    pub namespace: Option<String>,

    /// One of `token`, `approle`, `userpass`, `none`
    pub auth_method: Option<String>,

    pub token: Option<Secret<String>>,

    /// Look the token up against Vault before using it
    pub token_validate: Option<bool>,

    pub role_id: Option<String>,
    pub secret_id: Option<Secret<String>>,

    pub username: Option<String>,
    pub password: Option<Secret<String>>,

    /// Mount point of the auth method
    pub mount_point: Option<String>,

    pub validate_certs: Option<bool>,

    /// PEM bundle used to verify the server certificate
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl ConnectionOptions {
    pub fn auth_method(&self) -> &str {
        self.auth_method.as_deref().unwrap_or("token")
    }

    pub fn token_validate(&self) -> bool {
        self.token_validate.unwrap_or(false)
    }

    pub fn validate_certs(&self) -> bool {
        self.validate_certs.unwrap_or(true)
    }
}

/// Flags the host framework injects next to the module parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostFlags {
    #[serde(rename = "_ansible_check_mode", default)]
    pub check_mode: bool,
}

/// Everything a single module run needs, resolved from the args file
#[derive(Debug)]
pub struct Invocation<P> {
    pub connection: ConnectionOptions,
    pub host: HostFlags,
    pub params: P,
}

impl<P: DeserializeOwned> Invocation<P> {
    /// Load the invocation from the host's args file and the environment
    pub fn load(args_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let args_file = args_file.as_ref();

        // Figment treats a missing file as an empty provider.
        if !args_file.is_file() {
            return Err(ConfigError::MissingArguments(args_file.to_path_buf()));
        }

        Self::extract(&Self::figment(args_file))
    }

    /// Layered configuration sources for an args file
    pub fn figment(args_file: &Path) -> Figment {
        Figment::new()
            .merge(vault_env())
            .merge(Json::file(args_file))
    }

    pub fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        Ok(Self {
            connection: figment.extract()?,
            host: figment.extract()?,
            params: figment.extract()?,
        })
    }
}

/// Vault environment variables and the options they default
const VAULT_ENV: [(&str, &str); 3] = [
    ("VAULT_ADDR", "url"),
    ("VAULT_TOKEN", "token"),
    ("VAULT_NAMESPACE", "namespace"),
];

/// Environment defaults, kept as strings
///
/// `Env` would parse an all-digit token or namespace into a number.
fn vault_env() -> Serialized<BTreeMap<&'static str, String>> {
    let values = VAULT_ENV
        .iter()
        .filter_map(|(var, key)| {
            std::env::var(var)
                .ok()
                .filter(|value| !value.is_empty())
                .map(|value| (*key, value))
        })
        .collect();

    Serialized::defaults(values)
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl TelemetryConfig {
    /// Load from `VAULT_MODULES_LOG_LEVEL` and `VAULT_MODULES_LOG_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        let config = Figment::new()
            .merge(Env::prefixed("VAULT_MODULES_"))
            .extract()?;

        Ok(config)
    }
}
