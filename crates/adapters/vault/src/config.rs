//! Vault configuration

use std::path::PathBuf;
use std::time::Duration;

use ::config::ConnectionOptions;
use errors::{AppError, AppResult};
use secrecy::Secret;
use url::Url;

/// Mount point of the AppRole auth method unless configured otherwise
pub const DEFAULT_APPROLE_MOUNT: &str = "approle";

/// Mount point of the userpass auth method unless configured otherwise
pub const DEFAULT_USERPASS_MOUNT: &str = "userpass";

/// How the client obtains its Vault token
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Send requests without a token
    None,
    Token {
        token: Secret<String>,
        /// Look the token up before the first request
        validate: bool,
    },
    AppRole {
        mount: String,
        role_id: String,
        secret_id: Secret<String>,
    },
    Userpass {
        mount: String,
        username: String,
        password: Secret<String>,
    },
}

impl AuthMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Token { .. } => "token",
            Self::AppRole { .. } => "approle",
            Self::Userpass { .. } => "userpass",
        }
    }
}

/// Vault client configuration
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server endpoint
    pub endpoint: String,

    /// Vault Enterprise namespace
    pub namespace: Option<String>,

    pub auth: AuthMethod,

    /// Verify the server TLS certificate
    pub validate_certs: bool,

    /// Additional CA bundle (PEM)
    pub ca_cert: Option<PathBuf>,

    /// Request timeout, transport default when unset
    pub timeout: Option<Duration>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8200".to_string(),
            namespace: None,
            auth: AuthMethod::None,
            validate_certs: true,
            ca_cert: None,
            timeout: None,
        }
    }
}

impl TryFrom<&ConnectionOptions> for VaultConfig {
    type Error = AppError;

    /// Validate the resolved connection options before any network activity
    fn try_from(options: &ConnectionOptions) -> AppResult<Self> {
        let endpoint = options.url.clone().ok_or_else(|| {
            AppError::validation("The Vault address is not set. Use the url option or VAULT_ADDR.")
        })?;

        Url::parse(&endpoint)
            .map_err(|e| AppError::validation(format!("Invalid Vault url '{}': {}", endpoint, e)))?;

        let auth = match options.auth_method() {
            "none" => AuthMethod::None,
            "token" => AuthMethod::Token {
                token: options.token.clone().ok_or_else(|| {
                    AppError::authentication(
                        "No Vault token was provided. Use the token option or VAULT_TOKEN.",
                    )
                })?,
                validate: options.token_validate(),
            },
            "approle" => AuthMethod::AppRole {
                mount: options
                    .mount_point
                    .clone()
                    .unwrap_or_else(|| DEFAULT_APPROLE_MOUNT.to_string()),
                role_id: options.role_id.clone().ok_or_else(|| {
                    AppError::authentication("Authentication method approle requires a role_id")
                })?,
                // AppRoles without bound secret IDs log in with the role ID alone.
                secret_id: options
                    .secret_id
                    .clone()
                    .unwrap_or_else(|| Secret::new(String::new())),
            },
            "userpass" => AuthMethod::Userpass {
                mount: options
                    .mount_point
                    .clone()
                    .unwrap_or_else(|| DEFAULT_USERPASS_MOUNT.to_string()),
                username: options.username.clone().ok_or_else(|| {
                    AppError::authentication("Authentication method userpass requires a username")
                })?,
                password: options.password.clone().ok_or_else(|| {
                    AppError::authentication("Authentication method userpass requires a password")
                })?,
            },
            other => {
                return Err(AppError::authentication(format!(
                    "Authentication method '{}' is not supported. Use one of: token, approle, userpass, none.",
                    other
                )));
            }
        };

        Ok(Self {
            endpoint,
            namespace: options.namespace.clone(),
            auth,
            validate_certs: options.validate_certs(),
            ca_cert: options.ca_cert.clone(),
            timeout: options.timeout.map(Duration::from_secs),
        })
    }
}

/// Builder for VaultConfig
pub struct VaultConfigBuilder {
    config: VaultConfig,
}

impl VaultConfigBuilder {
    /// Create a new builder with endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            config: VaultConfig {
                endpoint: endpoint.into(),
                ..Default::default()
            },
        }
    }

    /// Authenticate with a static token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth = AuthMethod::Token {
            token: Secret::new(token.into()),
            validate: false,
        };
        self
    }

    /// Set AppRole credentials
    pub fn with_approle(mut self, role_id: impl Into<String>, secret_id: impl Into<String>) -> Self {
        self.config.auth = AuthMethod::AppRole {
            mount: DEFAULT_APPROLE_MOUNT.to_string(),
            role_id: role_id.into(),
            secret_id: Secret::new(secret_id.into()),
        };
        self
    }

    /// Set userpass credentials
    pub fn with_userpass(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.auth = AuthMethod::Userpass {
            mount: DEFAULT_USERPASS_MOUNT.to_string(),
            username: username.into(),
            password: Secret::new(password.into()),
        };
        self
    }

    /// Set namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    /// Toggle TLS certificate verification
    pub fn with_validate_certs(mut self, validate_certs: bool) -> Self {
        self.config.validate_certs = validate_certs;
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.timeout = Some(Duration::from_secs(timeout_secs));
        self
    }

    /// Build the configuration
    pub fn build(self) -> VaultConfig {
        self.config
    }
}
