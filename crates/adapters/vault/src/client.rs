//! Vault client implementation

use errors::{AppError, AppResult};
use reqwest::Method;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;
use vaultrs::client::{Client, VaultClient as VaultRsClient, VaultClientSettingsBuilder};
use vaultrs_login::LoginClient;
use vaultrs_login::engines::approle::AppRoleLogin;
use vaultrs_login::engines::userpass::UserpassLogin;

use crate::config::{AuthMethod, VaultConfig};
use crate::error::{VaultError, map_vault_error};
use crate::response::VaultResponse;

const TOKEN_HEADER: &str = "X-Vault-Token";
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Authenticated Vault client
///
/// Login goes through `vaultrs`. Secrets engine calls go through a plain
/// `reqwest` client because callers need the status code and the whole
/// response envelope, which `vaultrs` strips.
pub struct VaultClient {
    http: reqwest::Client,
    endpoint: Url,
    namespace: Option<String>,
    token: Option<Secret<String>>,
}

impl VaultClient {
    /// Create a new Vault client and authenticate with the configured method
    pub async fn new(config: VaultConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            auth_method = config.auth.name(),
            "Connecting to Vault"
        );

        let endpoint = api_base(&config.endpoint)?;

        let mut builder = VaultClientSettingsBuilder::default();
        builder
            .address(&config.endpoint)
            .namespace(config.namespace.clone())
            .timeout(config.timeout)
            .verify(config.validate_certs);
        if let Some(ca_cert) = &config.ca_cert {
            builder.ca_certs(vec![ca_cert.display().to_string()]);
        }
        let settings = builder.build().map_err(|e| {
            AppError::validation(format!("Failed to build Vault client settings: {}", e))
        })?;

        let mut client = VaultRsClient::new(settings)
            .map_err(|e| map_vault_error(e.into(), "Failed to create Vault client"))?;

        authenticate(&mut client, &config.auth).await?;

        // vaultrs falls back to VAULT_TOKEN, which `none` must not send.
        let token = match (&config.auth, client.settings().token.as_str()) {
            (AuthMethod::None, _) | (_, "") => None,
            (_, token) => Some(Secret::new(token.to_string())),
        };

        Ok(Self {
            http: build_http_client(&config)?,
            endpoint,
            namespace: config.namespace,
            token,
        })
    }

    pub(crate) async fn get(&self, path: &[String]) -> Result<VaultResponse, VaultError> {
        self.send(self.request(Method::GET, path)?).await
    }

    /// Vault's LIST verb, sent as `GET ?list=true`
    pub(crate) async fn list(&self, path: &[String]) -> Result<VaultResponse, VaultError> {
        let request = self.request(Method::GET, path)?.query(&[("list", "true")]);
        self.send(request).await
    }

    pub(crate) async fn post<B>(&self, path: &[String], body: &B) -> Result<VaultResponse, VaultError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    pub(crate) async fn post_empty(&self, path: &[String]) -> Result<VaultResponse, VaultError> {
        self.send(self.request(Method::POST, path)?).await
    }

    pub(crate) async fn delete(&self, path: &[String]) -> Result<VaultResponse, VaultError> {
        self.send(self.request(Method::DELETE, path)?).await
    }

    fn request<S: AsRef<str>>(
        &self,
        method: Method,
        path: &[S],
    ) -> Result<reqwest::RequestBuilder, VaultError> {
        let url = self.url(path)?;

        debug!(method = %method, url = %url, "Sending Vault request");

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token.expose_secret());
        }
        if let Some(namespace) = &self.namespace {
            request = request.header(NAMESPACE_HEADER, namespace);
        }
        Ok(request)
    }

    /// API url with every segment percent-encoded
    fn url<S: AsRef<str>>(&self, path: &[S]) -> Result<Url, VaultError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                VaultError::Transport(format!("Vault url '{}' cannot carry a path", self.endpoint))
            })?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<VaultResponse, VaultError> {
        let response = VaultResponse::read(request.send().await?).await;
        match &response {
            Ok(ok) => debug!(status_code = ok.status_code, "Vault request succeeded"),
            Err(e) => debug!(error = %e, "Vault request failed"),
        }
        response
    }
}

/// `<endpoint>/v1/` with exactly one trailing slash, so joins append
fn api_base(endpoint: &str) -> AppResult<Url> {
    let base = format!("{}/v1/", endpoint.trim_end_matches('/'));
    Url::parse(&base)
        .map_err(|e| AppError::validation(format!("Invalid Vault url '{}': {}", endpoint, e)))
}

async fn authenticate(client: &mut VaultRsClient, auth: &AuthMethod) -> AppResult<()> {
    match auth {
        AuthMethod::None => {
            debug!("Skipping authentication");
        }
        AuthMethod::Token { token, validate } => {
            client.set_token(token.expose_secret());
            if *validate {
                info!("Validating Vault token");
                vaultrs::token::lookup_self(&*client)
                    .await
                    .map_err(|e| map_vault_error(e.into(), "Token validation failed"))?;
            }
        }
        AuthMethod::AppRole { mount, role_id, secret_id } => {
            info!(mount = %mount, "Authenticating with AppRole");
            let login = AppRoleLogin {
                role_id: role_id.clone(),
                secret_id: secret_id.expose_secret().clone(),
            };
            client
                .login(mount, &login)
                .await
                .map_err(|e| map_vault_error(e.into(), "AppRole authentication failed"))?;
        }
        AuthMethod::Userpass { mount, username, password } => {
            info!(mount = %mount, username = %username, "Authenticating with userpass");
            let login = UserpassLogin {
                username: username.clone(),
                password: password.expose_secret().clone(),
            };
            client
                .login(mount, &login)
                .await
                .map_err(|e| map_vault_error(e.into(), "Userpass authentication failed"))?;
        }
    }

    info!(auth_method = auth.name(), "Vault client ready");
    Ok(())
}

fn build_http_client(config: &VaultConfig) -> AppResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(!config.validate_certs);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(path) = &config.ca_cert {
        let pem = std::fs::read(path).map_err(|e| {
            AppError::validation(format!("Failed to read CA certificate {}: {}", path.display(), e))
        })?;
        let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
            AppError::validation(format!("Invalid CA certificate {}: {}", path.display(), e))
        })?;
        builder = builder.add_root_certificate(certificate);
    }

    builder
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))
}
