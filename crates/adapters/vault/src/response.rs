//! Raw Vault API responses

use serde::Deserialize;
use serde_json::Value;

use crate::error::VaultError;

/// Successful Vault API response, envelope included
#[derive(Debug, Clone, PartialEq)]
pub struct VaultResponse {
    pub status_code: u16,
    pub ok: bool,
    /// Full JSON envelope, `None` for empty bodies such as 204
    pub body: Option<Value>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Vec<String>>,
}

impl VaultResponse {
    pub fn new(status_code: u16, body: Option<Value>) -> Self {
        Self {
            status_code,
            ok: status_code < 400,
            body,
        }
    }

    /// Empty 204 response, the usual answer to writes
    pub fn no_content() -> Self {
        Self::new(204, None)
    }

    /// `data` field of the envelope
    pub fn data(&self) -> Option<&Value> {
        self.body.as_ref().and_then(|body| body.get("data"))
    }

    /// Read a reqwest response, turning error statuses into [`VaultError`]
    pub async fn read(response: reqwest::Response) -> Result<Self, VaultError> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        if status >= 400 {
            return Err(VaultError::from_status(status, parse_errors(&text)));
        }

        if text.trim().is_empty() {
            return Ok(Self::new(status, None));
        }

        let body = serde_json::from_str(&text).map_err(|e| VaultError::Decode(e.to_string()))?;
        Ok(Self::new(status, Some(body)))
    }
}

fn parse_errors(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => body.errors.unwrap_or_default(),
        // Proxies in front of Vault answer with plain text or HTML.
        Err(_) => vec![text.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_accessor() {
        let response = VaultResponse::new(200, Some(json!({"data": {"keys": ["a"]}})));
        assert!(response.ok);
        assert_eq!(response.data(), Some(&json!({"keys": ["a"]})));
        assert_eq!(VaultResponse::no_content().data(), None);
    }

    #[test]
    fn test_parse_vault_errors() {
        let errors = parse_errors(r#"{"errors": ["permission denied"]}"#);
        assert_eq!(errors, vec!["permission denied".to_string()]);
    }

    #[test]
    fn test_parse_empty_and_null_errors() {
        assert!(parse_errors("").is_empty());
        assert!(parse_errors(r#"{"errors": []}"#).is_empty());
        assert!(parse_errors(r#"{"errors": null}"#).is_empty());
    }

    #[test]
    fn test_parse_plain_text_errors() {
        let errors = parse_errors("<html>Bad Gateway</html>\n");
        assert_eq!(errors, vec!["<html>Bad Gateway</html>".to_string()]);
    }
}
