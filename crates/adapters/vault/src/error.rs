//! Error types for Vault adapter

use errors::AppError;
use thiserror::Error;

/// Closed set of failures the Vault API can report
///
/// Built from the HTTP status and the `errors` array of the response body, so
/// callers can map every kind exhaustively instead of matching on text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("invalid request: {}", .errors.join("; "))]
    InvalidRequest { errors: Vec<String> },

    #[error("missing client token: {}", .errors.join("; "))]
    Unauthorized { errors: Vec<String> },

    #[error("permission denied: {}", .errors.join("; "))]
    Forbidden { errors: Vec<String> },

    #[error("invalid path: {}", .errors.join("; "))]
    InvalidPath { errors: Vec<String> },

    #[error("unsupported operation: {}", .errors.join("; "))]
    Unsupported { errors: Vec<String> },

    #[error("precondition failed: {}", .errors.join("; "))]
    PreconditionFailed { errors: Vec<String> },

    #[error("rate limit exceeded: {}", .errors.join("; "))]
    RateLimited { errors: Vec<String> },

    #[error("server error ({status}): {}", .errors.join("; "))]
    Server { status: u16, errors: Vec<String> },

    #[error("vault is not initialized: {}", .errors.join("; "))]
    NotInitialized { errors: Vec<String> },

    #[error("vault is sealed or down: {}", .errors.join("; "))]
    Sealed { errors: Vec<String> },

    #[error("unexpected status code {status}: {}", .errors.join("; "))]
    UnexpectedStatus { status: u16, errors: Vec<String> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("undecodable response: {0}")]
    Decode(String),
}

impl VaultError {
    /// Classify an error response
    pub fn from_status(status: u16, errors: Vec<String>) -> Self {
        match status {
            400 => Self::InvalidRequest { errors },
            401 => Self::Unauthorized { errors },
            403 => Self::Forbidden { errors },
            // A mounted engine answers "unsupported path" for endpoints it lacks.
            404 if mentions(&errors, "unsupported path") => Self::Unsupported { errors },
            404 => Self::InvalidPath { errors },
            405 => Self::Unsupported { errors },
            412 => Self::PreconditionFailed { errors },
            429 => Self::RateLimited { errors },
            500 | 502 => Self::Server { status, errors },
            501 => Self::NotInitialized { errors },
            503 => Self::Sealed { errors },
            _ => Self::UnexpectedStatus { status, errors },
        }
    }

    /// Messages reported by the server, if any
    pub fn errors(&self) -> &[String] {
        match self {
            Self::InvalidRequest { errors }
            | Self::Unauthorized { errors }
            | Self::Forbidden { errors }
            | Self::InvalidPath { errors }
            | Self::Unsupported { errors }
            | Self::PreconditionFailed { errors }
            | Self::RateLimited { errors }
            | Self::Server { errors, .. }
            | Self::NotInitialized { errors }
            | Self::Sealed { errors }
            | Self::UnexpectedStatus { errors, .. } => errors,
            Self::Transport(_) | Self::Decode(_) => &[],
        }
    }

    /// Case-insensitive search through the server messages
    pub fn mentions(&self, needle: &str) -> bool {
        mentions(self.errors(), needle)
    }
}

fn mentions(errors: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    errors.iter().any(|e| e.to_lowercase().contains(&needle))
}

impl From<reqwest::Error> for VaultError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<vaultrs::error::ClientError> for VaultError {
    fn from(err: vaultrs::error::ClientError) -> Self {
        match err {
            vaultrs::error::ClientError::APIError { code, errors } => {
                Self::from_status(code, errors)
            }
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Convert a Vault error raised outside a database operation to AppError
///
/// Used for client setup and login, where the failure is about credentials or
/// reachability rather than a particular secrets engine path.
pub fn map_vault_error(err: VaultError, context: &str) -> AppError {
    let message = format!("{}: {}", context, err);

    match err {
        VaultError::InvalidRequest { .. }
        | VaultError::Unauthorized { .. }
        | VaultError::Forbidden { .. }
        | VaultError::InvalidPath { .. } => AppError::authentication(message),
        VaultError::PreconditionFailed { .. }
        | VaultError::RateLimited { .. }
        | VaultError::Server { .. }
        | VaultError::NotInitialized { .. }
        | VaultError::Sealed { .. }
        | VaultError::Transport(_) => AppError::unavailable(message),
        VaultError::Unsupported { .. }
        | VaultError::UnexpectedStatus { .. }
        | VaultError::Decode(_) => AppError::internal(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(msg: &str) -> Vec<String> {
        vec![msg.to_string()]
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(VaultError::from_status(400, vec![]), VaultError::InvalidRequest { .. }));
        assert!(matches!(VaultError::from_status(401, vec![]), VaultError::Unauthorized { .. }));
        assert!(matches!(VaultError::from_status(403, vec![]), VaultError::Forbidden { .. }));
        assert!(matches!(VaultError::from_status(404, vec![]), VaultError::InvalidPath { .. }));
        assert!(matches!(VaultError::from_status(405, vec![]), VaultError::Unsupported { .. }));
        assert!(matches!(VaultError::from_status(412, vec![]), VaultError::PreconditionFailed { .. }));
        assert!(matches!(VaultError::from_status(429, vec![]), VaultError::RateLimited { .. }));
        assert!(matches!(VaultError::from_status(500, vec![]), VaultError::Server { status: 500, .. }));
        assert!(matches!(VaultError::from_status(501, vec![]), VaultError::NotInitialized { .. }));
        assert!(matches!(VaultError::from_status(503, vec![]), VaultError::Sealed { .. }));
        assert!(matches!(
            VaultError::from_status(418, vec![]),
            VaultError::UnexpectedStatus { status: 418, .. }
        ));
    }

    #[test]
    fn test_unsupported_path_is_not_an_invalid_path() {
        let err = VaultError::from_status(404, errors("1 error occurred:\n\t* unsupported path\n\n"));
        assert!(matches!(err, VaultError::Unsupported { .. }));

        let err = VaultError::from_status(404, errors("no handler for route \"foo/config/x\""));
        assert!(matches!(err, VaultError::InvalidPath { .. }));
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        let err = VaultError::from_status(400, errors("pq: role \"app\" Does Not Exist"));
        assert!(err.mentions("does not exist"));
        assert!(!err.mentions("permission"));
        assert!(!VaultError::Transport("refused".to_string()).mentions("refused"));
    }

    #[test]
    fn test_display_includes_server_messages() {
        let err = VaultError::from_status(403, errors("permission denied"));
        assert_eq!(err.to_string(), "permission denied: permission denied");
    }

    #[test]
    fn test_map_403_error() {
        let err = map_vault_error(VaultError::from_status(403, vec![]), "AppRole authentication failed");
        assert!(matches!(err, AppError::Authentication(_)));
        assert!(err.to_string().starts_with("AppRole authentication failed"));
    }

    #[test]
    fn test_map_connection_error() {
        let err = map_vault_error(VaultError::Transport("connection refused".to_string()), "Connecting to Vault");
        assert!(matches!(err, AppError::Unavailable(_)));
    }

    #[test]
    fn test_map_decode_error() {
        let err = map_vault_error(VaultError::Decode("eof".to_string()), "Token validation failed");
        assert!(matches!(err, AppError::Internal(_)));
    }
}
