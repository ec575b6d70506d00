// ── Core error types ──
//
// User-facing errors from haras-core. Backend failures arrive already
// reduced to a readable message by `feedback::extract_message`; callers
// never inspect JSON error bodies themselves.

use haras_api::ErrorDetail;
use thiserror::Error;

use crate::feedback;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("MFA code required for user {user_id}")]
    MfaRequired { user_id: i64 },

    #[error("Session expired -- log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to backend timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed {
        message: String,
        detail: Option<ErrorDetail>,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Message suitable for a notification, in pt-BR.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationFailed { message }
            | Self::ValidationFailed { message, .. }
            | Self::Api { message, .. } => message.clone(),
            Self::SessionExpired | Self::NotAuthenticated => "Sessão expirada".into(),
            Self::MfaRequired { .. } => "Informe o código MFA".into(),
            Self::ConnectionFailed { .. } | Self::Timeout => feedback::NETWORK_ERROR.into(),
            Self::NotFound { .. } => feedback::status_message(404),
            Self::Config { message } => message.clone(),
            Self::Internal(_) => "Erro inesperado".into(),
        }
    }

    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::NotAuthenticated)
    }

    /// Name the missing entity on a generic `NotFound`.
    pub fn or_not_found(self, entity_type: &str, id: i64) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                entity_type: entity_type.to_owned(),
                identifier: id.to_string(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<haras_api::Error> for CoreError {
    fn from(err: haras_api::Error) -> Self {
        match err {
            haras_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            haras_api::Error::MfaRequired { user_id } => CoreError::MfaRequired { user_id },
            haras_api::Error::SessionExpired => CoreError::SessionExpired,
            haras_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout,
            haras_api::Error::Transport(ref e) if e.is_connect() || e.is_request() => {
                CoreError::ConnectionFailed {
                    url: e
                        .url()
                        .map(|u| u.to_string())
                        .unwrap_or_else(|| "<unknown>".into()),
                    reason: e.to_string(),
                }
            }
            haras_api::Error::Api { status: 404, .. } => CoreError::NotFound {
                entity_type: "Registro".into(),
                identifier: feedback::extract_message(&err, "recurso"),
            },
            haras_api::Error::Api {
                status: 400 | 422,
                ref detail,
                ..
            } => CoreError::ValidationFailed {
                message: feedback::extract_message(&err, "Dados inválidos"),
                detail: detail.clone(),
            },
            haras_api::Error::Api { status, .. } => CoreError::Api {
                message: feedback::extract_message(&err, "Erro inesperado"),
                status: Some(status),
            },
            haras_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid backend URL: {e}"),
            },
            haras_api::Error::Tls(message) => CoreError::Config { message },
            other => CoreError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_keeps_detail() {
        let detail: ErrorDetail = serde_json::from_value(serde_json::json!([
            {"loc": ["body", "DATA_NASCIMENTO"], "msg": "invalid date"}
        ]))
        .unwrap();
        let err = CoreError::from(haras_api::Error::Api {
            status: 422,
            detail: Some(detail),
            message: None,
        });
        let CoreError::ValidationFailed { message, detail } = err else {
            panic!("expected validation failure");
        };
        assert_eq!(message, "Data de Nascimento: invalid date");
        assert!(detail.is_some());
    }

    #[test]
    fn server_error_message_from_status() {
        let err = CoreError::from(haras_api::Error::Api {
            status: 503,
            detail: None,
            message: None,
        });
        assert_eq!(err.user_message(), "Serviço temporariamente indisponível");
    }

    #[test]
    fn session_expired_is_session_error() {
        let err = CoreError::from(haras_api::Error::SessionExpired);
        assert!(err.is_session_error());
        assert_eq!(err.user_message(), "Sessão expirada");
    }
}
