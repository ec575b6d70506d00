use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the `haras-api` crate.
///
/// Covers every failure mode of the farm API surface: authentication,
/// session handling, transport, structured API errors and decoding.
/// `haras-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or MFA step rejected by the backend.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Password accepted, second factor still pending.
    #[error("Multi-factor verification required for user {user_id}")]
    MfaRequired { user_id: i64 },

    /// Access token rejected and the refresh exchange failed.
    /// The session has already been cleared when this is returned.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success response from the backend. `detail` and `message` are
    /// the corresponding members of the JSON error body, when present.
    #[error("API error (HTTP {status}): {}", summarize(.detail.as_ref(), .message.as_deref()))]
    Api {
        status: u16,
        detail: Option<ErrorDetail>,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Persistence ─────────────────────────────────────────────────
    /// Session store could not be read or written.
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session store content is corrupt or unserializable.
    #[error("Session store error: {0}")]
    SessionStore(String),
}

impl Error {
    /// Returns `true` if the session is gone and a new login is needed.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired) || self.status() == Some(401)
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// Returns `true` if the server could not be reached at all.
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Structured `detail` payload of the failed response, if any.
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::Api { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }
}

fn summarize(detail: Option<&ErrorDetail>, message: Option<&str>) -> String {
    match (detail, message) {
        (Some(ErrorDetail::Message(m)), _) => m.clone(),
        (Some(ErrorDetail::Validation(issues)), _) => issues
            .iter()
            .map(|i| match i.field() {
                Some(f) => format!("{f}: {}", i.msg),
                None => i.msg.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        (None, Some(m)) => m.to_owned(),
        (None, None) => "no error detail".to_owned(),
    }
}

// ── Backend error payload ───────────────────────────────────────────

/// The `detail` member of a backend error body.
///
/// Either a plain message or the list produced by request validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

impl ErrorDetail {
    /// The plain message, when the detail is not a validation list.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(m) => Some(m),
            Self::Validation(_) => None,
        }
    }
}

/// One entry of a validation error list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Location path, e.g. `["body", "NOME"]`.
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ValidationIssue {
    /// The offending field: last element of `loc`, only when `loc` has
    /// more than one element (the first is the request part).
    pub fn field(&self) -> Option<String> {
        if self.loc.len() < 2 {
            return None;
        }
        self.loc.last().map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_accepts_string_and_validation_list() {
        let d: ErrorDetail = serde_json::from_value(json!("Animal não encontrado")).unwrap();
        assert_eq!(d.as_message(), Some("Animal não encontrado"));

        let d: ErrorDetail = serde_json::from_value(json!([
            {"loc": ["body", "NOME"], "msg": "field required", "type": "missing"}
        ]))
        .unwrap();
        let ErrorDetail::Validation(issues) = d else {
            panic!("expected validation list");
        };
        assert_eq!(issues[0].field().as_deref(), Some("NOME"));
        assert_eq!(issues[0].kind.as_deref(), Some("missing"));
    }

    #[test]
    fn field_requires_more_than_one_location_segment() {
        let issue = ValidationIssue {
            loc: vec![json!("body")],
            msg: "invalid".into(),
            kind: None,
        };
        assert_eq!(issue.field(), None);

        let issue = ValidationIssue {
            loc: vec![json!("query"), json!(0)],
            msg: "invalid".into(),
            kind: None,
        };
        assert_eq!(issue.field().as_deref(), Some("0"));
    }

    #[test]
    fn status_and_predicates() {
        let err = Error::Api {
            status: 404,
            detail: Some(ErrorDetail::Message("Animal não encontrado".into())),
            message: None,
        };
        assert_eq!(
            err.to_string(),
            "API error (HTTP 404): Animal não encontrado"
        );
        assert!(err.is_not_found());
        assert!(!err.is_transient());
        assert_eq!(err.status(), Some(404));
        assert!(Error::SessionExpired.is_auth_expired());
    }
}
