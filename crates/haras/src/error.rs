//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use haras_config::ConfigError;
use haras_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the backend at {url}")]
    #[diagnostic(
        code(haras::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(haras::timeout),
        help("Increase the timeout with --timeout or check the backend.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(haras::auth_failed),
        help(
            "Check the e-mail and password.\n\
             Store the password with: haras config set-password {profile}"
        )
    )]
    AuthFailed { message: String, profile: String },

    #[error("Not logged in")]
    #[diagnostic(code(haras::not_logged_in), help("Run: haras auth login"))]
    NotLoggedIn,

    #[error("Session expired")]
    #[diagnostic(
        code(haras::session_expired),
        help("The refresh token was rejected. Run: haras auth login")
    )]
    SessionExpired,

    #[error("Two-factor code required")]
    #[diagnostic(
        code(haras::mfa_required),
        help("Run again with --code <CODE> from your authenticator app.")
    )]
    MfaRequired,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(haras::no_credentials),
        help(
            "Configure credentials with: haras config init\n\
             Or set HARAS_EMAIL and HARAS_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(haras::not_found),
        help("Run: haras {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(haras::rejected))]
    Rejected { message: String },

    #[error("Access denied: {message}")]
    #[diagnostic(code(haras::forbidden))]
    Forbidden { message: String },

    #[error("Conflict: {message}")]
    #[diagnostic(code(haras::conflict))]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(haras::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(haras::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(haras::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: haras config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(haras::no_config),
        help(
            "Create a profile with: haras config init\n\
             Or pass --url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(haras::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(haras::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(haras::json), help("Pass a JSON object with the backend column names."))]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(haras::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. }
            | Self::NotLoggedIn
            | Self::SessionExpired
            | Self::MfaRequired
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Convert a core error, naming `command` in the not-found hint.
    pub fn from_core(err: CoreError, command: &str) -> Self {
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                resource_type: entity_type,
                identifier,
                list_command: format!("{command} list"),
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                message,
                profile: "<profile>".into(),
            },

            CoreError::MfaRequired { .. } => CliError::MfaRequired,

            CoreError::SessionExpired => CliError::SessionExpired,

            CoreError::NotAuthenticated => CliError::NotLoggedIn,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type} list"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { message, .. } => CliError::Rejected { message },

            CoreError::Api {
                message,
                status: Some(403),
            } => CliError::Forbidden { message },

            CoreError::Api {
                message,
                status: Some(409),
            } => CliError::Conflict { message },

            CoreError::Api { message, .. } => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<haras_api::Error> for CliError {
    fn from(err: haras_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_list_command() {
        let err = CliError::from_core(
            CoreError::NotFound {
                entity_type: "medicamentos".into(),
                identifier: "99".into(),
            },
            "medicamentos",
        );
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(
            err,
            CliError::NotFound { ref list_command, .. } if list_command == "medicamentos list"
        ));
    }

    #[test]
    fn session_errors_exit_with_auth_code() {
        for core in [CoreError::SessionExpired, CoreError::NotAuthenticated] {
            assert_eq!(CliError::from(core).exit_code(), exit_code::AUTH);
        }
        assert_eq!(
            CliError::from(CoreError::MfaRequired { user_id: 3 }).exit_code(),
            exit_code::AUTH
        );
    }

    #[test]
    fn backend_status_picks_the_exit_code() {
        let forbidden = CliError::from(CoreError::Api {
            message: "Acesso negado".into(),
            status: Some(403),
        });
        assert_eq!(forbidden.exit_code(), exit_code::PERMISSION);

        let conflict = CliError::from(CoreError::Api {
            message: "Conflito de dados".into(),
            status: Some(409),
        });
        assert_eq!(conflict.exit_code(), exit_code::CONFLICT);

        let other = CliError::from(CoreError::Api {
            message: "Erro interno do servidor".into(),
            status: Some(500),
        });
        assert_eq!(other.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_errors_map_to_usage() {
        let err = CliError::from(ConfigError::Validation {
            field: "url".into(),
            reason: "invalid URL: x".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
