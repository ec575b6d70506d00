// Authentication flows: login, MFA, refresh, logout.
//
// Login and MFA verification are public calls; the MFA management calls
// and logout run through the authorized pipeline like any other request.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::User;
use crate::session::Session;

/// Result of a password login.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Credentials accepted and session established.
    Authenticated(User),
    /// Credentials accepted; a TOTP code must be verified for `user_id`.
    MfaRequired { user_id: i64 },
}

/// Secret and provisioning URL returned when enabling MFA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MfaSetup {
    pub secret: String,
    pub qr_code_url: String,
    pub user: User,
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "EMAIL")]
    email: &'a str,
    #[serde(rename = "SENHA")]
    senha: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    requires_mfa: bool,
    #[serde(default)]
    user_id: Option<i64>,
}

impl TokenResponse {
    fn into_session(self) -> Result<Session, Error> {
        match (self.access_token, self.refresh_token, self.user) {
            (Some(access), Some(refresh), Some(user)) => Ok(Session::new(access, refresh, user)),
            _ => Err(Error::Authentication {
                message: "resposta de autenticação incompleta".into(),
            }),
        }
    }
}

#[derive(Serialize)]
struct UserIdRequest {
    user_id: i64,
}

#[derive(Serialize)]
struct MfaVerifyRequest<'a> {
    user_id: i64,
    code: &'a str,
}

#[derive(Deserialize)]
struct UserResponse {
    user: User,
}

/// Turn a backend rejection into `Error::Authentication`, preferring the
/// backend's own message and falling back to `default`. Transport and
/// session errors pass through untouched.
fn auth_failure(err: Error, default: &str) -> Error {
    match err {
        Error::Api { detail, .. } => Error::Authentication {
            message: detail
                .as_ref()
                .and_then(|d| d.as_message())
                .unwrap_or(default)
                .to_owned(),
        },
        Error::Deserialization { .. } => Error::Authentication {
            message: default.to_owned(),
        },
        other => other,
    }
}

impl ApiClient {
    /// `POST /auth/login`. On success without MFA the session is replaced;
    /// with MFA pending the session is left untouched.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginOutcome, Error> {
        let body = LoginRequest {
            email,
            senha: password.expose_secret(),
        };
        let resp: TokenResponse = self
            .post_public("/auth/login", &body)
            .await
            .map_err(|e| auth_failure(e, "Erro ao fazer login"))?;

        if resp.requires_mfa {
            let user_id = resp.user_id.ok_or_else(|| Error::Authentication {
                message: "MFA requerido sem identificação do usuário".into(),
            })?;
            info!(user_id, "login accepted, MFA verification pending");
            return Ok(LoginOutcome::MfaRequired { user_id });
        }

        let session = resp.into_session()?;
        let user = session.user.clone();
        self.session().replace(session)?;
        info!(email = %user.email, "logged in");
        Ok(LoginOutcome::Authenticated(user))
    }

    /// `POST /auth/mfa/verify`; completes a login that returned
    /// [`LoginOutcome::MfaRequired`].
    pub async fn verify_mfa(&self, user_id: i64, code: &str) -> Result<User, Error> {
        let resp: TokenResponse = self
            .post_public("/auth/mfa/verify", &MfaVerifyRequest { user_id, code })
            .await
            .map_err(|e| auth_failure(e, "Código MFA inválido"))?;

        let session = resp.into_session()?;
        let user = session.user.clone();
        self.session().replace(session)?;
        info!(user_id, "MFA verified, logged in");
        Ok(user)
    }

    /// `POST /auth/mfa/setup`. The returned user (now flagged with MFA)
    /// replaces the session's profile.
    pub async fn setup_mfa(&self, user_id: i64) -> Result<MfaSetup, Error> {
        let setup: MfaSetup = self
            .post("/auth/mfa/setup", &UserIdRequest { user_id })
            .await
            .map_err(|e| auth_failure(e, "Erro ao configurar MFA"))?;
        self.session().set_user(setup.user.clone())?;
        Ok(setup)
    }

    /// `POST /auth/mfa/disable`; updates the session's profile.
    pub async fn disable_mfa(&self, user_id: i64) -> Result<User, Error> {
        let resp: UserResponse = self
            .post("/auth/mfa/disable", &UserIdRequest { user_id })
            .await
            .map_err(|e| auth_failure(e, "Erro ao desativar MFA"))?;
        self.session().set_user(resp.user.clone())?;
        Ok(resp.user)
    }

    /// Force a refresh-token exchange now.
    pub async fn refresh(&self) -> Result<(), Error> {
        let current = self.session().access_token();
        self.refresh_after(current.as_ref()).await.map(|_| ())
    }

    /// `POST /auth/logout`. Backend failures are only logged; the session
    /// is cleared in every case.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.session().refresh_token() {
            let body = serde_json::json!({ "refresh_token": refresh_token.expose_secret() });
            if let Err(e) = self.post_no_response("/auth/logout", &body).await {
                warn!(error = %e, "logout request failed");
            }
        }
        self.session().clear();
        info!("logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDetail;

    #[test]
    fn auth_failure_prefers_backend_detail() {
        let err = Error::Api {
            status: 401,
            detail: Some(ErrorDetail::Message("Credenciais inválidas".into())),
            message: None,
        };
        let Error::Authentication { message } = auth_failure(err, "Erro ao fazer login") else {
            panic!("expected authentication error");
        };
        assert_eq!(message, "Credenciais inválidas");
    }

    #[test]
    fn auth_failure_falls_back_to_default() {
        let err = Error::Api {
            status: 500,
            detail: None,
            message: Some("boom".into()),
        };
        let Error::Authentication { message } = auth_failure(err, "Código MFA inválido") else {
            panic!("expected authentication error");
        };
        assert_eq!(message, "Código MFA inválido");

        assert!(matches!(
            auth_failure(Error::SessionExpired, "x"),
            Error::SessionExpired
        ));
    }
}
