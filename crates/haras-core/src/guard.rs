// Route access guard.
//
// Pure decision function: given a target path and the session, either let
// navigation proceed or send the user to the login entry point.

use haras_api::SessionHandle;
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";

/// Known application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Route {
    Login,
    Dashboard,
    NotFound,
}

impl Route {
    pub fn resolve(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    Redirect(&'static str),
}

#[derive(Debug, Clone)]
pub struct Guard {
    session: SessionHandle,
}

impl Guard {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    pub fn check(&self, path: &str) -> Navigation {
        let route = Route::resolve(path);
        if route.requires_auth() && self.session.access_token().is_none() {
            debug!(path, "unauthenticated navigation redirected to login");
            return Navigation::Redirect(LOGIN_PATH);
        }
        Navigation::Proceed(route)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve() {
        assert_eq!(Route::resolve("/"), Route::Login);
        assert_eq!(Route::resolve("/login"), Route::Login);
        assert_eq!(Route::resolve("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::resolve("/nada"), Route::NotFound);
    }

    #[test]
    fn protected_route_redirects_without_session() {
        let guard = Guard::new(SessionHandle::in_memory());
        assert_eq!(guard.check("/dashboard"), Navigation::Redirect(LOGIN_PATH));
        assert_eq!(guard.check("/"), Navigation::Proceed(Route::Login));
        assert_eq!(guard.check("/x"), Navigation::Proceed(Route::NotFound));
    }

    #[test]
    fn protected_route_proceeds_with_session() {
        let user = serde_json::from_value(serde_json::json!({
            "ID": 1, "NOME_COMPLETO": "Ana", "EMAIL": "ana@haras.com"
        }))
        .unwrap();
        let session = SessionHandle::in_memory();
        session
            .replace(haras_api::Session::new("a".into(), "r".into(), user))
            .unwrap();
        let guard = Guard::new(session);
        assert_eq!(
            guard.check("/dashboard"),
            Navigation::Proceed(Route::Dashboard)
        );
    }
}
