// Explicit session object.
//
// Holds the access token, refresh token and user profile of the logged-in
// user. Reads are lock-free (`ArcSwapOption`), changes are broadcast on a
// `watch` channel, and every change is written through to a pluggable
// `SessionStore` so a restarted process can pick the session back up.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::Error;
use crate::models::User;

// ── Session ─────────────────────────────────────────────────────────

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub user: User,
}

impl Session {
    pub fn new(access_token: String, refresh_token: String, user: User) -> Self {
        Self {
            access_token: SecretString::from(access_token),
            refresh_token: SecretString::from(refresh_token),
            user,
        }
    }

    fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            user: Some(self.user.clone()),
            access_token: Some(self.access_token.expose_secret().to_owned()),
            refresh_token: Some(self.refresh_token.expose_secret().to_owned()),
        }
    }
}

/// On-disk shape of a session. Each entry is optional because stores may
/// hold partial leftovers from an interrupted write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(rename = "user_haras", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(
        rename = "access_token_haras",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
    #[serde(
        rename = "refresh_token_haras",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token: Option<String>,
}

impl PersistedSession {
    /// A usable session only when all three parts are present.
    pub fn into_session(self) -> Option<Session> {
        match (self.access_token, self.refresh_token, self.user) {
            (Some(access), Some(refresh), Some(user)) if !access.is_empty() => {
                Some(Session::new(access, refresh, user))
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.access_token.is_none() && self.refresh_token.is_none()
    }
}

// ── Persistence ─────────────────────────────────────────────────────

/// Where sessions are persisted between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<PersistedSession, Error>;
    fn save(&self, session: &PersistedSession) -> Result<(), Error>;
    fn clear(&self) -> Result<(), Error>;
}

/// In-process store. Used by tests and by callers that do not persist.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<PersistedSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(session: PersistedSession) -> Self {
        Self {
            slot: Mutex::new(session),
        }
    }

    /// Current stored content.
    pub fn snapshot(&self) -> PersistedSession {
        self.slot.lock().expect("lock poisoned").clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<PersistedSession, Error> {
        Ok(self.snapshot())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), Error> {
        *self.slot.lock().expect("lock poisoned") = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.slot.lock().expect("lock poisoned") = PersistedSession::default();
        Ok(())
    }
}

// ── Handle ──────────────────────────────────────────────────────────

struct SessionInner {
    current: ArcSwapOption<Session>,
    changes: watch::Sender<Option<Arc<Session>>>,
    store: Arc<dyn SessionStore>,
}

/// Shared, cheaply cloneable handle to the current session.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Empty handle writing through to `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (changes, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner {
                current: ArcSwapOption::empty(),
                changes,
                store,
            }),
        }
    }

    /// Handle backed by a [`MemorySessionStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Restore the persisted session, if the store holds a complete one.
    ///
    /// Partial leftovers are ignored (not deleted) so a later login simply
    /// overwrites them.
    pub fn bootstrap(store: Arc<dyn SessionStore>) -> Result<Self, Error> {
        let persisted = store.load()?;
        let handle = Self::new(store);
        if let Some(session) = persisted.into_session() {
            debug!(user = %session.user.email, "restored persisted session");
            handle.publish(Some(Arc::new(session)));
        }
        Ok(handle)
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn current(&self) -> Option<Arc<Session>> {
        self.inner.current.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.current.load().is_some()
    }

    pub fn access_token(&self) -> Option<SecretString> {
        self.current().map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<SecretString> {
        self.current().map(|s| s.refresh_token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current().map(|s| s.user.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.inner.changes.subscribe()
    }

    // ── Writes ──────────────────────────────────────────────────────

    /// Install a new session and persist it.
    pub fn replace(&self, session: Session) -> Result<(), Error> {
        self.inner.store.save(&session.to_persisted())?;
        self.publish(Some(Arc::new(session)));
        Ok(())
    }

    /// Swap in a renewed access token, keeping refresh token and user.
    pub fn set_access_token(&self, token: SecretString) -> Result<(), Error> {
        let Some(current) = self.current() else {
            return Err(Error::SessionExpired);
        };
        self.replace(Session {
            access_token: token,
            refresh_token: current.refresh_token.clone(),
            user: current.user.clone(),
        })
    }

    /// Update the stored user profile (after MFA changes).
    pub fn set_user(&self, user: User) -> Result<(), Error> {
        let Some(current) = self.current() else {
            return Err(Error::SessionExpired);
        };
        self.replace(Session {
            access_token: current.access_token.clone(),
            refresh_token: current.refresh_token.clone(),
            user,
        })
    }

    /// Drop the session from memory and from the store.
    ///
    /// Store failures are logged; the in-memory session is cleared
    /// regardless.
    pub fn clear(&self) {
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
        self.publish(None);
    }

    fn publish(&self, session: Option<Arc<Session>>) {
        self.inner.current.store(session.clone());
        self.inner.changes.send_replace(session);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Perfil;

    fn user() -> User {
        User {
            id: 1,
            nome_completo: "Ana Souza".into(),
            email: "ana@haras.com".into(),
            perfil: Perfil::Admin,
            ativo: Some("S".into()),
            mfa_ativo: Some("N".into()),
            data_cadastro: None,
            data_ultimo_login: None,
        }
    }

    #[test]
    fn bootstrap_requires_all_three_parts() {
        let partial = PersistedSession {
            user: Some(user()),
            access_token: Some("acc".into()),
            refresh_token: None,
        };
        let handle = SessionHandle::bootstrap(Arc::new(MemorySessionStore::with(partial))).unwrap();
        assert!(!handle.is_authenticated());

        let full = PersistedSession {
            user: Some(user()),
            access_token: Some("acc".into()),
            refresh_token: Some("ref".into()),
        };
        let handle = SessionHandle::bootstrap(Arc::new(MemorySessionStore::with(full))).unwrap();
        assert!(handle.is_authenticated());
        assert_eq!(handle.access_token().unwrap().expose_secret(), "acc");
    }

    #[test]
    fn replace_and_clear_write_through() {
        let store = Arc::new(MemorySessionStore::new());
        let handle = SessionHandle::new(store.clone());

        handle
            .replace(Session::new("a1".into(), "r1".into(), user()))
            .unwrap();
        assert_eq!(store.snapshot().access_token.as_deref(), Some("a1"));

        handle.set_access_token(SecretString::from("a2".to_owned())).unwrap();
        let saved = store.snapshot();
        assert_eq!(saved.access_token.as_deref(), Some("a2"));
        assert_eq!(saved.refresh_token.as_deref(), Some("r1"));

        handle.clear();
        assert!(store.snapshot().is_empty());
        assert!(handle.current().is_none());
    }

    #[test]
    fn persisted_keys_match_storage_names() {
        let s = Session::new("a".into(), "r".into(), user()).to_persisted();
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("user_haras").is_some());
        assert_eq!(json["access_token_haras"], "a");
        assert_eq!(json["refresh_token_haras"], "r");
    }

    #[tokio::test]
    async fn watchers_see_logout() {
        let handle = SessionHandle::in_memory();
        handle
            .replace(Session::new("a".into(), "r".into(), user()))
            .unwrap();
        let mut rx = handle.subscribe();
        assert!(rx.borrow_and_update().is_some());

        handle.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
