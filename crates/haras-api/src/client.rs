// Async HTTP client for the Haras farm API.
//
// Bearer auth from the shared session; one refresh-and-retry on 401.
// Refreshes are single-flight: concurrent 401s wait on one exchange
// and reuse its token.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::activity::ActivityTracker;
use crate::error::{Error, ErrorDetail};
use crate::session::SessionHandle;
use crate::transport::TransportConfig;

const REFRESH_PATH: &str = "auth/refresh";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(serde::Deserialize)]
struct RefreshResponse {
    access_token: String,
}

/// A binary response body with what is needed to save it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    /// From `Content-Disposition`, when the server sent one.
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

/// `filename` parameter of a `Content-Disposition` value, quoted or bare.
fn disposition_filename(value: &str) -> Option<String> {
    value.split(';').find_map(|part| {
        let (key, raw) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches(|c| c == '"' || c == '\'');
        (!name.is_empty()).then(|| name.to_owned())
    })
}

fn header_str(resp: &reqwest::Response, name: HeaderName) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

// ── Client ───────────────────────────────────────────────────────────

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: SessionHandle,
    activity: ActivityTracker,
    refresh_lock: Mutex<()>,
}

/// Shared handle to the farm API.
///
/// Cheap to clone; all clones share the HTTP pool, the session, the
/// activity counter and the refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.inner.session.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` (the backend root, e.g.
    /// `http://localhost:8000`) bound to `session`.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        session: SessionHandle,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, session)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        session: SessionHandle,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                session,
                activity: ActivityTracker::new(),
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn session(&self) -> &SessionHandle {
        &self.inner.session
    }

    /// In-flight request counter driving busy indicators.
    pub fn activity(&self) -> &ActivityTracker {
        &self.inner.activity
    }

    /// Join an absolute API path (`/api/animais`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request pipeline ─────────────────────────────────────────────

    /// Send with the current bearer token; on 401 refresh once and resend.
    ///
    /// `build` is invoked once per attempt so the request can be rebuilt
    /// after a refresh.
    async fn send_authorized<F>(&self, build: F) -> Result<reqwest::Response, Error>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Sync,
    {
        let _busy = self.inner.activity.begin();

        let token = self.inner.session.access_token();
        let resp = self.dispatch(&build, token.as_ref()).await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return Ok(resp);
        }

        debug!("401 received, refreshing access token");
        let fresh = self.refresh_after(token.as_ref()).await?;
        let resp = self.dispatch(&build, Some(&fresh)).await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            warn!("request still unauthorized after refresh, clearing session");
            self.inner.session.clear();
            return Err(Error::SessionExpired);
        }
        Ok(resp)
    }

    /// Send without credentials and without the refresh retry.
    async fn send_public<F>(&self, build: F) -> Result<reqwest::Response, Error>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Sync,
    {
        let _busy = self.inner.activity.begin();
        self.dispatch(&build, None).await
    }

    async fn dispatch<F>(
        &self,
        build: &F,
        token: Option<&SecretString>,
    ) -> Result<reqwest::Response, Error>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Sync,
    {
        let mut builder = build(&self.inner.http);
        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        let request = builder.build()?;
        debug!("{} {}", request.method(), request.url());
        Ok(self.inner.http.execute(request).await?)
    }

    // ── Token refresh ────────────────────────────────────────────────

    /// Obtain a usable access token after `stale` was rejected.
    ///
    /// Serialized on the refresh lock. When another task already replaced
    /// `stale` while this one waited, that token is returned as-is. On
    /// failure the session is cleared and `SessionExpired` returned.
    pub(crate) async fn refresh_after(
        &self,
        stale: Option<&SecretString>,
    ) -> Result<SecretString, Error> {
        let _guard = self.inner.refresh_lock.lock().await;

        if let Some(current) = self.inner.session.access_token() {
            let superseded = stale.is_none_or(|s| s.expose_secret() != current.expose_secret());
            if superseded {
                debug!("access token already renewed by a concurrent request");
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.inner.session.refresh_token() else {
            warn!("no refresh token available, clearing session");
            self.inner.session.clear();
            return Err(Error::SessionExpired);
        };

        match self.exchange_refresh(&refresh_token).await {
            Ok(access) => {
                self.inner.session.set_access_token(access.clone())?;
                info!("access token refreshed");
                Ok(access)
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.inner.session.clear();
                Err(Error::SessionExpired)
            }
        }
    }

    async fn exchange_refresh(&self, refresh_token: &SecretString) -> Result<SecretString, Error> {
        let url = self.url(REFRESH_PATH)?;
        let body = serde_json::json!({ "refresh_token": refresh_token.expose_secret() });
        debug!("POST {url}");

        let resp = self.inner.http.post(url).json(&body).send().await?;
        let parsed: RefreshResponse = self.handle_response(resp).await?;
        Ok(SecretString::from(parsed.access_token))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        let resp = self.send_authorized(|http| http.get(url.clone())).await?;
        self.handle_response(resp).await
    }

    /// GET a file. Error bodies are decoded like any other response.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Download, Error> {
        let url = self.url(path)?;
        let resp = self.send_authorized(|http| http.get(url.clone())).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        let filename =
            header_str(&resp, CONTENT_DISPOSITION).and_then(|v| disposition_filename(&v));
        let content_type = header_str(&resp, CONTENT_TYPE);
        let bytes = resp.bytes().await?.to_vec();
        debug!(size = bytes.len(), ?filename, "download received");
        Ok(Download {
            bytes,
            filename,
            content_type,
        })
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let resp = self
            .send_authorized(|http| http.get(url.clone()).query(params))
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let resp = self
            .send_authorized(|http| http.post(url.clone()).json(body))
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        let resp = self
            .send_authorized(|http| http.post(url.clone()).json(body))
            .await?;
        self.handle_empty(resp).await
    }

    /// POST without bearer token or refresh retry (login, MFA verify).
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let resp = self
            .send_public(|http| http.post(url.clone()).json(body))
            .await?;
        self.handle_response(resp).await
    }

    /// Multipart POST. `form` is called per attempt since a `Form` is
    /// consumed by sending it.
    pub(crate) async fn post_multipart<T, F>(&self, path: &str, form: F) -> Result<T, Error>
    where
        T: DeserializeOwned,
        F: Fn() -> Form + Sync,
    {
        let url = self.url(path)?;
        let resp = self
            .send_authorized(|http| http.post(url.clone()).multipart(form()))
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let resp = self
            .send_authorized(|http| http.put(url.clone()).json(body))
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        let resp = self
            .send_authorized(|http| http.delete(url.clone()))
            .await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Api {
                status: status.as_u16(),
                detail: err.detail,
                message: err.message,
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                detail: None,
                message: (!raw.is_empty()).then_some(raw),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_filename_quoted_and_bare() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="laudo 12.pdf""#).as_deref(),
            Some("laudo 12.pdf")
        );
        assert_eq!(
            disposition_filename("attachment; filename=analise_3.png").as_deref(),
            Some("analise_3.png")
        );
        assert_eq!(
            disposition_filename("attachment; FileName='x.jpg'; size=10").as_deref(),
            Some("x.jpg")
        );
    }

    #[test]
    fn disposition_without_filename() {
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename(r#"attachment; filename="""#), None);
    }
}
