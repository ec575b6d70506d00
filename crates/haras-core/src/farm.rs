// ── Farm facade ──
//
// Single entry point for front-ends: owns the API client, the session
// and one store per backend resource. Cheaply cloneable.

use std::sync::Arc;

use haras_api::models::{
    AnaliseSolo, Animal, AplicacaoManejo, Crescimento, Ferrageamento, Medicamento, Movimentacao,
    ProdutoManejo, ProdutoRacao, Reproducao, Saude, Terreno, User,
};
use haras_api::{
    ActivityTracker, ApiClient, LoginOutcome, MfaSetup, Resource, SessionHandle, SessionStore,
    TransportConfig,
};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::guard::{Guard, Navigation};
use crate::store::{DashboardStore, ResourceStore, UpcomingBuckets, default_filters};

/// Where and how to reach the backend.
#[derive(Debug, Clone)]
pub struct FarmConfig {
    pub base_url: String,
    pub transport: TransportConfig,
}

impl FarmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            transport: TransportConfig::default(),
        }
    }
}

struct FarmInner {
    api: ApiClient,
    animals: ResourceStore<Animal>,
    terrenos: ResourceStore<Terreno>,
    crescimento: ResourceStore<Crescimento>,
    saude: ResourceStore<Saude>,
    medicamentos: ResourceStore<Medicamento>,
    ferrageamento: ResourceStore<Ferrageamento>,
    reproducao: ResourceStore<Reproducao>,
    manejo: ResourceStore<ProdutoManejo>,
    aplicacoes: ResourceStore<AplicacaoManejo>,
    analises: ResourceStore<AnaliseSolo>,
    racao: ResourceStore<ProdutoRacao>,
    movimentacoes: ResourceStore<Movimentacao>,
    dashboard: DashboardStore,
}

#[derive(Clone)]
pub struct Farm {
    inner: Arc<FarmInner>,
}

fn store<T: Resource>(api: &ApiClient) -> ResourceStore<T> {
    ResourceStore::new(api.clone(), default_filters(T::SPEC.name))
}

impl Farm {
    /// Build the client and restore any session persisted in `sessions`.
    /// No request is made.
    pub fn connect(config: &FarmConfig, sessions: Arc<dyn SessionStore>) -> Result<Self, CoreError> {
        let session = SessionHandle::bootstrap(sessions)?;
        let api = ApiClient::new(&config.base_url, &config.transport, session)?;
        debug!(
            base_url = %api.base_url(),
            authenticated = api.session().is_authenticated(),
            "farm client ready"
        );
        Ok(Self::from_client(api))
    }

    /// Wrap an already-built client.
    pub fn from_client(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(FarmInner {
                animals: store(&api),
                terrenos: store(&api),
                crescimento: store(&api),
                saude: store(&api),
                medicamentos: store(&api),
                ferrageamento: store(&api),
                reproducao: store(&api),
                manejo: store(&api),
                aplicacoes: store(&api),
                analises: store(&api),
                racao: store(&api),
                movimentacoes: store(&api),
                dashboard: DashboardStore::new(api.clone()),
                api,
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn session(&self) -> &SessionHandle {
        self.inner.api.session()
    }

    /// In-flight request counter, for a busy indicator.
    pub fn activity(&self) -> &ActivityTracker {
        self.inner.api.activity()
    }

    // ── Stores ──────────────────────────────────────────────────────

    pub fn animals(&self) -> &ResourceStore<Animal> {
        &self.inner.animals
    }

    pub fn terrenos(&self) -> &ResourceStore<Terreno> {
        &self.inner.terrenos
    }

    pub fn crescimento(&self) -> &ResourceStore<Crescimento> {
        &self.inner.crescimento
    }

    pub fn saude(&self) -> &ResourceStore<Saude> {
        &self.inner.saude
    }

    pub fn medicamentos(&self) -> &ResourceStore<Medicamento> {
        &self.inner.medicamentos
    }

    pub fn ferrageamento(&self) -> &ResourceStore<Ferrageamento> {
        &self.inner.ferrageamento
    }

    pub fn reproducao(&self) -> &ResourceStore<Reproducao> {
        &self.inner.reproducao
    }

    pub fn manejo(&self) -> &ResourceStore<ProdutoManejo> {
        &self.inner.manejo
    }

    pub fn aplicacoes(&self) -> &ResourceStore<AplicacaoManejo> {
        &self.inner.aplicacoes
    }

    pub fn analises(&self) -> &ResourceStore<AnaliseSolo> {
        &self.inner.analises
    }

    pub fn racao(&self) -> &ResourceStore<ProdutoRacao> {
        &self.inner.racao
    }

    pub fn movimentacoes(&self) -> &ResourceStore<Movimentacao> {
        &self.inner.movimentacoes
    }

    pub fn dashboard(&self) -> &DashboardStore {
        &self.inner.dashboard
    }

    /// Applications due within `dias` days, split by urgency.
    pub async fn upcoming_applications(&self, dias: u32) -> Result<UpcomingBuckets, CoreError> {
        let rows = self.inner.api.proximas_aplicacoes(dias).await?;
        Ok(UpcomingBuckets::split(rows))
    }

    // ── Session ─────────────────────────────────────────────────────

    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, CoreError> {
        let outcome = self.inner.api.login(email, password).await?;
        if let LoginOutcome::Authenticated(ref user) = outcome {
            info!(user = %user.email, "logged in");
        }
        Ok(outcome)
    }

    pub async fn verify_mfa(&self, user_id: i64, code: &str) -> Result<User, CoreError> {
        Ok(self.inner.api.verify_mfa(user_id, code).await?)
    }

    pub async fn setup_mfa(&self) -> Result<MfaSetup, CoreError> {
        let user = self.current_user()?;
        Ok(self.inner.api.setup_mfa(user.id).await?)
    }

    pub async fn disable_mfa(&self) -> Result<User, CoreError> {
        let user = self.current_user()?;
        Ok(self.inner.api.disable_mfa(user.id).await?)
    }

    /// Revoke the refresh token server-side (best effort) and drop the
    /// local session.
    pub async fn logout(&self) {
        self.inner.api.logout().await;
    }

    pub fn current_user(&self) -> Result<User, CoreError> {
        self.session().user().ok_or(CoreError::NotAuthenticated)
    }

    pub fn guard(&self) -> Guard {
        Guard::new(self.session().clone())
    }

    /// Shorthand for [`Guard::check`].
    pub fn navigate(&self, path: &str) -> Navigation {
        self.guard().check(path)
    }
}
