// ── Dashboard store ──
//
// Holds the last dashboard aggregate, the active period/owner filter and
// the per-animal / per-paddock reports.

use std::sync::Arc;

use haras_api::models::{AlertaEstoque, AlertaSaude, Dashboard, RelatorioAnimal, RelatorioTerreno};
use haras_api::{ApiClient, DashboardFilter};
use serde::Serialize;
use tokio::sync::{RwLock, watch};
use tracing::debug;

use crate::error::CoreError;

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub filter: DashboardFilter,
    pub data: Option<Dashboard>,
    pub relatorio_animal: Option<RelatorioAnimal>,
    pub relatorio_terreno: Option<RelatorioTerreno>,
    pub loading: bool,
}

/// Figures derived from the loaded aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_alertas: usize,
    pub alertas_criticos: usize,
    pub custo_total: f64,
}

impl DashboardState {
    pub fn summary(&self) -> DashboardSummary {
        let Some(ref d) = self.data else {
            return DashboardSummary::default();
        };
        DashboardSummary {
            total_alertas: d.alertas_saude.len() + d.alertas_estoque.len(),
            alertas_criticos: self.alertas_criticos().len(),
            custo_total: d.custos_proprietarios.iter().map(|c| c.total_geral).sum(),
        }
    }

    /// High-priority health alerts and critical stock alerts.
    pub fn alertas_criticos(&self) -> Vec<CriticalAlert<'_>> {
        let Some(ref d) = self.data else {
            return Vec::new();
        };
        d.alertas_saude
            .iter()
            .filter(|a| a.is_critical())
            .map(CriticalAlert::Saude)
            .chain(
                d.alertas_estoque
                    .iter()
                    .filter(|a| a.is_critical())
                    .map(CriticalAlert::Estoque),
            )
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CriticalAlert<'a> {
    Saude(&'a AlertaSaude),
    Estoque(&'a AlertaEstoque),
}

/// Fields set in `over` win over `base`.
fn overlay(base: &DashboardFilter, over: &DashboardFilter) -> DashboardFilter {
    DashboardFilter {
        data_inicio: over.data_inicio.clone().or_else(|| base.data_inicio.clone()),
        data_fim: over.data_fim.clone().or_else(|| base.data_fim.clone()),
        proprietario: over
            .proprietario
            .clone()
            .or_else(|| base.proprietario.clone()),
    }
}

#[derive(Clone)]
pub struct DashboardStore {
    api: ApiClient,
    state: Arc<RwLock<DashboardState>>,
    snapshot: Arc<watch::Sender<Arc<DashboardState>>>,
}

impl DashboardStore {
    pub fn new(api: ApiClient) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(DashboardState::default()));
        Self {
            api,
            state: Arc::new(RwLock::new(DashboardState::default())),
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.snapshot.subscribe()
    }

    /// Load the aggregate with the stored filter, overlaid by `extra`.
    pub async fn load(&self, extra: &DashboardFilter) -> Result<Dashboard, CoreError> {
        let filter = self.begin(|s| overlay(&s.filter, extra)).await;
        let result = self.api.dashboard(&filter).await;

        let mut state = self.state.write().await;
        state.loading = false;
        if let Ok(ref data) = result {
            debug!(
                alertas_saude = data.alertas_saude.len(),
                alertas_estoque = data.alertas_estoque.len(),
                "dashboard loaded"
            );
            state.data = Some(data.clone());
        }
        self.publish(&state);
        result.map_err(CoreError::from)
    }

    /// Reload with the stored filter only.
    pub async fn refresh(&self) -> Result<Dashboard, CoreError> {
        self.load(&DashboardFilter::default()).await
    }

    pub async fn relatorio_animal(
        &self,
        animal_id: i64,
        extra: &DashboardFilter,
    ) -> Result<RelatorioAnimal, CoreError> {
        let filter = self.begin(|s| overlay(&s.filter, extra)).await;
        let result = self.api.relatorio_animal(animal_id, &filter).await;

        let mut state = self.state.write().await;
        state.loading = false;
        if let Ok(ref r) = result {
            state.relatorio_animal = Some(r.clone());
        }
        self.publish(&state);
        result.map_err(|e| CoreError::from(e).or_not_found("animal", animal_id))
    }

    pub async fn relatorio_terreno(&self, terreno_id: i64) -> Result<RelatorioTerreno, CoreError> {
        self.begin(|_| ()).await;
        let result = self.api.relatorio_terreno(terreno_id).await;

        let mut state = self.state.write().await;
        state.loading = false;
        if let Ok(ref r) = result {
            state.relatorio_terreno = Some(r.clone());
        }
        self.publish(&state);
        result.map_err(|e| CoreError::from(e).or_not_found("terreno", terreno_id))
    }

    pub async fn set_filter(&self, filter: &DashboardFilter) {
        let mut state = self.state.write().await;
        state.filter = overlay(&state.filter, filter);
        self.publish(&state);
    }

    pub async fn clear_filter(&self) {
        let mut state = self.state.write().await;
        state.filter = DashboardFilter::default();
        self.publish(&state);
    }

    async fn begin<R>(&self, read: impl FnOnce(&DashboardState) -> R) -> R {
        let mut state = self.state.write().await;
        state.loading = true;
        self.publish(&state);
        read(&state)
    }

    fn publish(&self, state: &DashboardState) {
        self.snapshot.send_replace(Arc::new(state.clone()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_counts_alerts_and_costs() {
        let data: Dashboard = serde_json::from_value(json!({
            "alertas_saude": [
                {"animal_id": 1, "animal_nome": "a", "tipo_alerta": "VACINA_VENCIDA",
                 "descricao": "x", "dias_atraso": 3, "prioridade": "ALTA"},
                {"animal_id": 2, "animal_nome": "b", "tipo_alerta": "VACINA_PROXIMA",
                 "descricao": "y", "dias_atraso": 0, "prioridade": "BAIXA"}
            ],
            "alertas_estoque": [
                {"produto_id": 9, "produto_nome": "Ivermectina", "tipo_produto": "MEDICAMENTO",
                 "estoque_atual": 0.0, "estoque_minimo": 5.0, "unidade_medida": "ml",
                 "status": "CRITICO"}
            ],
            "custos_proprietarios": [
                {"proprietario": "Ana", "total_medicamentos": 10.0, "total_racao": 20.0,
                 "total_manejo": 0.0, "total_geral": 30.0, "numero_animais": 2,
                 "custo_por_animal": 15.0, "periodo": "2024"},
                {"proprietario": "Bia", "total_medicamentos": 0.0, "total_racao": 12.5,
                 "total_manejo": 0.0, "total_geral": 12.5, "numero_animais": 1,
                 "custo_por_animal": 12.5, "periodo": "2024"}
            ]
        }))
        .unwrap();

        let state = DashboardState {
            data: Some(data),
            ..DashboardState::default()
        };
        let summary = state.summary();
        assert_eq!(summary.total_alertas, 3);
        assert_eq!(summary.alertas_criticos, 2);
        assert!((summary.custo_total - 42.5).abs() < f64::EPSILON);
        assert!(matches!(state.alertas_criticos()[1], CriticalAlert::Estoque(_)));
    }

    #[test]
    fn empty_state_has_zero_summary() {
        assert_eq!(DashboardState::default().summary(), DashboardSummary::default());
    }

    #[test]
    fn overlay_prefers_explicit_fields() {
        let base = DashboardFilter {
            data_inicio: Some("2024-01-01".into()),
            proprietario: Some("Ana".into()),
            ..DashboardFilter::default()
        };
        let over = DashboardFilter {
            proprietario: Some("Bia".into()),
            ..DashboardFilter::default()
        };
        let merged = overlay(&base, &over);
        assert_eq!(merged.data_inicio.as_deref(), Some("2024-01-01"));
        assert_eq!(merged.proprietario.as_deref(), Some("Bia"));
        assert_eq!(merged.data_fim, None);
    }
}
