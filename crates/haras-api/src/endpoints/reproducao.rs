// Reproduction endpoints: statistics, calendar, per-mare history.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{EstatisticasReproducao, EventoReproducao, HistoricoEgua};

impl ApiClient {
    /// `GET /api/reproducao/relatorio/estatisticas[?ano=]`
    pub async fn estatisticas_reproducao(
        &self,
        ano: Option<i32>,
    ) -> Result<EstatisticasReproducao, Error> {
        let params: Vec<(String, String)> = ano
            .map(|a| vec![("ano".to_owned(), a.to_string())])
            .unwrap_or_default();
        self.get_with_params("/api/reproducao/relatorio/estatisticas", &params)
            .await
    }

    /// `GET /api/reproducao/calendario/eventos?dias=N`
    pub async fn calendario_reproducao(&self, dias: u32) -> Result<Vec<EventoReproducao>, Error> {
        let params = [("dias".to_owned(), dias.to_string())];
        self.get_with_params("/api/reproducao/calendario/eventos", &params)
            .await
    }

    /// `GET /api/reproducao/egua/{id}/historico`
    pub async fn historico_egua(&self, egua_id: i64) -> Result<HistoricoEgua, Error> {
        self.get(&format!("/api/reproducao/egua/{egua_id}/historico"))
            .await
    }
}
