// Movement endpoints: current locations and per-animal history.

use super::compact_params;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{HistoricoMovimentacao, LocalizacaoAtual};

impl ApiClient {
    /// `GET /api/movimentacoes/relatorio/localizacoes`, optionally narrowed
    /// to one animal or one paddock (origin or destination).
    pub async fn localizacoes(
        &self,
        animal_id: Option<i64>,
        terreno_id: Option<i64>,
    ) -> Result<Vec<LocalizacaoAtual>, Error> {
        let params = compact_params(vec![
            ("animal_id", animal_id.map(|v| v.to_string())),
            ("terreno_id", terreno_id.map(|v| v.to_string())),
        ]);
        self.get_with_params("/api/movimentacoes/relatorio/localizacoes", &params)
            .await
    }

    /// `GET /api/movimentacoes/animal/{id}/historico`
    pub async fn historico_movimentacoes(
        &self,
        animal_id: i64,
    ) -> Result<HistoricoMovimentacao, Error> {
        self.get(&format!("/api/movimentacoes/animal/{animal_id}/historico"))
            .await
    }
}
