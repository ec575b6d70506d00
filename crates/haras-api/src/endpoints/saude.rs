// Health endpoints: due applications, quick application, statistics, history.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AplicacaoRapida, EstatisticasSaude, HistoricoSaude, ProximaAplicacao, Saude};

impl ApiClient {
    /// `GET /api/saude/proximas-aplicacoes/?dias_antecedencia=N`
    pub async fn proximas_aplicacoes(&self, dias: u32) -> Result<Vec<ProximaAplicacao>, Error> {
        let params = [("dias_antecedencia".to_owned(), dias.to_string())];
        self.get_with_params("/api/saude/proximas-aplicacoes/", &params)
            .await
    }

    /// `POST /api/saude/aplicacao-rapida`; records the treatment and
    /// debits the medicine's stock server-side.
    pub async fn aplicacao_rapida(&self, dados: &AplicacaoRapida) -> Result<Saude, Error> {
        self.post("/api/saude/aplicacao-rapida", dados).await
    }

    /// `GET /api/saude/estatisticas/geral`
    pub async fn estatisticas_saude(&self) -> Result<EstatisticasSaude, Error> {
        self.get("/api/saude/estatisticas/geral").await
    }

    /// `GET /api/saude/historico/{animal_id}?meses=N`
    pub async fn historico_saude(&self, animal_id: i64, meses: u32) -> Result<HistoricoSaude, Error> {
        let params = [("meses".to_owned(), meses.to_string())];
        self.get_with_params(&format!("/api/saude/historico/{animal_id}"), &params)
            .await
    }
}
