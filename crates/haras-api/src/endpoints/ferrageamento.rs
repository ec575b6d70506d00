// Farriery endpoints: quick record, due evaluations, statistics, reports.

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    AlertaVencimentoFerrageamento, EstatisticaFerrageamentoAnimal, EstatisticasFerrageamento,
    FerradorEstatisticas, FerradorOption, Ferrageamento, FerrageamentoRapido,
    RelatorioFerrageamento, TipoFerrageamento,
};

use super::compact_params;

/// Farrier options whose label contains `termo`, case-insensitively.
/// A blank term keeps every farrier.
pub fn filter_ferradores(ferradores: &[FerradorEstatisticas], termo: &str) -> Vec<FerradorOption> {
    let termo = termo.trim().to_lowercase();
    ferradores
        .iter()
        .map(FerradorOption::from)
        .filter(|o| termo.is_empty() || o.label.to_lowercase().contains(&termo))
        .collect()
}

impl ApiClient {
    /// `POST /api/ferrageamento/aplicacao-rapida`; dated today, next
    /// evaluation scheduled by the server from the type.
    pub async fn ferrageamento_rapido(
        &self,
        dados: &FerrageamentoRapido,
    ) -> Result<Ferrageamento, Error> {
        let registro: Ferrageamento = self
            .post("/api/ferrageamento/aplicacao-rapida", dados)
            .await?;
        info!(
            id = registro.id,
            animal = dados.id_animal,
            tipo = %dados.tipo_ferrageamento,
            "quick farriery recorded"
        );
        Ok(registro)
    }

    /// `GET /api/ferrageamento/alertas/vencimentos?dias_antecedencia=N`
    pub async fn vencimentos_ferrageamento(
        &self,
        dias_antecedencia: u32,
    ) -> Result<Vec<AlertaVencimentoFerrageamento>, Error> {
        let params = [("dias_antecedencia".to_owned(), dias_antecedencia.to_string())];
        self.get_with_params("/api/ferrageamento/alertas/vencimentos", &params)
            .await
    }

    /// `GET /api/ferrageamento/estatisticas/geral`
    pub async fn estatisticas_ferrageamento(&self) -> Result<EstatisticasFerrageamento, Error> {
        self.get("/api/ferrageamento/estatisticas/geral").await
    }

    /// `GET /api/ferrageamento/estatisticas/animais?meses_periodo=N`;
    /// overdue animals first.
    pub async fn estatisticas_ferrageamento_animais(
        &self,
        meses: u32,
    ) -> Result<Vec<EstatisticaFerrageamentoAnimal>, Error> {
        let params = [("meses_periodo".to_owned(), meses.to_string())];
        self.get_with_params("/api/ferrageamento/estatisticas/animais", &params)
            .await
    }

    /// `GET /api/ferrageamento/relatorios/ferradores?ano=`
    pub async fn relatorio_ferradores(
        &self,
        ano: Option<i32>,
    ) -> Result<Vec<FerradorEstatisticas>, Error> {
        let params = compact_params(vec![("ano", ano.map(|a| a.to_string()))]);
        self.get_with_params("/api/ferrageamento/relatorios/ferradores", &params)
            .await
    }

    /// Farrier selector options matching `termo`, built from the farrier
    /// report.
    pub async fn buscar_ferradores(&self, termo: &str) -> Result<Vec<FerradorOption>, Error> {
        let ferradores = self.relatorio_ferradores(None).await?;
        let options = filter_ferradores(&ferradores, termo);
        debug!(termo, total = ferradores.len(), matched = options.len(), "farrier search");
        Ok(options)
    }

    /// `GET /api/ferrageamento/relatorio/resumo`; both dates required
    /// (`YYYY-MM-DD`).
    pub async fn relatorio_ferrageamento(
        &self,
        data_inicio: &str,
        data_fim: &str,
        animal_id: Option<i64>,
        tipo: Option<TipoFerrageamento>,
    ) -> Result<RelatorioFerrageamento, Error> {
        let params = compact_params(vec![
            ("data_inicio", Some(data_inicio.to_owned())),
            ("data_fim", Some(data_fim.to_owned())),
            ("animal_id", animal_id.map(|v| v.to_string())),
            ("tipo_registro", tipo.map(|t| t.to_string())),
        ]);
        self.get_with_params("/api/ferrageamento/relatorio/resumo", &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ferrador(nome: &str, total: i64) -> FerradorEstatisticas {
        FerradorEstatisticas {
            ferrador_nome: nome.to_owned(),
            total_atendimentos: total,
            custo_total: 0.0,
            ultima_atividade: None,
        }
    }

    #[test]
    fn farrier_search_matches_label_case_insensitively() {
        let all = [ferrador("João Silva", 12), ferrador("Pedro Costa", 3)];

        let found = filter_ferradores(&all, "joão");
        assert_eq!(
            found,
            vec![FerradorOption {
                value: "João Silva".into(),
                label: "João Silva (12 atendimentos)".into(),
            }]
        );

        // The count is part of the label.
        assert_eq!(filter_ferradores(&all, "(3 ")[0].value, "Pedro Costa");
        assert!(filter_ferradores(&all, "maria").is_empty());
    }

    #[test]
    fn blank_farrier_search_keeps_everyone() {
        let all = [ferrador("A", 1), ferrador("B", 2)];
        assert_eq!(filter_ferradores(&all, "  ").len(), 2);
    }
}
