// Medicine stock endpoints.

use tracing::info;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    AplicacaoMedicamento, AplicacaoMedicamentoResult, ConsumoMedicamentoAnimal, EntradaEstoque,
    EntradaEstoqueResult, EstoqueBaixo, MedicamentoOption, MovimentacaoMedicamento,
    MovimentacaoPeriodoMedicamento, PrevisaoConsumoMedicamento,
};
use crate::resource::Page;

use super::{StockMovementFilter, compact_params};

impl ApiClient {
    /// `GET /api/medicamentos/autocomplete?termo=&limit=`; only medicines
    /// with stock on hand.
    pub async fn autocomplete_medicamentos(
        &self,
        termo: &str,
        limit: u32,
    ) -> Result<Vec<MedicamentoOption>, Error> {
        let params = [
            ("termo".to_owned(), termo.to_owned()),
            ("limit".to_owned(), limit.clamp(1, 50).to_string()),
        ];
        self.get_with_params("/api/medicamentos/autocomplete", &params)
            .await
    }

    /// `POST /api/medicamentos/entrada-estoque`
    pub async fn entrada_estoque(
        &self,
        entrada: &EntradaEstoque,
    ) -> Result<EntradaEstoqueResult, Error> {
        let result: EntradaEstoqueResult = self
            .post("/api/medicamentos/entrada-estoque", entrada)
            .await?;
        info!(
            medicamento = entrada.id_medicamento,
            quantidade = entrada.quantidade,
            "stock entry recorded"
        );
        Ok(result)
    }

    /// `GET /api/medicamentos/relatorio/estoque-baixo?dias_vencimento=N`
    pub async fn estoque_baixo(&self, dias_vencimento: u32) -> Result<Vec<EstoqueBaixo>, Error> {
        let params = [("dias_vencimento".to_owned(), dias_vencimento.to_string())];
        self.get_with_params("/api/medicamentos/relatorio/estoque-baixo", &params)
            .await
    }

    /// `POST /api/medicamentos/aplicar-medicamento`; writes a health record
    /// and debits the stock. A 400 means the stock does not cover the dose.
    pub async fn aplicar_medicamento(
        &self,
        aplicacao: &AplicacaoMedicamento,
    ) -> Result<AplicacaoMedicamentoResult, Error> {
        let result: AplicacaoMedicamentoResult = self
            .post("/api/medicamentos/aplicar-medicamento", aplicacao)
            .await?;
        info!(
            medicamento = aplicacao.id_medicamento,
            animal = aplicacao.id_animal,
            quantidade = aplicacao.quantidade_aplicada,
            "medicine applied"
        );
        Ok(result)
    }

    /// `GET /api/medicamentos/movimentacoes/lista`
    pub async fn movimentacoes_medicamento(
        &self,
        filtro: &StockMovementFilter,
    ) -> Result<Page<MovimentacaoMedicamento>, Error> {
        self.get_page(
            "/api/medicamentos/movimentacoes/lista",
            "movimentacoes",
            filtro.page,
            filtro.limit,
            vec![
                ("medicamento_id", filtro.produto_id.map(|v| v.to_string())),
                ("animal_id", filtro.animal_id.map(|v| v.to_string())),
                ("tipo", filtro.tipo.map(|t| t.to_string())),
                ("data_inicio", filtro.data_inicio.clone()),
                ("data_fim", filtro.data_fim.clone()),
            ],
        )
        .await
    }

    /// `GET /api/medicamentos/relatorio/consumo-animal/{animal_id}`
    pub async fn consumo_medicamento_animal(
        &self,
        animal_id: i64,
        data_inicio: Option<String>,
        data_fim: Option<String>,
    ) -> Result<Vec<ConsumoMedicamentoAnimal>, Error> {
        let params = compact_params(vec![("data_inicio", data_inicio), ("data_fim", data_fim)]);
        self.get_with_params(
            &format!("/api/medicamentos/relatorio/consumo-animal/{animal_id}"),
            &params,
        )
        .await
    }

    /// `GET /api/medicamentos/relatorio/previsao-consumo?dias_analise=N`
    pub async fn previsao_consumo_medicamento(
        &self,
        dias_analise: u32,
    ) -> Result<Vec<PrevisaoConsumoMedicamento>, Error> {
        let params = [("dias_analise".to_owned(), dias_analise.to_string())];
        self.get_with_params("/api/medicamentos/relatorio/previsao-consumo", &params)
            .await
    }

    /// `GET /api/medicamentos/relatorio/movimentacao-periodo`
    pub async fn movimentacao_periodo_medicamento(
        &self,
        data_inicio: Option<String>,
        data_fim: Option<String>,
    ) -> Result<Vec<MovimentacaoPeriodoMedicamento>, Error> {
        let params = compact_params(vec![("data_inicio", data_inicio), ("data_fim", data_fim)]);
        self.get_with_params("/api/medicamentos/relatorio/movimentacao-periodo", &params)
            .await
    }
}
