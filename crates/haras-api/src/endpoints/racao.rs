// Feed endpoints: stock ledger, feeding plans, deliveries and reports.

use serde::Serialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    AjusteEstoque, AlertaEstoqueProduto, CalculoNutricional, CategoriaNutricional,
    ConsumoAnimalRacao, EntradaProduto, FornecimentoRacao, ItemPlanoAlimentar,
    MovimentacaoProduto, PlanoAlimentar, PrevisaoConsumoRacao, ProdutoRacaoOption, SaidaProduto,
    StatusPlano,
};
use crate::resource::Page;

use super::{StockMovementFilter, compact_params};

/// Filters of the feeding-plan listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanoFilter {
    pub animal_id: Option<i64>,
    pub categoria: Option<CategoriaNutricional>,
    pub status: Option<StatusPlano>,
    pub page: u32,
    pub limit: u32,
}

impl Default for PlanoFilter {
    fn default() -> Self {
        Self {
            animal_id: None,
            categoria: None,
            status: None,
            page: 1,
            limit: 20,
        }
    }
}

impl ApiClient {
    // ── Stock ───────────────────────────────────────────────────────

    /// `POST /api/racao/estoque/entrada`
    pub async fn entrada_racao(&self, entrada: &EntradaProduto) -> Result<MovimentacaoProduto, Error> {
        let mov: MovimentacaoProduto = self.post("/api/racao/estoque/entrada", entrada).await?;
        info!(
            produto = entrada.id_produto,
            quantidade = entrada.quantidade,
            "feed stock entry recorded"
        );
        Ok(mov)
    }

    /// `POST /api/racao/estoque/saida`; fails with 400 when the stock
    /// does not cover the quantity.
    pub async fn saida_racao(&self, saida: &SaidaProduto) -> Result<MovimentacaoProduto, Error> {
        let mov: MovimentacaoProduto = self.post("/api/racao/estoque/saida", saida).await?;
        info!(
            produto = saida.id_produto,
            quantidade = saida.quantidade,
            "feed stock exit recorded"
        );
        Ok(mov)
    }

    /// `POST /api/racao/estoque/ajuste`
    pub async fn ajuste_racao(&self, ajuste: &AjusteEstoque) -> Result<MovimentacaoProduto, Error> {
        let mov: MovimentacaoProduto = self.post("/api/racao/estoque/ajuste", ajuste).await?;
        info!(
            produto = ajuste.id_produto,
            quantidade = ajuste.quantidade_nova,
            "feed stock adjusted"
        );
        Ok(mov)
    }

    /// `GET /api/racao/estoque/movimentacoes`
    pub async fn movimentacoes_racao(
        &self,
        filtro: &StockMovementFilter,
    ) -> Result<Page<MovimentacaoProduto>, Error> {
        self.get_page(
            "/api/racao/estoque/movimentacoes",
            "movimentacoes",
            filtro.page,
            filtro.limit,
            vec![
                ("produto_id", filtro.produto_id.map(|v| v.to_string())),
                ("tipo_movimentacao", filtro.tipo.map(|t| t.to_string())),
                ("data_inicio", filtro.data_inicio.clone()),
                ("data_fim", filtro.data_fim.clone()),
            ],
        )
        .await
    }

    /// `GET /api/racao/produtos/search/autocomplete?q=`; at most 50 active
    /// products.
    pub async fn autocomplete_racao(&self, termo: &str) -> Result<Vec<ProdutoRacaoOption>, Error> {
        let params = [("q".to_owned(), termo.to_owned())];
        self.get_with_params("/api/racao/produtos/search/autocomplete", &params)
            .await
    }

    // ── Feeding plans ───────────────────────────────────────────────

    /// `GET /api/racao/planos`
    pub async fn planos_alimentares(
        &self,
        filtro: &PlanoFilter,
    ) -> Result<Page<PlanoAlimentar>, Error> {
        self.get_page(
            "/api/racao/planos",
            "planos",
            filtro.page,
            filtro.limit,
            vec![
                ("animal_id", filtro.animal_id.map(|v| v.to_string())),
                ("categoria", filtro.categoria.map(|c| c.to_string())),
                ("status_plano", filtro.status.map(|s| s.to_string())),
            ],
        )
        .await
    }

    /// `POST /api/racao/planos`
    pub async fn create_plano<B: Serialize + Sync>(&self, body: &B) -> Result<PlanoAlimentar, Error> {
        let plano: PlanoAlimentar = self.post("/api/racao/planos", body).await?;
        info!(id = plano.id, animal = plano.id_animal, "feeding plan created");
        Ok(plano)
    }

    /// `PUT /api/racao/planos/{id}`
    pub async fn update_plano<B: Serialize + Sync>(
        &self,
        plano_id: i64,
        body: &B,
    ) -> Result<PlanoAlimentar, Error> {
        self.put(&format!("/api/racao/planos/{plano_id}"), body)
            .await
    }

    /// `GET /api/racao/planos/{id}/itens`; active items only.
    pub async fn itens_plano(&self, plano_id: i64) -> Result<Vec<ItemPlanoAlimentar>, Error> {
        self.get(&format!("/api/racao/planos/{plano_id}/itens"))
            .await
    }

    /// `POST /api/racao/planos/{id}/itens`; the body carries `ID_PLANO` too.
    pub async fn add_item_plano<B: Serialize + Sync>(
        &self,
        plano_id: i64,
        body: &B,
    ) -> Result<ItemPlanoAlimentar, Error> {
        self.post(&format!("/api/racao/planos/{plano_id}/itens"), body)
            .await
    }

    /// `PUT /api/racao/planos/itens/{id}`
    pub async fn update_item_plano<B: Serialize + Sync>(
        &self,
        item_id: i64,
        body: &B,
    ) -> Result<ItemPlanoAlimentar, Error> {
        self.put(&format!("/api/racao/planos/itens/{item_id}"), body)
            .await
    }

    /// `DELETE /api/racao/planos/itens/{id}`; the item is deactivated.
    pub async fn remove_item_plano(&self, item_id: i64) -> Result<(), Error> {
        self.delete(&format!("/api/racao/planos/itens/{item_id}"))
            .await?;
        info!(id = item_id, "feeding plan item removed");
        Ok(())
    }

    // ── Deliveries ──────────────────────────────────────────────────

    /// `POST /api/racao/fornecimento`; debits the product's stock.
    pub async fn registrar_fornecimento<B: Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<FornecimentoRacao, Error> {
        let f: FornecimentoRacao = self.post("/api/racao/fornecimento", body).await?;
        info!(
            id = f.id,
            animal = f.id_animal,
            quantidade = f.quantidade_fornecida,
            "feed delivery recorded"
        );
        Ok(f)
    }

    /// `PUT /api/racao/fornecimento/{id}`
    pub async fn update_fornecimento<B: Serialize + Sync>(
        &self,
        fornecimento_id: i64,
        body: &B,
    ) -> Result<FornecimentoRacao, Error> {
        self.put(&format!("/api/racao/fornecimento/{fornecimento_id}"), body)
            .await
    }

    // ── Nutrition and reports ───────────────────────────────────────

    /// `GET /api/racao/calculo-nutricional/{animal_id}?categoria=`; based on
    /// the animal's latest recorded weight.
    pub async fn calculo_nutricional(
        &self,
        animal_id: i64,
        categoria: CategoriaNutricional,
    ) -> Result<CalculoNutricional, Error> {
        let params = [("categoria".to_owned(), categoria.to_string())];
        self.get_with_params(&format!("/api/racao/calculo-nutricional/{animal_id}"), &params)
            .await
    }

    /// `GET /api/racao/relatorios/consumo-animal`
    pub async fn consumo_racao_animal(
        &self,
        animal_id: Option<i64>,
        data_inicio: Option<String>,
        data_fim: Option<String>,
    ) -> Result<Vec<ConsumoAnimalRacao>, Error> {
        let params = compact_params(vec![
            ("animal_id", animal_id.map(|v| v.to_string())),
            ("data_inicio", data_inicio),
            ("data_fim", data_fim),
        ]);
        self.get_with_params("/api/racao/relatorios/consumo-animal", &params)
            .await
    }

    /// `GET /api/racao/relatorios/previsao-consumo`
    pub async fn previsao_consumo_racao(&self) -> Result<Vec<PrevisaoConsumoRacao>, Error> {
        self.get("/api/racao/relatorios/previsao-consumo").await
    }

    /// `GET /api/racao/relatorios/estoque-baixo`
    pub async fn estoque_baixo_racao(&self) -> Result<Vec<AlertaEstoqueProduto>, Error> {
        self.get("/api/racao/relatorios/estoque-baixo").await
    }
}
