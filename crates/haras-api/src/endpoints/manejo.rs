// Field-input endpoints: stock ledger, soil-analysis reports, paddock
// reports.

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{ApiClient, Download};
use crate::error::Error;
use crate::models::{
    AjusteEstoque, AlertaEstoqueProduto, ConsumoTerreno, EntradaProduto, LaudoUpload,
    LiberacaoTerreno, MovimentacaoProduto, PrevisaoConsumoManejo, ResumoEstoqueManejo,
    SaidaProduto, TipoProdutoManejo,
};
use crate::resource::Page;

use super::{StockMovementFilter, compact_params};

/// Content type of an accepted lab report (PDF or image), by extension.
/// `None` means the backend will refuse the file.
pub fn laudo_content_type(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// File name used when a report download carries no `Content-Disposition`.
pub fn default_laudo_filename(analise_id: i64) -> String {
    format!("laudo_analise_{analise_id}.pdf")
}

#[derive(serde::Deserialize)]
struct Liberacoes {
    #[serde(default)]
    liberacoes: Vec<LiberacaoTerreno>,
}

impl ApiClient {
    // ── Stock ───────────────────────────────────────────────────────

    /// `POST /api/manejo/estoque/entrada`
    pub async fn entrada_manejo(&self, entrada: &EntradaProduto) -> Result<MovimentacaoProduto, Error> {
        let mov: MovimentacaoProduto = self.post("/api/manejo/estoque/entrada", entrada).await?;
        info!(
            produto = entrada.id_produto,
            quantidade = entrada.quantidade,
            "field input stock entry recorded"
        );
        Ok(mov)
    }

    /// `POST /api/manejo/estoque/saida`
    pub async fn saida_manejo(&self, saida: &SaidaProduto) -> Result<MovimentacaoProduto, Error> {
        let mov: MovimentacaoProduto = self.post("/api/manejo/estoque/saida", saida).await?;
        info!(
            produto = saida.id_produto,
            quantidade = saida.quantidade,
            "field input stock exit recorded"
        );
        Ok(mov)
    }

    /// `POST /api/manejo/estoque/ajuste`
    pub async fn ajuste_manejo(&self, ajuste: &AjusteEstoque) -> Result<MovimentacaoProduto, Error> {
        let mov: MovimentacaoProduto = self.post("/api/manejo/estoque/ajuste", ajuste).await?;
        info!(
            produto = ajuste.id_produto,
            quantidade = ajuste.quantidade_nova,
            "field input stock adjusted"
        );
        Ok(mov)
    }

    /// `GET /api/manejo/estoque/movimentacoes`
    pub async fn movimentacoes_manejo(
        &self,
        filtro: &StockMovementFilter,
    ) -> Result<Page<MovimentacaoProduto>, Error> {
        self.get_page(
            "/api/manejo/estoque/movimentacoes",
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

    /// `GET /api/manejo/estoque/alertas`
    pub async fn alertas_estoque_manejo(&self) -> Result<Vec<AlertaEstoqueProduto>, Error> {
        self.get("/api/manejo/estoque/alertas").await
    }

    /// `GET /api/manejo/estoque/resumo?tipo_produto=`
    pub async fn resumo_estoque_manejo(
        &self,
        tipo: Option<TipoProdutoManejo>,
    ) -> Result<Vec<ResumoEstoqueManejo>, Error> {
        let params = compact_params(vec![("tipo_produto", tipo.map(|t| t.to_string()))]);
        self.get_with_params("/api/manejo/estoque/resumo", &params)
            .await
    }

    // ── Soil-analysis reports ───────────────────────────────────────

    /// `POST /api/manejo/analises-solo/{id}/upload-laudo` as multipart
    /// field `file`. PDF, JPEG and PNG only.
    pub async fn upload_laudo(
        &self,
        analise_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<LaudoUpload, Error> {
        let mime = laudo_content_type(filename);
        let form = || {
            let part = Part::bytes(bytes.clone()).file_name(filename.to_owned());
            let part = match mime {
                Some(m) => part
                    .mime_str(m)
                    .unwrap_or_else(|_| Part::bytes(bytes.clone()).file_name(filename.to_owned())),
                None => part,
            };
            Form::new().part("file", part)
        };
        debug!(analise_id, filename, size = bytes.len(), "uploading soil report");
        let uploaded: LaudoUpload = self
            .post_multipart(
                &format!("/api/manejo/analises-solo/{analise_id}/upload-laudo"),
                form,
            )
            .await?;
        info!(analise_id, arquivo = %uploaded.arquivo, "soil report attached");
        Ok(uploaded)
    }

    /// `GET /api/manejo/analises-solo/{id}/download-laudo`. The file name
    /// falls back to `laudo_analise_{id}.pdf`.
    pub async fn download_laudo(&self, analise_id: i64) -> Result<Download, Error> {
        let mut file = self
            .get_bytes(&format!("/api/manejo/analises-solo/{analise_id}/download-laudo"))
            .await?;
        if file.filename.is_none() {
            file.filename = Some(default_laudo_filename(analise_id));
        }
        Ok(file)
    }

    /// `GET /api/manejo/analises-solo/{id}/laudo-info`; passed through as
    /// the server sends it.
    pub async fn laudo_info(&self, analise_id: i64) -> Result<Value, Error> {
        self.get(&format!("/api/manejo/analises-solo/{analise_id}/laudo-info"))
            .await
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// `GET /api/manejo/relatorios/consumo-terreno`
    pub async fn consumo_terreno(
        &self,
        terreno_id: Option<i64>,
        tipo: Option<TipoProdutoManejo>,
        data_inicio: Option<String>,
        data_fim: Option<String>,
    ) -> Result<Vec<ConsumoTerreno>, Error> {
        let params = compact_params(vec![
            ("terreno_id", terreno_id.map(|v| v.to_string())),
            ("tipo_produto", tipo.map(|t| t.to_string())),
            ("data_inicio", data_inicio),
            ("data_fim", data_fim),
        ]);
        self.get_with_params("/api/manejo/relatorios/consumo-terreno", &params)
            .await
    }

    /// `GET /api/manejo/relatorios/previsao-consumo?tipo_produto=`
    pub async fn previsao_consumo_manejo(
        &self,
        tipo: Option<TipoProdutoManejo>,
    ) -> Result<Vec<PrevisaoConsumoManejo>, Error> {
        let params = compact_params(vec![("tipo_produto", tipo.map(|t| t.to_string()))]);
        self.get_with_params("/api/manejo/relatorios/previsao-consumo", &params)
            .await
    }

    /// `GET /api/manejo/relatorios/terrenos-liberacao?dias_futuro=N`;
    /// paddocks whose withdrawal period ends within `dias` (1..=365) days.
    pub async fn terrenos_liberacao(&self, dias: u32) -> Result<Vec<LiberacaoTerreno>, Error> {
        let params = [("dias_futuro".to_owned(), dias.clamp(1, 365).to_string())];
        let body: Liberacoes = self
            .get_with_params("/api/manejo/relatorios/terrenos-liberacao", &params)
            .await?;
        Ok(body.liberacoes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laudo_content_type_by_extension() {
        assert_eq!(laudo_content_type("Laudo.PDF"), Some("application/pdf"));
        assert_eq!(laudo_content_type("foto.jpeg"), Some("image/jpeg"));
        assert_eq!(laudo_content_type("scan.png"), Some("image/png"));
        assert_eq!(laudo_content_type("planilha.xlsx"), None);
        assert_eq!(laudo_content_type("sem_extensao"), None);
    }

    #[test]
    fn default_laudo_filename_uses_analysis_id() {
        assert_eq!(default_laudo_filename(7), "laudo_analise_7.pdf");
    }
}
