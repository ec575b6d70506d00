use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::medicamento::StatusEstoque;
use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoProdutoManejo {
    Fertilizante,
    Defensivo,
    Corretivo,
    Semente,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoManejo {
    Adubacao,
    Calagem,
    Plantio,
    AplicacaoDefensivo,
    Gessagem,
    Sulcagem,
}

/// A field input (fertilizer, pesticide, lime, seed) kept in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ProdutoManejo {
    pub id: i64,
    pub nome: String,
    pub tipo_produto: TipoProdutoManejo,
    pub principio_ativo: Option<String>,
    pub concentracao: Option<String>,
    #[serde(default)]
    pub unidade_medida: String,
    pub fabricante: Option<String>,
    pub registro_ministerio: Option<String>,
    #[serde(default)]
    pub estoque_atual: f64,
    #[serde(default)]
    pub estoque_minimo: f64,
    pub estoque_maximo: Option<f64>,
    pub preco_unitario: Option<f64>,
    pub fornecedor_principal: Option<String>,
    pub codigo_fornecedor: Option<String>,
    pub lote_atual: Option<String>,
    pub data_validade: Option<String>,
    pub data_ultima_compra: Option<String>,
    pub dose_recomendada: Option<f64>,
    pub periodo_carencia: Option<i64>,
    pub requer_receituario: Option<String>,
    pub local_armazenamento: Option<String>,
    pub condicoes_armazenamento: Option<String>,
    pub observacoes: Option<String>,
    pub ativo: Option<String>,
    pub id_usuario_cadastro: Option<i64>,
    pub data_cadastro: Option<String>,
    #[serde(rename = "status_estoque")]
    pub status_estoque: Option<StatusEstoque>,
    #[serde(rename = "dias_vencimento")]
    pub dias_vencimento: Option<i64>,
    #[serde(rename = "valor_total_estoque")]
    pub valor_total_estoque: Option<f64>,
}

impl Resource for ProdutoManejo {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "manejo",
        label: "produtos de manejo",
        path: "/api/manejo/produtos",
        envelope: "produtos",
        default_rows: 10,
        default_sort: "NOME",
        default_descending: false,
        date_fields: &["DATA_VALIDADE", "DATA_ULTIMA_COMPRA"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// Application of a field input on a paddock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AplicacaoManejo {
    pub id: i64,
    pub id_terreno: i64,
    pub id_produto: i64,
    pub tipo_manejo: TipoManejo,
    pub data_aplicacao: Option<String>,
    pub quantidade: f64,
    #[serde(default)]
    pub unidade_medida: String,
    pub dose_hectare: Option<f64>,
    pub area_aplicada: Option<f64>,
    pub custo_produto: Option<f64>,
    pub custo_aplicacao: Option<f64>,
    pub custo_total: Option<f64>,
    pub equipamento_utilizado: Option<String>,
    pub condicoes_climaticas: Option<String>,
    pub periodo_carencia: Option<i64>,
    pub data_liberacao: Option<String>,
    pub observacoes: Option<String>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "terreno_nome")]
    pub terreno_nome: Option<String>,
    #[serde(rename = "produto_nome")]
    pub produto_nome: Option<String>,
    #[serde(rename = "produto_tipo")]
    pub produto_tipo: Option<String>,
}

impl Resource for AplicacaoManejo {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "aplicacoes",
        label: "aplicações de manejo",
        path: "/api/manejo/aplicacoes",
        envelope: "aplicacoes",
        default_rows: 10,
        default_sort: "DATA_APLICACAO",
        default_descending: true,
        date_fields: &["DATA_APLICACAO", "DATA_LIBERACAO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// Soil analysis of a paddock, optionally with the lab report attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AnaliseSolo {
    pub id: i64,
    pub id_terreno: i64,
    pub data_coleta: Option<String>,
    pub data_resultado: Option<String>,
    pub laboratorio: Option<String>,
    pub ph_agua: Option<f64>,
    pub ph_cacl2: Option<f64>,
    pub materia_organica: Option<f64>,
    pub fosforo: Option<f64>,
    pub potassio: Option<f64>,
    pub calcio: Option<f64>,
    pub magnesio: Option<f64>,
    pub aluminio: Option<f64>,
    pub h_al: Option<f64>,
    pub ctc: Option<f64>,
    pub saturacao_bases: Option<f64>,
    pub saturacao_aluminio: Option<f64>,
    pub enxofre: Option<f64>,
    pub boro: Option<f64>,
    pub cobre: Option<f64>,
    pub ferro: Option<f64>,
    pub manganes: Option<f64>,
    pub zinco: Option<f64>,
    pub observacoes: Option<String>,
    pub recomendacoes: Option<String>,
    pub arquivo_laudo: Option<String>,
    pub id_usuario_cadastro: Option<i64>,
    pub data_cadastro: Option<String>,
    #[serde(rename = "terreno_nome")]
    pub terreno_nome: Option<String>,
}

impl AnaliseSolo {
    pub fn has_laudo(&self) -> bool {
        self.arquivo_laudo.as_deref().is_some_and(|a| !a.is_empty())
    }
}

impl Resource for AnaliseSolo {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "analises",
        label: "análises de solo",
        path: "/api/manejo/analises-solo",
        envelope: "analises",
        default_rows: 10,
        default_sort: "DATA_COLETA",
        default_descending: true,
        date_fields: &["DATA_COLETA", "DATA_RESULTADO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// Reply to a lab-report upload; `arquivo` is the stored file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaudoUpload {
    pub message: String,
    pub arquivo: String,
}

/// Per-product totals of the field-input stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumoEstoqueManejo {
    pub produto_id: i64,
    pub produto_nome: String,
    pub tipo_produto: TipoProdutoManejo,
    pub estoque_atual: f64,
    pub estoque_minimo: f64,
    pub unidade_medida: String,
    pub total_entradas: f64,
    pub total_saidas: f64,
    pub valor_entradas: f64,
    pub ultima_movimentacao: Option<String>,
}

/// Field inputs applied per paddock and product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumoTerreno {
    pub terreno_id: i64,
    pub terreno_nome: String,
    pub produto_nome: String,
    pub tipo_manejo: String,
    pub total_aplicado: f64,
    pub unidade_medida: String,
    pub numero_aplicacoes: i64,
    pub ultima_aplicacao: Option<String>,
    pub custo_total: Option<f64>,
}

/// Days of stock left at the average monthly consumption.
/// `recomendacao` is `COMPRAR_URGENTE`, `COMPRAR_BREVE` or `OK`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevisaoConsumoManejo {
    pub produto_id: i64,
    pub produto_nome: String,
    pub consumo_mensal_medio: f64,
    pub estoque_atual: f64,
    pub dias_restantes: i64,
    pub data_prevista_fim: Option<String>,
    pub recomendacao: String,
}

/// A paddock whose withdrawal period ends soon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiberacaoTerreno {
    pub terreno_id: i64,
    pub terreno_nome: String,
    pub produto_nome: String,
    #[serde(default)]
    pub tipo_manejo: Option<String>,
    pub data_aplicacao: Option<String>,
    pub data_liberacao: Option<String>,
    #[serde(default)]
    pub dias_para_liberacao: i64,
}
