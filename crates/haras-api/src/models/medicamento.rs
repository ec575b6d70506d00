use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FormaFarmaceutica {
    Injetavel,
    Oral,
    Topico,
}

/// Stock movement kind, shared by the medicine, feed and field-input ledgers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoMovimentacaoEstoque {
    Entrada,
    Saida,
    Ajuste,
}

/// Stock health of an inventory item. Union of the values used by the
/// medicine, feed and field-input endpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusEstoque {
    Ok,
    EstoqueBaixo,
    SemEstoque,
    Vencendo,
    VencimentoProximo,
    Vencido,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Medicamento {
    pub id: i64,
    pub nome: String,
    pub principio_ativo: Option<String>,
    pub concentracao: Option<String>,
    pub forma_farmaceutica: Option<FormaFarmaceutica>,
    pub fabricante: Option<String>,
    pub registro_mapa: Option<String>,
    #[serde(default)]
    pub estoque_atual: f64,
    #[serde(default)]
    pub estoque_minimo: f64,
    #[serde(default)]
    pub unidade_medida: String,
    pub lote_atual: Option<String>,
    pub data_validade: Option<String>,
    pub data_fabricacao: Option<String>,
    pub preco_unitario: Option<f64>,
    pub fornecedor: Option<String>,
    pub requer_receita: Option<String>,
    pub periodo_carencia: Option<i64>,
    pub observacoes: Option<String>,
    pub ativo: Option<String>,
    pub id_usuario_cadastro: Option<i64>,
    pub data_cadastro: Option<String>,
    #[serde(rename = "status_estoque")]
    pub status_estoque: Option<StatusEstoque>,
    #[serde(rename = "dias_vencimento")]
    pub dias_vencimento: Option<i64>,
    #[serde(rename = "valor_estoque")]
    pub valor_estoque: Option<f64>,
}

impl Medicamento {
    pub fn is_active(&self) -> bool {
        self.ativo.as_deref() != Some("N")
    }
}

impl Resource for Medicamento {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "medicamentos",
        label: "medicamentos",
        path: "/api/medicamentos",
        envelope: "medicamentos",
        default_rows: 10,
        default_sort: "NOME",
        default_descending: false,
        date_fields: &["DATA_VALIDADE", "DATA_FABRICACAO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// Autocomplete entry for medicines with stock on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicamentoOption {
    pub value: i64,
    pub label: String,
    pub estoque: f64,
    pub unidade: String,
    pub forma: Option<FormaFarmaceutica>,
    pub carencia: Option<i64>,
}

/// Stock-entry form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EntradaEstoque {
    pub id_medicamento: i64,
    pub quantidade: f64,
    pub lote: String,
    pub data_validade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fabricacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota_fiscal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fornecedor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preco_unitario: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntradaEstoqueResult {
    pub message: String,
    pub movimentacao_id: i64,
    pub estoque_atual: Option<f64>,
}

/// Row of the low-stock / expiring report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstoqueBaixo {
    pub medicamento_id: i64,
    pub nome: String,
    pub estoque_atual: f64,
    pub estoque_minimo: f64,
    pub unidade_medida: String,
    pub status_alerta: StatusEstoque,
    pub dias_vencimento: Option<i64>,
}

/// Administration of a medicine to an animal; writes a health record and
/// debits the stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AplicacaoMedicamento {
    pub id_medicamento: i64,
    pub id_animal: i64,
    pub quantidade_aplicada: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veterinario_responsavel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AplicacaoMedicamentoResult {
    pub message: String,
    #[serde(default)]
    pub saude_id: Option<i64>,
}

/// One row of the medicine stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MovimentacaoMedicamento {
    pub id: i64,
    pub id_medicamento: i64,
    pub tipo_movimentacao: TipoMovimentacaoEstoque,
    pub quantidade: f64,
    pub id_animal: Option<i64>,
    pub id_saude_animal: Option<i64>,
    pub nota_fiscal: Option<String>,
    pub fornecedor: Option<String>,
    pub preco_unitario: Option<f64>,
    pub lote: Option<String>,
    pub data_validade: Option<String>,
    pub motivo: Option<String>,
    pub observacoes: Option<String>,
    pub quantidade_anterior: Option<f64>,
    pub quantidade_atual: Option<f64>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "medicamento_nome")]
    pub medicamento_nome: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
}

/// Medicines given to one animal, per medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumoMedicamentoAnimal {
    pub animal_id: i64,
    pub animal_nome: String,
    pub medicamento_nome: String,
    pub total_aplicado: f64,
    pub unidade_medida: String,
    pub numero_aplicacoes: i64,
    pub ultima_aplicacao: Option<String>,
    pub custo_total: Option<f64>,
}

/// Days of stock left at the average monthly consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevisaoConsumoMedicamento {
    pub medicamento_id: i64,
    pub medicamento_nome: String,
    pub consumo_mensal_medio: f64,
    pub estoque_atual: f64,
    pub dias_restantes: i64,
    pub data_prevista_fim: Option<String>,
    pub recomendacao: String,
}

/// Entries, exits and balance of one medicine over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovimentacaoPeriodoMedicamento {
    pub medicamento_id: i64,
    pub medicamento_nome: String,
    pub total_entradas: f64,
    pub total_saidas: f64,
    pub saldo_atual: f64,
    pub valor_total: f64,
    pub ultima_movimentacao: Option<String>,
}
