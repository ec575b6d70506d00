use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoRegistro {
    Vacina,
    Vermifugo,
    Medicamento,
    Exame,
    Consulta,
    Cirurgia,
    Tratamento,
}

/// A health event (vaccine, deworming, exam, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Saude {
    pub id: i64,
    pub id_animal: i64,
    pub tipo_registro: TipoRegistro,
    pub data_ocorrencia: Option<String>,
    pub descricao: Option<String>,
    pub veterinario_responsavel: Option<String>,
    pub medicamento_aplicado: Option<String>,
    pub dose_aplicada: Option<String>,
    pub proxima_aplicacao: Option<String>,
    pub custo: Option<f64>,
    pub observacoes: Option<String>,
    pub id_medicamento: Option<i64>,
    pub quantidade_aplicada: Option<f64>,
    pub unidade_aplicada: Option<String>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
    #[serde(rename = "medicamento_nome")]
    pub medicamento_nome: Option<String>,
    #[serde(rename = "estoque_suficiente")]
    pub estoque_suficiente: Option<bool>,
    #[serde(rename = "dias_proxima_aplicacao")]
    pub dias_proxima_aplicacao: Option<i64>,
    /// `APLICADO`, `PENDENTE` or `ATRASADO`; absent means applied.
    #[serde(rename = "status_aplicacao")]
    pub status_aplicacao: Option<String>,
}

impl Resource for Saude {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "saude",
        label: "registros de saúde",
        path: "/api/saude/",
        envelope: "registros",
        default_rows: 50,
        default_sort: "DATA_OCORRENCIA",
        default_descending: true,
        date_fields: &["DATA_OCORRENCIA", "PROXIMA_APLICACAO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// A scheduled application falling due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximaAplicacao {
    pub animal_id: i64,
    pub animal_nome: String,
    pub tipo_registro: String,
    #[serde(alias = "proxima_aplicacao")]
    pub data_aplicacao: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    /// Days until due; negative when overdue.
    #[serde(alias = "dias_vencimento")]
    pub dias_restantes: i64,
    #[serde(default)]
    pub medicamento_nome: Option<String>,
    #[serde(default)]
    pub veterinario_responsavel: Option<String>,
}

/// Quick application form: record a treatment and debit stock in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AplicacaoRapida {
    pub id_animal: i64,
    pub tipo_registro: TipoRegistro,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_medicamento: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantidade_aplicada: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicamento_aplicado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_aplicada: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veterinario_responsavel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Farm-wide health counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstatisticasSaude {
    pub total_registros: u64,
    pub registros_mes_atual: u64,
    pub custo_total_mes: f64,
    pub proximas_aplicacoes: u64,
    pub animais_em_tratamento: u64,
    pub total_vacinas: u64,
    pub total_vermifugos: u64,
    pub total_medicamentos: u64,
    pub total_exames: u64,
    pub total_consultas: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricoSaude {
    pub animal_id: i64,
    pub animal_nome: String,
    #[serde(default)]
    pub registros: Vec<Saude>,
    #[serde(default)]
    pub resumo_tipos: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub periodo_analise: String,
    pub total_custo: Option<f64>,
}
