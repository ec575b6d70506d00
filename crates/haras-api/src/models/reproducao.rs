use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoCobertura {
    Natural,
    Ia,
    Te,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultadoDiagnostico {
    Positivo,
    Negativo,
    #[default]
    Pendente,
}

/// Lifecycle of a covering. Stored as a single letter.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum StatusReproducao {
    #[default]
    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Ativo,
    #[serde(rename = "C")]
    #[strum(serialize = "C")]
    Concluido,
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Falhado,
}

/// A covering of a mare and its follow-up (diagnosis, foaling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Reproducao {
    pub id: i64,
    pub id_egua: i64,
    pub id_parceiro: Option<i64>,
    pub tipo_cobertura: TipoCobertura,
    pub data_cobertura: Option<String>,
    pub data_diagnostico: Option<String>,
    #[serde(default)]
    pub resultado_diagnostico: ResultadoDiagnostico,
    pub data_parto_prevista: Option<String>,
    pub data_parto_real: Option<String>,
    pub observacoes: Option<String>,
    #[serde(default)]
    pub status_reproducao: StatusReproducao,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "egua_nome")]
    pub egua_nome: Option<String>,
    #[serde(rename = "parceiro_nome")]
    pub parceiro_nome: Option<String>,
    #[serde(rename = "dias_gestacao")]
    pub dias_gestacao: Option<i64>,
}

impl Resource for Reproducao {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "reproducao",
        label: "registros de reprodução",
        path: "/api/reproducao",
        envelope: "reproducoes",
        default_rows: 10,
        default_sort: "DATA_COBERTURA",
        default_descending: true,
        date_fields: &[
            "DATA_COBERTURA",
            "DATA_DIAGNOSTICO",
            "DATA_PARTO_PREVISTA",
            "DATA_PARTO_REAL",
        ],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstatisticasReproducao {
    pub total_coberturas: u64,
    pub coberturas_positivas: u64,
    pub coberturas_negativas: u64,
    pub coberturas_pendentes: u64,
    pub taxa_sucesso: f64,
    pub partos_realizados: u64,
    pub gestacoes_ativas: u64,
}

/// Upcoming reproduction event (diagnosis or expected foaling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventoReproducao {
    pub egua_id: i64,
    pub egua_nome: String,
    #[serde(default)]
    pub evento_tipo: String,
    pub data_evento: String,
    pub dias_restantes: i64,
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricoEgua {
    pub reproducoes: Vec<Reproducao>,
    pub total_coberturas: u64,
    pub partos_realizados: u64,
    pub taxa_sucesso: f64,
}
