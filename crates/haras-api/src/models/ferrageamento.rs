use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoFerrageamento {
    Ferrageamento,
    Casqueamento,
    FerrageamentoCorretivo,
    CasqueamentoTerapeutico,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoFerradura {
    Normal,
    Corretiva,
    Terapeutica,
    Especial,
}

/// Limb treated: front/hind, right/left, or all four.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MembroTratado {
    Ad,
    Ae,
    Pd,
    Pe,
    Todos,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCasco {
    Bom,
    Regular,
    Ruim,
    Problema,
}

/// A farriery (shoeing / hoof trimming) record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Ferrageamento {
    pub id: i64,
    pub id_animal: i64,
    pub tipo_ferrageamento: TipoFerrageamento,
    pub data_ocorrencia: Option<String>,
    pub descricao: Option<String>,
    pub tipo_ferradura: Option<TipoFerradura>,
    pub membro_tratado: Option<MembroTratado>,
    pub problema_detectado: Option<String>,
    pub tecnica_aplicada: Option<String>,
    pub ferrador_responsavel: Option<String>,
    pub status_casco: Option<StatusCasco>,
    pub proxima_avaliacao: Option<String>,
    pub custo: Option<f64>,
    pub observacoes: Option<String>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
    #[serde(rename = "dias_proxima_avaliacao")]
    pub dias_proxima_avaliacao: Option<i64>,
    #[serde(rename = "status_vencimento")]
    pub status_vencimento: Option<String>,
}

impl Resource for Ferrageamento {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "ferrageamento",
        label: "registros de ferrageamento",
        path: "/api/ferrageamento/",
        envelope: "ferrageamentos",
        default_rows: 50,
        default_sort: "DATA_OCORRENCIA",
        default_descending: true,
        date_fields: &["DATA_OCORRENCIA", "PROXIMA_AVALIACAO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// Quick farriery form; the backend fills in the date and schedules the
/// next evaluation from the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FerrageamentoRapido {
    pub id_animal: i64,
    pub tipo_ferrageamento: TipoFerrageamento,
    pub membro_tratado: MembroTratado,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ferrador_responsavel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_casco: Option<StatusCasco>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// An evaluation that is due or overdue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertaVencimentoFerrageamento {
    pub animal_id: i64,
    #[serde(default)]
    pub animal_nome: String,
    #[serde(default, alias = "tipo_registro")]
    pub tipo_ferrageamento: Option<String>,
    #[serde(default)]
    pub data_ultima: Option<String>,
    #[serde(default, alias = "data_vencimento")]
    pub proxima_avaliacao: Option<String>,
    #[serde(default)]
    pub dias_vencimento: i64,
    /// `VENCIDO`, `VENCE_SEMANA` or `VENCE_QUINZENA`.
    #[serde(default)]
    pub status_vencimento: Option<String>,
    #[serde(default)]
    pub ferrador_anterior: Option<String>,
    #[serde(default)]
    pub custo_estimado: Option<f64>,
}

/// Farm-wide farriery counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstatisticasFerrageamento {
    pub total_registros: i64,
    pub registros_mes_atual: i64,
    pub custo_total_mes: f64,
    pub ferradores_ativos: i64,
    pub proximas_avaliacoes: i64,
    pub animais_atrasados: i64,
    pub total_ferrageamento: i64,
    pub total_casqueamento: i64,
    pub total_corretivo: i64,
    pub total_terapeutico: i64,
}

/// Farriery history of one animal over the analysed period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstatisticaFerrageamentoAnimal {
    pub animal_id: i64,
    #[serde(default)]
    pub animal_nome: String,
    #[serde(default)]
    pub total_ferrageamentos: i64,
    #[serde(default)]
    pub total_casqueamentos: i64,
    #[serde(default)]
    pub custo_total: Option<f64>,
    #[serde(default)]
    pub ultimo_ferrageamento: Option<String>,
    #[serde(default)]
    pub ultimo_casqueamento: Option<String>,
    #[serde(default)]
    pub status_atual_casco: Option<StatusCasco>,
    #[serde(default)]
    pub ferrador_principal: Option<String>,
    #[serde(default)]
    pub proxima_data: Option<String>,
    /// `VENCIDO`, `VENCE_SEMANA`, `VENCE_QUINZENA`, `EM_DIA` or
    /// `SEM_AGENDAMENTO`.
    #[serde(default)]
    pub status_vencimento: Option<String>,
}

/// Activity of one farrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FerradorEstatisticas {
    pub ferrador_nome: String,
    #[serde(default)]
    pub total_atendimentos: i64,
    #[serde(default)]
    pub custo_total: f64,
    #[serde(default)]
    pub ultima_atividade: Option<String>,
}

/// Farrier selector entry; `value` is the farrier's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FerradorOption {
    pub value: String,
    pub label: String,
}

impl From<&FerradorEstatisticas> for FerradorOption {
    fn from(f: &FerradorEstatisticas) -> Self {
        Self {
            value: f.ferrador_nome.clone(),
            label: format!("{} ({} atendimentos)", f.ferrador_nome, f.total_atendimentos),
        }
    }
}

/// Farriery report over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatorioFerrageamento {
    pub periodo_inicio: Option<String>,
    pub periodo_fim: Option<String>,
    #[serde(default)]
    pub total_registros: i64,
    #[serde(default)]
    pub custo_total: Option<f64>,
    #[serde(default)]
    pub animais_atendidos: i64,
    #[serde(default)]
    pub ferradores_utilizados: i64,
    /// Record count per type code.
    #[serde(default)]
    pub tipos_mais_realizados: BTreeMap<String, i64>,
    #[serde(default)]
    pub problemas_mais_comuns: Vec<String>,
    #[serde(default)]
    pub registros: Vec<Ferrageamento>,
}
