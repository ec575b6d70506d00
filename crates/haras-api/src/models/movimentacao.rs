use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoMovimentacao {
    Transferencia,
    Entrada,
    Saida,
    Venda,
    Emprestimo,
    Retorno,
}

/// A movement of an animal between paddocks or to/from outside the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Movimentacao {
    pub id: i64,
    pub id_animal: i64,
    pub tipo_movimentacao: TipoMovimentacao,
    pub data_movimentacao: Option<String>,
    pub id_terreno_origem: Option<i64>,
    pub id_terreno_destino: Option<i64>,
    pub origem_externa: Option<String>,
    pub destino_externo: Option<String>,
    pub motivo: Option<String>,
    pub observacoes: Option<String>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
    #[serde(rename = "terreno_origem_nome")]
    pub terreno_origem_nome: Option<String>,
    #[serde(rename = "terreno_destino_nome")]
    pub terreno_destino_nome: Option<String>,
}

impl Resource for Movimentacao {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "movimentacoes",
        label: "movimentações",
        path: "/api/movimentacoes",
        envelope: "movimentacoes",
        default_rows: 10,
        default_sort: "DATA_MOVIMENTACAO",
        default_descending: true,
        date_fields: &["DATA_MOVIMENTACAO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// Where an animal currently is, per its latest movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizacaoAtual {
    pub animal_id: i64,
    pub animal_nome: String,
    pub terreno_atual: Option<String>,
    pub local_externo: Option<String>,
    pub data_ultima_movimentacao: Option<String>,
    pub tipo_ultima_movimentacao: Option<String>,
    /// `terreno` or `externo`.
    pub localizacao_tipo: Option<String>,
    pub localizacao: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricoMovimentacao {
    pub movimentacoes: Vec<Movimentacao>,
    pub localizacao_atual: String,
}
