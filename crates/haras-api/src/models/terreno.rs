use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::resource::{Resource, ResourceSpec};

/// Occupation state of a paddock. The backend stores it as free text, so
/// [`Terreno::status`] parses leniently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum StatusTerreno {
    #[strum(serialize = "DISPONIVEL")]
    Disponivel,
    #[strum(serialize = "OCUPADO")]
    Ocupado,
    #[strum(to_string = "MANUTENÇÃO", serialize = "MANUTENCAO")]
    Manutencao,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Terreno {
    pub id: i64,
    pub nome: String,
    pub area_hectares: Option<f64>,
    pub tipo_solo: Option<String>,
    pub topografia: Option<String>,
    pub tipo_pastagem: Option<String>,
    pub capacidade_animais: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub status_terreno: String,
    pub observacoes: Option<String>,
    pub id_usuario_cadastro: Option<i64>,
    pub data_cadastro: Option<String>,
}

impl Terreno {
    pub fn status(&self) -> Option<StatusTerreno> {
        self.status_terreno.parse().ok()
    }
}

impl Resource for Terreno {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "terrenos",
        label: "terrenos",
        path: "/api/terrenos",
        envelope: "terrenos",
        default_rows: 10,
        default_sort: "ID",
        default_descending: false,
        date_fields: &[],
    };

    fn id(&self) -> i64 {
        self.id
    }
}
