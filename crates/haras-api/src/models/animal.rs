use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Sexo {
    M,
    F,
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
pub enum StatusAnimal {
    #[default]
    Ativo,
    Vendido,
    Morto,
    Emprestado,
    Aposentado,
}

/// A horse registered on the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Animal {
    pub id: i64,
    pub nome: String,
    pub numero_registro: Option<String>,
    pub chip_identificacao: Option<String>,
    pub sexo: Option<Sexo>,
    pub data_nascimento: Option<String>,
    pub pelagem: Option<String>,
    #[serde(default)]
    pub status_animal: StatusAnimal,
    pub id_pai: Option<i64>,
    pub id_mae: Option<i64>,
    pub origem: Option<String>,
    pub observacoes: Option<String>,
    pub peso_atual: Option<f64>,
    pub foto_principal: Option<String>,
    pub proprietario: Option<String>,
    pub contato_proprietario: Option<String>,
    pub cpf_cnpj_proprietario: Option<String>,
    pub id_usuario_cadastro: Option<i64>,
    pub data_cadastro: Option<String>,
    pub id_usuario_alteracao: Option<i64>,
    pub data_alteracao: Option<String>,
}

impl Animal {
    pub fn is_active(&self) -> bool {
        self.status_animal == StatusAnimal::Ativo
    }
}

impl Resource for Animal {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "animals",
        label: "animais",
        path: "/api/animais",
        envelope: "animais",
        default_rows: 10,
        default_sort: "ID",
        default_descending: false,
        date_fields: &["DATA_NASCIMENTO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

/// Recursive ancestry tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genealogia {
    pub animal: Animal,
    pub pai: Option<Box<Genealogia>>,
    pub mae: Option<Box<Genealogia>>,
}

impl Genealogia {
    /// Number of generations in the deepest branch (the animal itself is 1).
    pub fn depth(&self) -> usize {
        let pai = self.pai.as_ref().map_or(0, |g| g.depth());
        let mae = self.mae.as_ref().map_or(0, |g| g.depth());
        1 + pai.max(mae)
    }
}

/// Candidate sire/dam for the parent selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentOption {
    pub value: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub filename: String,
    pub url: String,
    pub message: String,
}
