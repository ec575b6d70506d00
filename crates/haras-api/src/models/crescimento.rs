use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceSpec};

/// One growth measurement of an animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Crescimento {
    pub id: i64,
    pub id_animal: i64,
    pub data_medicao: Option<String>,
    pub peso: Option<f64>,
    pub altura: Option<f64>,
    pub circunferencia_canela: Option<f64>,
    pub circunferencia_toracica: Option<f64>,
    pub comprimento_corpo: Option<f64>,
    pub observacoes: Option<String>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
    #[serde(rename = "dias_desde_ultima")]
    pub dias_desde_ultima: Option<i64>,
}

impl Resource for Crescimento {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "crescimento",
        label: "medições de crescimento",
        path: "/api/crescimento-saude/crescimento",
        envelope: "registros",
        default_rows: 10,
        default_sort: "DATA_MEDICAO",
        default_descending: true,
        date_fields: &["DATA_MEDICAO"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}
