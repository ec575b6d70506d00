use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::medicamento::StatusEstoque;
use crate::resource::{Resource, ResourceSpec};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoAlimento {
    Concentrado,
    Volumoso,
    Suplemento,
    Premix,
    SalMineral,
}

/// A feed product kept in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ProdutoRacao {
    pub id: i64,
    pub nome: String,
    pub tipo_alimento: TipoAlimento,
    pub marca: Option<String>,
    pub fabricante: Option<String>,
    pub proteina_bruta: Option<f64>,
    pub fibra_bruta: Option<f64>,
    pub energia_digestivel: Option<f64>,
    pub calcio: Option<f64>,
    pub fosforo: Option<f64>,
    pub magnesio: Option<f64>,
    pub potassio: Option<f64>,
    pub sodio: Option<f64>,
    #[serde(default)]
    pub estoque_atual: f64,
    #[serde(default)]
    pub estoque_minimo: f64,
    pub estoque_maximo: Option<f64>,
    #[serde(default)]
    pub unidade_medida: String,
    pub preco_unitario: Option<f64>,
    pub fornecedor_principal: Option<String>,
    pub codigo_fornecedor: Option<String>,
    pub lote_atual: Option<String>,
    pub data_fabricacao: Option<String>,
    pub data_validade: Option<String>,
    pub registro_ministerio: Option<String>,
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

impl Resource for ProdutoRacao {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "racao",
        label: "produtos de ração",
        path: "/api/racao/produtos",
        envelope: "produtos",
        default_rows: 10,
        default_sort: "NOME",
        default_descending: false,
        date_fields: &["DATA_FABRICACAO", "DATA_VALIDADE"],
    };

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoriaNutricional {
    Potro,
    Jovem,
    AdultoManutencao,
    AdultoTrabalhoLeve,
    AdultoTrabalhoModerado,
    AdultoTrabalhoIntenso,
    EguaGestante,
    EguaLactante,
    Reprodutor,
    Idoso,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IntensidadeTrabalho {
    Repouso,
    Leve,
    Moderado,
    Intenso,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusPlano {
    Ativo,
    Inativo,
    Suspenso,
}

/// Feeding plan of one animal. Plans have no single-item route; they are
/// listed, created and updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PlanoAlimentar {
    pub id: i64,
    pub id_animal: i64,
    pub categoria_nutricional: CategoriaNutricional,
    pub peso_referencia: f64,
    pub escore_corporal: Option<f64>,
    pub intensidade_trabalho: Option<IntensidadeTrabalho>,
    pub quantidade_diaria_total: Option<f64>,
    #[serde(default = "default_refeicoes")]
    pub numero_refeicoes: u8,
    pub percentual_peso_vivo: Option<f64>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub status_plano: Option<StatusPlano>,
    pub observacoes: Option<String>,
    pub id_usuario_cadastro: Option<i64>,
    pub data_cadastro: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
    #[serde(rename = "animal_numero_registro")]
    pub animal_numero_registro: Option<String>,
    #[serde(rename = "total_produtos")]
    pub total_produtos: Option<i64>,
    #[serde(rename = "custo_diario_estimado")]
    pub custo_diario_estimado: Option<f64>,
}

fn default_refeicoes() -> u8 {
    3
}

/// Product line of a feeding plan, with up to four meal times (`HH:MM`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ItemPlanoAlimentar {
    pub id: i64,
    pub id_plano: i64,
    pub id_produto: i64,
    pub quantidade_por_refeicao: f64,
    pub quantidade_diaria: f64,
    pub ordem_fornecimento: Option<i64>,
    pub horario_refeicao_1: Option<String>,
    pub horario_refeicao_2: Option<String>,
    pub horario_refeicao_3: Option<String>,
    pub horario_refeicao_4: Option<String>,
    pub observacoes: Option<String>,
    pub ativo: Option<String>,
    #[serde(rename = "produto_nome")]
    pub produto_nome: Option<String>,
    #[serde(rename = "produto_unidade")]
    pub produto_unidade: Option<String>,
    #[serde(rename = "produto_tipo")]
    pub produto_tipo: Option<String>,
    #[serde(rename = "custo_diario")]
    pub custo_diario: Option<f64>,
}

impl ItemPlanoAlimentar {
    /// Meal times that are set, in order.
    pub fn horarios(&self) -> Vec<&str> {
        [
            &self.horario_refeicao_1,
            &self.horario_refeicao_2,
            &self.horario_refeicao_3,
            &self.horario_refeicao_4,
        ]
        .into_iter()
        .filter_map(|h| h.as_deref().filter(|h| !h.is_empty()))
        .collect()
    }
}

/// A feed delivery to an animal; debits the product's stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FornecimentoRacao {
    pub id: i64,
    pub id_animal: i64,
    pub id_produto: i64,
    pub id_plano: Option<i64>,
    pub data_fornecimento: Option<String>,
    pub horario_fornecimento: Option<String>,
    pub numero_refeicao: Option<u8>,
    pub quantidade_planejada: Option<f64>,
    pub quantidade_fornecida: f64,
    pub peso_animal_referencia: Option<f64>,
    pub funcionario_responsavel: Option<String>,
    pub observacoes: Option<String>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
    #[serde(rename = "animal_numero_registro")]
    pub animal_numero_registro: Option<String>,
    #[serde(rename = "produto_nome")]
    pub produto_nome: Option<String>,
    #[serde(rename = "produto_unidade")]
    pub produto_unidade: Option<String>,
    #[serde(rename = "custo_fornecimento")]
    pub custo_fornecimento: Option<f64>,
}

/// Feed autocomplete entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProdutoRacaoOption {
    pub value: i64,
    pub label: String,
    pub nome: String,
    pub estoque_atual: f64,
    pub unidade_medida: String,
    pub tipo_alimento: TipoAlimento,
    pub status_estoque: StatusEstoque,
}

/// Suggested daily intake for an animal in a nutritional category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculoNutricional {
    pub categoria_nutricional: CategoriaNutricional,
    pub peso_animal: f64,
    pub quantidade_sugerida_kg: f64,
    pub percentual_peso_vivo: f64,
    /// Meal name (`manha`, `tarde`, `noite`) to kilograms.
    #[serde(default)]
    pub distribuicao_refeicoes: BTreeMap<String, f64>,
    #[serde(default)]
    pub observacoes_nutricionais: String,
}

/// Feed consumption per animal and product over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumoAnimalRacao {
    pub animal_id: i64,
    pub animal_nome: String,
    #[serde(default)]
    pub numero_registro: String,
    pub produto_nome: String,
    pub tipo_alimento: TipoAlimento,
    pub total_consumido: f64,
    pub media_diaria: f64,
    pub custo_total: f64,
    pub ultima_refeicao: Option<String>,
}

/// Days of stock left at the last 30 days' consumption rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevisaoConsumoRacao {
    pub produto_id: i64,
    pub produto_nome: String,
    pub consumo_diario_medio: f64,
    pub estoque_atual: f64,
    pub dias_restantes: i64,
    pub data_prevista_fim: Option<String>,
    pub recomendacao: String,
}
