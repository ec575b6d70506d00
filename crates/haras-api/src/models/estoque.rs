// Stock ledger shared by the feed and field-input routers.
//
// Both routers take the same entry/exit/adjustment bodies keyed by
// `ID_PRODUTO` and return the same movement rows; only the linked
// record differs (an animal for feed, a paddock for field inputs).

use serde::{Deserialize, Serialize};

use super::manejo::TipoProdutoManejo;
use super::medicamento::{StatusEstoque, TipoMovimentacaoEstoque};
use super::racao::TipoAlimento;

/// Stock entry (purchase) of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EntradaProduto {
    pub id_produto: i64,
    pub quantidade: f64,
    pub nota_fiscal: String,
    pub fornecedor: String,
    pub preco_unitario: f64,
    pub lote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_validade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fabricacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Stock exit, optionally attributed to an animal (feed) or paddock
/// (field input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SaidaProduto {
    pub id_produto: i64,
    pub quantidade: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_animal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_terreno: Option<i64>,
    pub motivo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Inventory count correction: sets the stock to `quantidade_nova`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AjusteEstoque {
    pub id_produto: i64,
    pub quantidade_nova: f64,
    pub motivo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// One row of a product stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MovimentacaoProduto {
    pub id: i64,
    pub id_produto: i64,
    pub tipo_movimentacao: TipoMovimentacaoEstoque,
    pub quantidade: f64,
    pub nota_fiscal: Option<String>,
    pub fornecedor: Option<String>,
    pub preco_unitario: Option<f64>,
    pub lote: Option<String>,
    pub data_validade: Option<String>,
    pub data_fabricacao: Option<String>,
    pub motivo: Option<String>,
    pub observacoes: Option<String>,
    pub quantidade_anterior: Option<f64>,
    pub quantidade_atual: Option<f64>,
    pub id_fornecimento_animal: Option<i64>,
    pub id_animal: Option<i64>,
    pub id_manejo_terreno: Option<i64>,
    pub id_terreno: Option<i64>,
    pub id_usuario_registro: Option<i64>,
    pub data_registro: Option<String>,
    #[serde(rename = "produto_nome")]
    pub produto_nome: Option<String>,
    #[serde(rename = "produto_unidade")]
    pub produto_unidade: Option<String>,
    #[serde(rename = "animal_nome")]
    pub animal_nome: Option<String>,
    #[serde(rename = "terreno_nome")]
    pub terreno_nome: Option<String>,
}

/// Low-stock or expiring product. Feed rows carry `tipo_alimento`,
/// field-input rows `tipo_produto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertaEstoqueProduto {
    pub produto_id: i64,
    pub nome: String,
    #[serde(default)]
    pub tipo_alimento: Option<TipoAlimento>,
    #[serde(default)]
    pub tipo_produto: Option<TipoProdutoManejo>,
    #[serde(default)]
    pub estoque_atual: f64,
    #[serde(default)]
    pub estoque_minimo: f64,
    #[serde(default)]
    pub unidade_medida: String,
    pub status_alerta: StatusEstoque,
    #[serde(default)]
    pub dias_vencimento: Option<i64>,
    #[serde(default)]
    pub fornecedor_principal: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn saida_omits_unlinked_targets() {
        let saida = SaidaProduto {
            id_produto: 4,
            quantidade: 12.5,
            id_animal: Some(9),
            id_terreno: None,
            motivo: "Fornecimento".into(),
            observacoes: None,
        };
        let body = serde_json::to_value(&saida).unwrap();
        assert_eq!(
            body,
            json!({"ID_PRODUTO": 4, "QUANTIDADE": 12.5, "ID_ANIMAL": 9, "MOTIVO": "Fornecimento"})
        );
    }

    #[test]
    fn alert_rows_from_either_router_decode() {
        let racao: AlertaEstoqueProduto = serde_json::from_value(json!({
            "produto_id": 1, "nome": "Aveia", "tipo_alimento": "CONCENTRADO",
            "estoque_atual": 20.0, "estoque_minimo": 50.0, "unidade_medida": "kg",
            "status_alerta": "ESTOQUE_BAIXO", "dias_vencimento": null,
            "fornecedor_principal": "Agro"
        }))
        .unwrap();
        assert_eq!(racao.tipo_alimento, Some(TipoAlimento::Concentrado));
        assert_eq!(racao.tipo_produto, None);

        let manejo: AlertaEstoqueProduto = serde_json::from_value(json!({
            "produto_id": 2, "nome": "Calcário", "tipo_produto": "CORRETIVO",
            "estoque_atual": 0.0, "estoque_minimo": 100.0, "unidade_medida": "t",
            "status_alerta": "SEM_ESTOQUE"
        }))
        .unwrap();
        assert_eq!(manejo.tipo_produto, Some(TipoProdutoManejo::Corretivo));
        assert_eq!(manejo.status_alerta, StatusEstoque::SemEstoque);
    }
}
