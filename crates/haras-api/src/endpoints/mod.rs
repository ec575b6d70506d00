// Domain endpoints beyond plain CRUD.
//
// Each file adds inherent methods to `ApiClient` for one backend router.

mod animals;
mod dashboard;
mod ferrageamento;
mod manejo;
mod medicamentos;
mod movimentacoes;
mod racao;
mod reproducao;
mod saude;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::TipoMovimentacaoEstoque;
use crate::resource::{ListQuery, Page, decode_page};

pub use animals::ParentOptions;
pub use dashboard::DashboardFilter;
pub use ferrageamento::filter_ferradores;
pub use manejo::{default_laudo_filename, laudo_content_type};
pub use racao::PlanoFilter;

/// Filters of the stock ledgers (feed, field inputs, medicines). Each
/// router names the product and type parameters its own way.
#[derive(Debug, Clone, PartialEq)]
pub struct StockMovementFilter {
    pub produto_id: Option<i64>,
    pub animal_id: Option<i64>,
    pub tipo: Option<TipoMovimentacaoEstoque>,
    /// `YYYY-MM-DD`
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for StockMovementFilter {
    fn default() -> Self {
        Self {
            produto_id: None,
            animal_id: None,
            tipo: None,
            data_inicio: None,
            data_fim: None,
            page: 1,
            limit: 10,
        }
    }
}

impl ApiClient {
    /// GET a paginated listing that is not a [`Resource`] collection.
    ///
    /// [`Resource`]: crate::Resource
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        envelope: &str,
        page: u32,
        limit: u32,
        params: Vec<(&str, Option<String>)>,
    ) -> Result<Page<T>, Error> {
        let query = ListQuery {
            page: page.max(1),
            limit,
            ..ListQuery::default()
        };
        let mut all = vec![
            ("page".to_owned(), query.page.to_string()),
            ("limit".to_owned(), query.limit.to_string()),
        ];
        all.extend(compact_params(params));
        let body: Value = self.get_with_params(path, &all).await?;
        decode_page(envelope, &query, body)
    }
}

/// Drop `(key, None)` and `(key, "")` pairs from a query.
pub(crate) fn compact_params(params: Vec<(&str, Option<String>)>) -> Vec<(String, String)> {
    params
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k.to_owned(), v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_params_drops_missing_and_empty() {
        let params = compact_params(vec![
            ("data_inicio", Some("2024-01-01".into())),
            ("data_fim", Some(String::new())),
            ("proprietario", None),
        ]);
        assert_eq!(
            params,
            vec![("data_inicio".to_owned(), "2024-01-01".to_owned())]
        );
    }
}
