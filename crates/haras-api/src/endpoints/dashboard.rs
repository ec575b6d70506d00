// Dashboard aggregate and per-entity reports.

use serde::{Deserialize, Serialize};

use super::compact_params;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Dashboard, RelatorioAnimal, RelatorioTerreno};

/// Period/owner filter shared by the dashboard and the animal report.
/// Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub proprietario: Option<String>,
}

impl DashboardFilter {
    /// Query pairs with unset and empty values removed.
    pub fn to_params(&self) -> Vec<(String, String)> {
        compact_params(vec![
            ("data_inicio", self.data_inicio.clone()),
            ("data_fim", self.data_fim.clone()),
            ("proprietario", self.proprietario.clone()),
        ])
    }
}

impl ApiClient {
    /// `GET /api/dashboard/`
    pub async fn dashboard(&self, filter: &DashboardFilter) -> Result<Dashboard, Error> {
        self.get_with_params("/api/dashboard/", &filter.to_params())
            .await
    }

    /// `GET /api/dashboard/relatorio-animal/{id}`; the owner filter does
    /// not apply here.
    pub async fn relatorio_animal(
        &self,
        animal_id: i64,
        filter: &DashboardFilter,
    ) -> Result<RelatorioAnimal, Error> {
        let params = compact_params(vec![
            ("data_inicio", filter.data_inicio.clone()),
            ("data_fim", filter.data_fim.clone()),
        ]);
        self.get_with_params(&format!("/api/dashboard/relatorio-animal/{animal_id}"), &params)
            .await
    }

    /// `GET /api/dashboard/relatorio-terreno/{id}`
    pub async fn relatorio_terreno(&self, terreno_id: i64) -> Result<RelatorioTerreno, Error> {
        self.get(&format!("/api/dashboard/relatorio-terreno/{terreno_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_params_skip_blank_values() {
        let filter = DashboardFilter {
            data_inicio: Some("2024-01-01".into()),
            data_fim: None,
            proprietario: Some(String::new()),
        };
        assert_eq!(
            filter.to_params(),
            vec![("data_inicio".to_owned(), "2024-01-01".to_owned())]
        );
    }
}
