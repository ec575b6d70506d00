use haras_api::{ListQuery, ResourceSpec, SortOrder};

use super::filter::FilterSet;

/// Table pagination state, mirroring what the backend reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based.
    pub page: u32,
    pub rows_per_page: u32,
    /// Total rows across all pages.
    pub rows_number: u64,
    pub sort_by: String,
    pub descending: bool,
}

impl Pagination {
    pub fn for_spec(spec: &ResourceSpec) -> Self {
        Self {
            page: 1,
            rows_per_page: spec.default_rows,
            rows_number: 0,
            sort_by: spec.default_sort.to_owned(),
            descending: spec.default_descending,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.rows_per_page == 0 {
            return 0;
        }
        self.rows_number.div_ceil(u64::from(self.rows_per_page))
    }

    pub fn apply(&mut self, update: &PaginationUpdate) {
        if let Some(page) = update.page {
            self.page = page.max(1);
        }
        if let Some(rows) = update.rows_per_page {
            self.rows_per_page = rows;
        }
        if let Some(total) = update.rows_number {
            self.rows_number = total;
        }
        if let Some(ref sort) = update.sort_by {
            self.sort_by.clone_from(sort);
        }
        if let Some(desc) = update.descending {
            self.descending = desc;
        }
    }
}

/// Partial pagination change; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationUpdate {
    pub page: Option<u32>,
    pub rows_per_page: Option<u32>,
    pub rows_number: Option<u64>,
    pub sort_by: Option<String>,
    pub descending: Option<bool>,
}

/// Per-call overrides for a fetch. Unset fields come from the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOverrides {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub descending: Option<bool>,
    /// Laid over the store's filters for this call only.
    pub filters: Option<FilterSet>,
}

impl FetchOverrides {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub(crate) fn to_query(&self, pagination: &Pagination, filters: &FilterSet) -> ListQuery {
        let mut merged = filters.clone();
        if let Some(ref extra) = self.filters {
            merged.merge(extra);
        }
        ListQuery {
            page: self.page.unwrap_or(pagination.page).max(1),
            limit: self.limit.unwrap_or(pagination.rows_per_page),
            sort_by: Some(
                self.sort_by
                    .clone()
                    .unwrap_or_else(|| pagination.sort_by.clone()),
            ),
            order: SortOrder::from_descending(self.descending.unwrap_or(pagination.descending)),
            filters: merged.to_query(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::filter::FilterValue;
    use haras_api::Resource;
    use haras_api::models::Saude;

    #[test]
    fn defaults_come_from_the_resource() {
        let p = Pagination::for_spec(&Saude::SPEC);
        assert_eq!(p.rows_per_page, 50);
        assert_eq!(p.sort_by, "DATA_OCORRENCIA");
        assert!(p.descending);
        assert_eq!(p.total_pages(), 0);
    }

    #[test]
    fn update_is_partial() {
        let mut p = Pagination::for_spec(&Saude::SPEC);
        p.apply(&PaginationUpdate {
            page: Some(0),
            rows_number: Some(101),
            ..PaginationUpdate::default()
        });
        assert_eq!(p.page, 1);
        assert_eq!(p.rows_number, 101);
        assert_eq!(p.rows_per_page, 50);
        assert_eq!(p.total_pages(), 3);
    }

    #[test]
    fn overrides_fall_back_to_store_state() {
        let p = Pagination::for_spec(&Saude::SPEC);
        let filters = FilterSet::new().with("animal_id", 3_i64).with("veterinario", "");

        let q = FetchOverrides::page(4).to_query(&p, &filters);
        assert_eq!(q.page, 4);
        assert_eq!(q.limit, 50);
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.filters, vec![("animal_id".to_owned(), "3".to_owned())]);

        let q = FetchOverrides {
            descending: Some(false),
            filters: Some(FilterSet::new().with("animal_id", FilterValue::Null)),
            ..FetchOverrides::default()
        }
        .to_query(&p, &filters);
        assert_eq!(q.order, SortOrder::Asc);
        assert!(q.filters.is_empty());
    }
}
