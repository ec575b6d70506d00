// Generic paginated resource client.
//
// Every farm domain (animals, terrains, health records, ...) exposes the
// same list/get/create/update/delete surface under its own base path.
// `ResourceClient<T>` implements it once, parameterized by the static
// `ResourceSpec` each record type declares.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

// ── Static per-resource configuration ───────────────────────────────

/// Static description of one REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Short machine name (`animals`, `saude`, ...).
    pub name: &'static str,
    /// Human label used in messages (pt-BR plural).
    pub label: &'static str,
    /// Collection path. May end with `/` when the backend requires it.
    pub path: &'static str,
    /// Key of the row array inside the list envelope.
    pub envelope: &'static str,
    pub default_rows: u32,
    pub default_sort: &'static str,
    pub default_descending: bool,
    /// Form fields holding dates, normalized to ISO before writes.
    pub date_fields: &'static [&'static str],
}

impl ResourceSpec {
    fn collection_path(&self) -> &'static str {
        self.path
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{id}", self.path.trim_end_matches('/'))
    }
}

/// A record type served by a [`ResourceSpec`] endpoint.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    const SPEC: ResourceSpec;

    fn id(&self) -> i64;
}

// ── Query & page ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_descending(descending: bool) -> Self {
        if descending { Self::Desc } else { Self::Asc }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub order: SortOrder,
    /// Already-unwrapped filter values, in insertion order.
    pub filters: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: None,
            order: SortOrder::Asc,
            filters: Vec::new(),
        }
    }
}

impl ListQuery {
    /// Defaults declared by the resource (page 1, its row count and sort).
    pub fn for_spec(spec: &ResourceSpec) -> Self {
        Self {
            page: 1,
            limit: spec.default_rows,
            sort_by: Some(spec.default_sort.to_owned()),
            order: SortOrder::from_descending(spec.default_descending),
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Query-string pairs: `page`, `limit`, `sort_by`, `order`, then filters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.max(1).to_string()),
            ("limit".to_owned(), self.limit.to_string()),
        ];
        if let Some(ref sort) = self.sort_by {
            params.push(("sort_by".to_owned(), sort.clone()));
        }
        params.push(("order".to_owned(), self.order.as_str().to_owned()));
        params.extend(self.filters.iter().cloned());
        params
    }
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    /// Total rows across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }
}

/// Decode a list body: `{ <envelope>: [...], page, limit, total }` or a
/// bare JSON array.
pub(crate) fn decode_page<T: DeserializeOwned>(
    envelope: &str,
    query: &ListQuery,
    body: Value,
) -> Result<Page<T>, Error> {
    let (rows, page, limit, total) = match body {
        Value::Array(rows) => (Value::Array(rows), None, None, None),
        Value::Object(mut map) => {
            let rows = map.remove(envelope).unwrap_or(Value::Null);
            let number = |key: &str| map.get(key).and_then(Value::as_u64);
            (rows, number("page"), number("limit"), number("total"))
        }
        other => {
            return Err(Error::Deserialization {
                message: format!("expected list envelope `{envelope}` or array"),
                body: other.to_string(),
            });
        }
    };

    let rows = if rows.is_null() {
        Value::Array(Vec::new())
    } else {
        rows
    };
    let raw = rows.to_string();
    let items: Vec<T> = serde_json::from_value(rows).map_err(|e| {
        let preview: String = raw.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: raw.clone(),
        }
    })?;

    let page = page
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(query.page.max(1));
    let limit = limit
        .and_then(|l| u32::try_from(l).ok())
        .unwrap_or(query.limit);
    let received = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let total =
        total.unwrap_or_else(|| u64::from(page.saturating_sub(1)) * u64::from(limit) + received);

    Ok(Page {
        items,
        page,
        limit,
        total,
    })
}

// ── Client ──────────────────────────────────────────────────────────

/// CRUD client for one resource type.
pub struct ResourceClient<T> {
    api: ApiClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        &T::SPEC
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>, Error> {
        let spec = &T::SPEC;
        let body: Value = self
            .api
            .get_with_params(spec.collection_path(), &query.to_params())
            .await?;
        let page = decode_page(spec.envelope, query, body)?;
        debug!(
            resource = spec.name,
            rows = page.items.len(),
            total = page.total,
            "list page received"
        );
        Ok(page)
    }

    pub async fn get(&self, id: i64) -> Result<T, Error> {
        self.api.get(&T::SPEC.item_path(id)).await
    }

    pub async fn create<B: Serialize + Sync>(&self, body: &B) -> Result<T, Error> {
        self.api.post(T::SPEC.collection_path(), body).await
    }

    pub async fn update<B: Serialize + Sync>(&self, id: i64, body: &B) -> Result<T, Error> {
        self.api.put(&T::SPEC.item_path(id), body).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.api.delete(&T::SPEC.item_path(id)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "ID")]
        id: i64,
    }

    #[test]
    fn params_follow_page_limit_sort_order_then_filters() {
        let q = ListQuery {
            page: 2,
            limit: 25,
            sort_by: Some("NOME".into()),
            order: SortOrder::Desc,
            filters: vec![("sexo".into(), "F".into())],
        };
        assert_eq!(
            q.to_params(),
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("limit".to_owned(), "25".to_owned()),
                ("sort_by".to_owned(), "NOME".to_owned()),
                ("order".to_owned(), "desc".to_owned()),
                ("sexo".to_owned(), "F".to_owned()),
            ]
        );
    }

    #[test]
    fn decodes_envelope_with_totals() {
        let q = ListQuery::default();
        let body = json!({"animais": [{"ID": 1}, {"ID": 2}], "page": 1, "limit": 10, "total": 42});
        let page: Page<Row> = decode_page("animais", &q, body).unwrap();
        assert_eq!(page.items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(page.total, 42);
        assert_eq!(page.total_pages(), 5);
    }

    #[test]
    fn missing_envelope_key_is_an_empty_page() {
        let q = ListQuery::default();
        let page: Page<Row> = decode_page("terrenos", &q, json!({"total": 0})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn bare_array_derives_total_from_position() {
        let q = ListQuery {
            page: 3,
            limit: 50,
            ..ListQuery::default()
        };
        let page: Page<Row> = decode_page("registros", &q, json!([{"ID": 7}])).unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.total, 101);
    }

    #[test]
    fn scalar_body_is_rejected() {
        let q = ListQuery::default();
        let err = decode_page::<Row>("registros", &q, json!("oops")).unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }
}
