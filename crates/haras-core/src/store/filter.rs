// ── List filters ──
//
// Ordered field-name → value map sent with every list request. Select
// options are unwrapped here and nowhere else on the read path.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a select input: the wire value plus its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: Value, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    #[default]
    Null,
    Text(String),
    Int(i64),
    Bool(bool),
    Select(SelectOption),
}

impl FilterValue {
    /// Query-string form, or `None` when the filter is inactive.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) if s.is_empty() => None,
            Self::Text(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Select(opt) => match &opt.value {
                Value::Null => None,
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.to_query_value().is_some()
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<SelectOption> for FilterValue {
    fn from(opt: SelectOption) -> Self {
        Self::Select(opt)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Insertion-ordered filter map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSet {
    entries: IndexMap<String, FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSet::set`].
    pub fn with(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<FilterValue>) {
        self.entries.insert(field.to_owned(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries.get(field)
    }

    /// Overlay `other` on top of `self`; existing keys keep their position.
    pub fn merge(&mut self, other: &FilterSet) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active filters as query pairs, in insertion order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.to_query_value().map(|q| (k.clone(), q)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn inactive_filters_are_not_sent() {
        let filters = FilterSet::new()
            .with("nome", "")
            .with("sexo", FilterValue::Null)
            .with("status", SelectOption::new(json!("ATIVO"), "Ativo"))
            .with("animal_id", 7_i64)
            .with("estoque_baixo", false)
            .with("egua_id", SelectOption::new(Value::Null, "Todas"));

        assert_eq!(
            filters.to_query(),
            vec![
                ("status".to_owned(), "ATIVO".to_owned()),
                ("animal_id".to_owned(), "7".to_owned()),
                ("estoque_baixo".to_owned(), "false".to_owned()),
            ]
        );
    }

    #[test]
    fn numeric_select_values_are_unwrapped() {
        let filters = FilterSet::new().with("terreno_id", SelectOption::new(json!(12), "Piquete 3"));
        assert_eq!(filters.to_query(), vec![("terreno_id".to_owned(), "12".to_owned())]);
    }

    #[test]
    fn merge_keeps_order_and_overrides() {
        let mut base: FilterSet = [("nome", ""), ("status", "")].into_iter().collect();
        base.merge(&FilterSet::new().with("status", "OCUPADO").with("extra", "x"));

        let keys: Vec<&str> = base.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["nome", "status", "extra"]);
        assert_eq!(base.get("status"), Some(&FilterValue::Text("OCUPADO".into())));
        assert_eq!(FilterValue::from(None::<i64>), FilterValue::Null);
    }
}
