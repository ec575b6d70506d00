// Form payload normalization, applied once before every create/update.

use serde_json::{Map, Value};

use crate::dates::convert_to_iso;

/// Normalize a form before it is sent to the backend.
///
/// - each non-empty string in `date_fields` is rewritten with
///   [`convert_to_iso`];
/// - select-option objects (`{"value": .., "label": ..}`) collapse to
///   their `value`;
/// - empty strings become `null`.
pub fn prepare_form_data(mut form: Map<String, Value>, date_fields: &[&str]) -> Map<String, Value> {
    for field in date_fields {
        if let Some(Value::String(s)) = form.get_mut(*field) {
            if let Some(iso) = convert_to_iso(s) {
                *s = iso;
            }
        }
    }

    for value in form.values_mut() {
        *value = match unwrap_select(std::mem::take(value)) {
            Value::String(s) if s.is_empty() => Value::Null,
            other => other,
        };
    }

    form
}

/// Select-option unwrapping for a single value.
fn unwrap_select(value: Value) -> Value {
    match value {
        Value::Object(mut obj) if obj.contains_key("value") => {
            obj.remove("value").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn normalizes_dates_selects_and_blanks() {
        let form = map(json!({
            "NOME": "Estrela",
            "DATA_NASCIMENTO": "05/03/2024",
            "DATA_OCORRENCIA": "05/03/2024 14:30",
            "SEXO": {"value": "F", "label": "Fêmea"},
            "ID_PAI": {"value": null, "label": "Nenhum"},
            "OBSERVACOES": "",
            "PESO_ATUAL": 412.5,
            "TAGS": ["a"]
        }));

        let prepared = prepare_form_data(form, &["DATA_NASCIMENTO", "DATA_OCORRENCIA"]);

        assert_eq!(
            Value::Object(prepared),
            json!({
                "NOME": "Estrela",
                "DATA_NASCIMENTO": "2024-03-05T00:00:00",
                "DATA_OCORRENCIA": "2024-03-05T14:30:00",
                "SEXO": "F",
                "ID_PAI": null,
                "OBSERVACOES": null,
                "PESO_ATUAL": 412.5,
                "TAGS": ["a"]
            })
        );
    }

    #[test]
    fn empty_date_field_becomes_null() {
        let prepared = prepare_form_data(map(json!({"DATA_VALIDADE": ""})), &["DATA_VALIDADE"]);
        assert_eq!(prepared["DATA_VALIDADE"], Value::Null);
    }

    #[test]
    fn object_without_value_is_kept() {
        let prepared = prepare_form_data(map(json!({"EXTRA": {"a": 1}})), &[]);
        assert_eq!(prepared["EXTRA"], json!({"a": 1}));
        assert_eq!(unwrap_select(json!({"value": 3, "label": "x"})), json!(3));
        assert_eq!(unwrap_select(json!("x")), json!("x"));
    }

    #[test]
    fn select_with_blank_value_becomes_null() {
        let prepared = prepare_form_data(
            map(json!({"ID_TERRENO": {"value": "", "label": "Selecione"}})),
            &[],
        );
        assert_eq!(prepared["ID_TERRENO"], Value::Null);
    }
}
