//! Shared helpers for command handlers.

use std::fmt::Display;
use std::io::{IsTerminal, Read};
use std::str::FromStr;

use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use haras_api::{DashboardFilter, StockMovementFilter};
use haras_core::{Farm, FetchOverrides, FilterSet, FilterValue, Navigation, dates};

use crate::cli::{LedgerArgs, ListArgs, PeriodArgs, WriteArgs};
use crate::error::CliError;

/// Route every authenticated command is checked against.
const APP_PATH: &str = "/dashboard";

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Fail early with "not logged in" instead of letting the backend answer
/// 401 after a round-trip.
pub fn require_session(farm: &Farm) -> Result<(), CliError> {
    match farm.navigate(APP_PATH) {
        Navigation::Proceed(_) => Ok(()),
        Navigation::Redirect(_) => Err(CliError::NotLoggedIn),
    }
}

// ── Payloads ────────────────────────────────────────────────────────

/// Read the JSON object given with `--data` or `--from-file`.
pub fn read_payload(args: &WriteArgs) -> Result<Map<String, Value>, CliError> {
    let raw = match (&args.data, &args.from_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            return Err(CliError::Validation {
                field: "data".into(),
                reason: "pass --data or --from-file".into(),
            });
        }
    };
    parse_object(&raw)
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: "data".into(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Listing ─────────────────────────────────────────────────────────

/// `field=value` pairs into a filter set. Values are sent exactly as typed,
/// so registration numbers keep their leading zeros.
pub fn parse_filters(raw: &[String]) -> Result<FilterSet, CliError> {
    let mut set = FilterSet::new();
    for pair in raw {
        let Some((field, value)) = pair.split_once('=') else {
            return Err(CliError::Validation {
                field: "filter".into(),
                reason: format!("expected FIELD=VALUE, got '{pair}'"),
            });
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(CliError::Validation {
                field: "filter".into(),
                reason: format!("missing field name in '{pair}'"),
            });
        }
        set.set(field, FilterValue::from(value.trim()));
    }
    Ok(set)
}

/// Per-call fetch overrides from the list flags. Sort direction is left to
/// the store unless `--asc` or `--desc` was given.
pub fn overrides(args: &ListArgs) -> Result<FetchOverrides, CliError> {
    let descending = match (args.desc, args.asc) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    Ok(FetchOverrides {
        page: Some(args.page),
        limit: args.limit,
        sort_by: args.sort.clone(),
        descending,
        filters: Some(parse_filters(&args.filter)?),
    })
}

// ── Backend codes ───────────────────────────────────────────────────

/// Parse a backend code case-insensitively; the error lists the valid codes.
pub fn parse_code<E>(raw: &str, field: &str) -> Result<E, CliError>
where
    E: FromStr + IntoEnumIterator + Display,
{
    E::from_str(&raw.trim().to_uppercase()).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!(
            "'{raw}' is not one of {}",
            E::iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
        ),
    })
}

pub fn parse_optional_code<E>(raw: Option<&str>, field: &str) -> Result<Option<E>, CliError>
where
    E: FromStr + IntoEnumIterator + Display,
{
    raw.map(|r| parse_code(r, field)).transpose()
}

// ── Dates ───────────────────────────────────────────────────────────

/// Accept `DD/MM/YYYY` or ISO and send `YYYY-MM-DD`.
pub fn query_date(value: Option<&str>, field: &str) -> Result<Option<String>, CliError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    dates::parse(raw)
        .map(|dt| Some(dt.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| CliError::Validation {
            field: field.into(),
            reason: format!("'{raw}' is not a date (use DD/MM/YYYY or YYYY-MM-DD)"),
        })
}

pub fn period_filter(
    period: &PeriodArgs,
    proprietario: Option<String>,
) -> Result<DashboardFilter, CliError> {
    Ok(DashboardFilter {
        data_inicio: query_date(period.data_inicio.as_deref(), "data-inicio")?,
        data_fim: query_date(period.data_fim.as_deref(), "data-fim")?,
        proprietario,
    })
}

/// Ledger filters; `produto` names the product (or medicine) ID.
pub fn ledger_filter(
    args: &LedgerArgs,
    animal_id: Option<i64>,
) -> Result<StockMovementFilter, CliError> {
    Ok(StockMovementFilter {
        produto_id: args.produto,
        animal_id,
        tipo: parse_optional_code(args.tipo.as_deref(), "tipo")?,
        data_inicio: query_date(args.period.data_inicio.as_deref(), "data-inicio")?,
        data_fim: query_date(args.period.data_fim.as_deref(), "data-fim")?,
        page: args.page.max(1),
        limit: args.limit.clamp(1, 100),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use haras_api::models::{TipoMovimentacaoEstoque, TipoProdutoManejo};

    #[test]
    fn codes_parse_case_insensitively_and_list_choices() {
        let tipo: TipoProdutoManejo = parse_code(" corretivo ", "tipo").unwrap();
        assert_eq!(tipo, TipoProdutoManejo::Corretivo);

        let err = parse_code::<TipoProdutoManejo>("adubo", "tipo").unwrap_err();
        let CliError::Validation { field, reason } = err else {
            panic!("expected a validation error");
        };
        assert_eq!(field, "tipo");
        assert!(reason.contains("FERTILIZANTE, DEFENSIVO, CORRETIVO, SEMENTE"));

        assert_eq!(parse_optional_code::<TipoProdutoManejo>(None, "tipo").unwrap(), None);
    }

    #[test]
    fn ledger_filter_sends_iso_dates_and_typed_movement() {
        let args = LedgerArgs {
            produto: Some(4),
            tipo: Some("saida".into()),
            period: PeriodArgs {
                data_inicio: Some("01/03/2024".into()),
                data_fim: None,
            },
            page: 0,
            limit: 500,
        };
        let filtro = ledger_filter(&args, Some(9)).unwrap();
        assert_eq!(filtro.produto_id, Some(4));
        assert_eq!(filtro.animal_id, Some(9));
        assert_eq!(filtro.tipo, Some(TipoMovimentacaoEstoque::Saida));
        assert_eq!(filtro.data_inicio.as_deref(), Some("2024-03-01"));
        assert_eq!(filtro.page, 1);
        assert_eq!(filtro.limit, 100);
    }

    #[test]
    fn filters_are_sent_as_typed() {
        let set = parse_filters(&[
            "animal_id=12".into(),
            "estoque_baixo=true".into(),
            "nome= Estrela ".into(),
        ])
        .unwrap();
        assert_eq!(
            set.to_query(),
            vec![
                ("animal_id".to_owned(), "12".to_owned()),
                ("estoque_baixo".to_owned(), "true".to_owned()),
                ("nome".to_owned(), "Estrela".to_owned()),
            ]
        );
    }

    #[test]
    fn filters_keep_leading_zeros() {
        let set = parse_filters(&["numero_registro=00123".into(), "chip=0987".into()]).unwrap();
        assert_eq!(set.get("numero_registro"), Some(&FilterValue::from("00123")));
        assert_eq!(
            set.to_query(),
            vec![
                ("numero_registro".to_owned(), "00123".to_owned()),
                ("chip".to_owned(), "0987".to_owned()),
            ]
        );
    }

    #[test]
    fn filter_without_equals_is_rejected() {
        let err = parse_filters(&["sexo".into()]).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "filter"));
    }

    #[test]
    fn payload_must_be_an_object() {
        assert!(parse_object(r#"{"NOME": "Estrela"}"#).is_ok());
        let err = parse_object("[1, 2]").unwrap_err();
        assert!(matches!(err, CliError::Validation { ref reason, .. } if reason.contains("array")));
        assert!(matches!(parse_object("{"), Err(CliError::Json(_))));
    }

    #[test]
    fn query_dates_accept_both_shapes() {
        assert_eq!(
            query_date(Some("05/03/2024"), "data-inicio").unwrap().as_deref(),
            Some("2024-03-05")
        );
        assert_eq!(
            query_date(Some("2024-03-05"), "data-inicio").unwrap().as_deref(),
            Some("2024-03-05")
        );
        assert_eq!(query_date(None, "data-inicio").unwrap(), None);
        assert!(query_date(Some("ontem"), "data-inicio").is_err());
    }

    #[test]
    fn sort_direction_is_only_sent_when_asked() {
        let args = ListArgs {
            page: 2,
            limit: None,
            sort: Some("NOME".into()),
            desc: false,
            asc: false,
            filter: Vec::new(),
            all: false,
        };
        let o = overrides(&args).unwrap();
        assert_eq!(o.page, Some(2));
        assert_eq!(o.descending, None);
        assert_eq!(o.sort_by.as_deref(), Some("NOME"));

        let o = overrides(&ListArgs { desc: true, ..args }).unwrap();
        assert_eq!(o.descending, Some(true));
    }
}
