//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use haras_core::{Notice, NoticeLevel, dates, feedback};
use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ───────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Paint `text` with a design-system color name. Unknown names are left
/// uncolored.
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_owned();
    }
    match color {
        "positive" | "green" => text.green().to_string(),
        "negative" | "red" => text.red().to_string(),
        "warning" | "orange" => text.yellow().to_string(),
        "info" | "teal" => text.cyan().to_string(),
        "blue" | "indigo" => text.blue().to_string(),
        "purple" => text.magenta().to_string(),
        "grey" => text.bright_black().to_string(),
        _ => text.to_owned(),
    }
}

// ── Cell helpers ────────────────────────────────────────────────────

/// Display an optional value, `-` when absent.
pub fn opt<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".into(), ToString::to_string)
}

/// `DD/MM/YYYY`, `-` when absent.
pub fn date(value: Option<&String>) -> String {
    value.map_or_else(|| "-".into(), |s| dates::format_date(s))
}

/// `R$ 1.234,56`, `-` when absent.
pub fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), haras_core::labels::format_currency)
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item views don't use
/// the `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a notice to stderr, respecting quiet mode. Failures are never
/// quiet; they travel as errors instead.
pub fn print_notice(notice: &Notice, quiet: bool, color: bool) {
    if quiet {
        return;
    }
    let (mark, tone) = match notice.level {
        NoticeLevel::Positive => ("✓", "positive"),
        NoticeLevel::Negative => ("✗", "negative"),
        NoticeLevel::Warning => ("!", "warning"),
        NoticeLevel::Info => ("i", "info"),
    };
    eprintln!("{} {}", paint(mark, tone, color), notice.message);
}

// ── Generic detail view ─────────────────────────────────────────────

/// `Label: value` lines for every non-null field of a record, with the
/// pt-BR field labels and `DATA_*` columns shown as `DD/MM/YYYY`.
pub fn render_detail<T: serde::Serialize>(data: &T) -> String {
    let Ok(Value::Object(map)) = serde_json::to_value(data) else {
        return render_json_pretty(data);
    };

    let fields: Vec<(String, String)> = map
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (feedback::field_label(k).to_owned(), detail_value(k, v)))
        .collect();

    let width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    fields
        .iter()
        .map(|(label, value)| {
            let pad = width - label.chars().count();
            format!("{label}:{} {value}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn detail_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) if key.starts_with("DATA_") => dates::format_date(s),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} itens]", items.len()),
        Value::Object(_) => render_json_compact(value),
        other => other.to_string(),
    }
}

// ── Format-specific renderers ────────────────────────────────────────

/// Rounded table, also used for the sections of composite views.
pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        render_json_compact(data)
    } else {
        render_json_pretty(data)
    }
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn detail_uses_labels_and_formats_dates() {
        let record = json!({
            "NOME": "Estrela",
            "DATA_NASCIMENTO": "2020-03-05T00:00:00",
            "PELAGEM": null,
        });
        let out = render_detail(&record);
        assert!(out.contains("05/03/2020"), "{out}");
        assert!(out.contains("Estrela"), "{out}");
        assert!(!out.contains("PELAGEM"), "{out}");
    }

    #[test]
    fn paint_is_a_no_op_without_color() {
        assert_eq!(paint("ATRASADO", "red", false), "ATRASADO");
        assert_ne!(paint("ATRASADO", "red", true), "ATRASADO");
    }

    #[test]
    fn plain_output_lists_identifiers() {
        let rows = vec![json!({"ID": 1}), json!({"ID": 2})];
        let out = render_list(
            OutputFormat::Plain,
            &rows,
            |r| IdRow { id: r["ID"].to_string() },
            |r| r["ID"].to_string(),
        );
        assert_eq!(out, "1\n2");
    }

    #[derive(Tabled)]
    struct IdRow {
        id: String,
    }

    #[test]
    fn empty_cells_show_a_dash() {
        assert_eq!(opt::<i64>(None), "-");
        assert_eq!(date(None), "-");
        assert_eq!(money(Some(1234.5)), "R$ 1.234,50");
    }
}
