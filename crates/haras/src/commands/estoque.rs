//! Stock ledger shared by the feed and field-input commands.

use serde::Serialize;
use tabled::Tabled;

use haras_api::Page;
use haras_api::models::{
    AjusteEstoque, AlertaEstoqueProduto, EntradaProduto, MovimentacaoProduto, SaidaProduto,
};
use haras_core::{Labeled, Notice};

use crate::cli::{GlobalOpts, OutputFormat, StockAdjustArgs, StockEntryArgs, StockExitArgs};
use crate::error::CliError;
use crate::output::{self, paint};

use super::util;

// ── Request bodies ──────────────────────────────────────────────────

fn positive(value: f64, field: &str) -> Result<(), CliError> {
    if value > 0.0 {
        return Ok(());
    }
    Err(CliError::Validation {
        field: field.into(),
        reason: "must be greater than zero".into(),
    })
}

fn required(value: &str, field: &str) -> Result<(), CliError> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    Err(CliError::Validation {
        field: field.into(),
        reason: "cannot be empty".into(),
    })
}

pub fn entrada(args: StockEntryArgs) -> Result<EntradaProduto, CliError> {
    positive(args.quantidade, "quantidade")?;
    if args.preco < 0.0 {
        return Err(CliError::Validation {
            field: "preco".into(),
            reason: "cannot be negative".into(),
        });
    }
    required(&args.nota_fiscal, "nota-fiscal")?;
    required(&args.fornecedor, "fornecedor")?;
    required(&args.lote, "lote")?;
    Ok(EntradaProduto {
        id_produto: args.produto,
        quantidade: args.quantidade,
        data_validade: util::query_date(args.validade.as_deref(), "validade")?,
        data_fabricacao: util::query_date(args.fabricacao.as_deref(), "fabricacao")?,
        nota_fiscal: args.nota_fiscal,
        fornecedor: args.fornecedor,
        preco_unitario: args.preco,
        lote: args.lote,
        motivo: None,
        observacoes: args.observacoes,
    })
}

/// Exit body; at most one of `animal` and `terreno` is set by the caller.
pub fn saida(
    args: StockExitArgs,
    animal: Option<i64>,
    terreno: Option<i64>,
) -> Result<SaidaProduto, CliError> {
    positive(args.quantidade, "quantidade")?;
    required(&args.motivo, "motivo")?;
    Ok(SaidaProduto {
        id_produto: args.produto,
        quantidade: args.quantidade,
        id_animal: animal,
        id_terreno: terreno,
        motivo: args.motivo,
        observacoes: args.observacoes,
    })
}

pub fn ajuste(args: StockAdjustArgs) -> Result<AjusteEstoque, CliError> {
    if args.quantidade_nova < 0.0 {
        return Err(CliError::Validation {
            field: "quantidade-nova".into(),
            reason: "cannot be negative".into(),
        });
    }
    required(&args.motivo, "motivo")?;
    Ok(AjusteEstoque {
        id_produto: args.produto,
        quantidade_nova: args.quantidade_nova,
        motivo: args.motivo,
        observacoes: args.observacoes,
    })
}

// ── Ledger ──────────────────────────────────────────────────────────

#[derive(Tabled)]
struct MovimentacaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Quantidade")]
    quantidade: String,
    #[tabled(rename = "Saldo")]
    saldo: String,
    #[tabled(rename = "Destino")]
    destino: String,
    #[tabled(rename = "Motivo")]
    motivo: String,
}

fn movimentacao_row(m: &MovimentacaoProduto, color: bool) -> MovimentacaoRow {
    let unidade = m.produto_unidade.as_deref().unwrap_or_default();
    MovimentacaoRow {
        id: m.id,
        data: output::date(m.data_registro.as_ref()),
        produto: m
            .produto_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", m.id_produto)),
        tipo: paint(
            m.tipo_movimentacao.label(),
            m.tipo_movimentacao.color(),
            color,
        ),
        quantidade: format!("{} {unidade}", m.quantidade).trim_end().to_owned(),
        saldo: match (m.quantidade_anterior, m.quantidade_atual) {
            (Some(antes), Some(depois)) => format!("{antes} → {depois}"),
            (None, Some(depois)) => depois.to_string(),
            _ => "-".into(),
        },
        destino: m
            .animal_nome
            .clone()
            .or_else(|| m.terreno_nome.clone())
            .unwrap_or_else(|| "-".into()),
        motivo: output::opt(m.motivo.as_ref()),
    }
}

/// Footer for listings paged by the API.
pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "Página {} de {} ({} registros)",
        page.page,
        page.total_pages().max(1),
        page.total
    )
}

pub fn print_ledger(page: &Page<MovimentacaoProduto>, global: &GlobalOpts) {
    let color = output::should_color(global.color_mode());
    let format = global.output_format();
    let out = output::render_list(
        format,
        &page.items,
        |m| movimentacao_row(m, color),
        |m| m.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    if format == OutputFormat::Table && !global.quiet {
        eprintln!("{}", page_footer(page));
    }
}

/// Notice plus the recorded movement.
pub fn print_movement(message: &str, mov: &MovimentacaoProduto, global: &GlobalOpts) {
    let color = output::should_color(global.color_mode());
    output::print_notice(&Notice::success(message), global.quiet, color);
    let out = output::render_single(
        global.output_format(),
        mov,
        |m| {
            format!(
                "Movimentação: #{}\nEstoque atual: {}",
                m.id,
                output::opt(m.quantidade_atual.as_ref())
            )
        },
        |m| m.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Alerts ──────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertaRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Produto")]
    nome: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Mínimo")]
    minimo: String,
    #[tabled(rename = "Vence em")]
    vencimento: String,
    #[tabled(rename = "Alerta")]
    alerta: String,
}

fn alerta_row(a: &AlertaEstoqueProduto, color: bool) -> AlertaRow {
    AlertaRow {
        id: a.produto_id,
        nome: a.nome.clone(),
        tipo: a
            .tipo_alimento
            .map(|t| t.label())
            .or_else(|| a.tipo_produto.map(|t| t.label()))
            .unwrap_or("-")
            .to_owned(),
        estoque: format!("{} {}", a.estoque_atual, a.unidade_medida),
        minimo: format!("{} {}", a.estoque_minimo, a.unidade_medida),
        vencimento: a
            .dias_vencimento
            .map_or_else(|| "-".into(), |d| format!("{d} dias")),
        alerta: paint(a.status_alerta.label(), a.status_alerta.color(), color),
    }
}

pub fn print_alerts(alertas: &[AlertaEstoqueProduto], global: &GlobalOpts) {
    let color = output::should_color(global.color_mode());
    let format = global.output_format();
    if alertas.is_empty() && format == OutputFormat::Table {
        output::print_notice(
            &Notice::info("Nenhum produto com estoque baixo."),
            global.quiet,
            color,
        );
        return;
    }
    let out = output::render_list(
        format,
        alertas,
        |a| alerta_row(a, color),
        |a| a.produto_id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

/// Render a report list, or an info notice when a table would be empty.
pub fn print_report<T, R>(
    items: &[T],
    empty: &str,
    global: &GlobalOpts,
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) where
    T: Serialize,
    R: Tabled,
{
    let format = global.output_format();
    if items.is_empty() && format == OutputFormat::Table {
        let color = output::should_color(global.color_mode());
        output::print_notice(&Notice::info(empty), global.quiet, color);
        return;
    }
    let out = output::render_list(format, items, to_row, id_fn);
    output::print_output(&out, global.quiet);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use haras_api::models::TipoMovimentacaoEstoque;

    fn entry() -> StockEntryArgs {
        StockEntryArgs {
            produto: 4,
            quantidade: 500.0,
            nota_fiscal: "NF-88".into(),
            fornecedor: "Agro Sul".into(),
            preco: 2.4,
            lote: "L7".into(),
            validade: Some("30/06/2025".into()),
            fabricacao: None,
            observacoes: None,
        }
    }

    fn exit() -> StockExitArgs {
        StockExitArgs {
            produto: 4,
            quantidade: 12.0,
            motivo: "Fornecimento".into(),
            observacoes: None,
        }
    }

    #[test]
    fn entry_sends_iso_expiry() {
        let body = entrada(entry()).unwrap();
        assert_eq!(body.data_validade.as_deref(), Some("2025-06-30"));
        assert_eq!(body.preco_unitario, 2.4);
        assert_eq!(body.motivo, None);
    }

    #[test]
    fn entry_requires_invoice_and_positive_quantity() {
        let mut a = entry();
        a.nota_fiscal = "  ".into();
        let err = entrada(a).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "nota-fiscal"));

        let mut a = entry();
        a.quantidade = -1.0;
        let err = entrada(a).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "quantidade"));
    }

    #[test]
    fn exit_links_the_target_and_needs_a_reason() {
        let body = saida(exit(), None, Some(3)).unwrap();
        assert_eq!(body.id_terreno, Some(3));
        assert_eq!(body.id_animal, None);

        let mut a = exit();
        a.motivo = String::new();
        let err = saida(a, Some(1), None).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "motivo"));
    }

    #[test]
    fn adjustment_to_zero_is_allowed() {
        let body = ajuste(StockAdjustArgs {
            produto: 2,
            quantidade_nova: 0.0,
            motivo: "Inventário".into(),
            observacoes: None,
        })
        .unwrap();
        assert_eq!(body.quantidade_nova, 0.0);
    }

    #[test]
    fn ledger_row_shows_balance_and_destination() {
        let m: MovimentacaoProduto = serde_json::from_value(serde_json::json!({
            "ID": 31,
            "ID_PRODUTO": 4,
            "TIPO_MOVIMENTACAO": "SAIDA",
            "QUANTIDADE": 12.0,
            "QUANTIDADE_ANTERIOR": 100.0,
            "QUANTIDADE_ATUAL": 88.0,
            "DATA_REGISTRO": "2024-03-05T10:00:00",
            "produto_nome": "Aveia",
            "produto_unidade": "kg",
            "animal_nome": "Estrela",
        }))
        .unwrap();
        assert_eq!(m.tipo_movimentacao, TipoMovimentacaoEstoque::Saida);
        let r = movimentacao_row(&m, false);
        assert_eq!(r.produto, "Aveia");
        assert_eq!(r.quantidade, "12 kg");
        assert_eq!(r.saldo, "100 → 88");
        assert_eq!(r.destino, "Estrela");
        assert_eq!(r.motivo, "-");
    }

    #[test]
    fn footer_counts_pages_from_total() {
        let page = Page::<MovimentacaoProduto> {
            items: Vec::new(),
            page: 2,
            limit: 10,
            total: 25,
        };
        assert_eq!(page_footer(&page), "Página 2 de 3 (25 registros)");
    }
}
