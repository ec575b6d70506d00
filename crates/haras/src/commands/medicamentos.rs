//! Medicine and stock command handlers.

use tabled::Tabled;

use haras_api::models::{
    AplicacaoMedicamento, ConsumoMedicamentoAnimal, EntradaEstoque, EstoqueBaixo, Medicamento,
    MedicamentoOption, MovimentacaoMedicamento, MovimentacaoPeriodoMedicamento,
    PrevisaoConsumoMedicamento,
};
use haras_core::{Farm, Labeled, Notice, labels};

use crate::cli::{EntradaArgs, GlobalOpts, MedicamentosArgs, MedicamentosCommand, OutputFormat};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};
use super::{estoque, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct MedicamentoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Forma")]
    forma: String,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Mínimo")]
    minimo: String,
    #[tabled(rename = "Validade")]
    validade: String,
    #[tabled(rename = "Situação")]
    situacao: String,
}

fn row(m: &Medicamento, color: bool) -> MedicamentoRow {
    MedicamentoRow {
        id: m.id,
        nome: m.nome.clone(),
        forma: m.forma_farmaceutica.map_or_else(|| "-".into(), |f| f.label().to_owned()),
        estoque: format!("{} {}", m.estoque_atual, m.unidade_medida),
        minimo: format!("{} {}", m.estoque_minimo, m.unidade_medida),
        validade: output::date(m.data_validade.as_ref()),
        situacao: m
            .status_estoque
            .map_or_else(|| "-".into(), |s| paint(s.label(), s.color(), color)),
    }
}

fn detail(m: &Medicamento) -> String {
    [
        format!("ID:                {}", m.id),
        format!("Nome:              {}", m.nome),
        format!("Princípio ativo:   {}", output::opt(m.principio_ativo.as_ref())),
        format!("Concentração:      {}", output::opt(m.concentracao.as_ref())),
        format!("Forma:             {}", m.forma_farmaceutica.map_or("-", |f| f.label())),
        format!("Fabricante:        {}", output::opt(m.fabricante.as_ref())),
        format!("Registro MAPA:     {}", output::opt(m.registro_mapa.as_ref())),
        format!("Estoque atual:     {} {}", m.estoque_atual, m.unidade_medida),
        format!("Estoque mínimo:    {} {}", m.estoque_minimo, m.unidade_medida),
        format!("Lote:              {}", output::opt(m.lote_atual.as_ref())),
        format!("Validade:          {}", output::date(m.data_validade.as_ref())),
        format!("Preço unitário:    {}", output::money(m.preco_unitario)),
        format!("Valor em estoque:  {}", output::money(m.valor_estoque)),
        format!("Fornecedor:        {}", output::opt(m.fornecedor.as_ref())),
        format!(
            "Carência:          {}",
            m.periodo_carencia.map_or_else(|| "-".into(), |d| format!("{d} dias"))
        ),
        format!("Situação:          {}", m.status_estoque.map_or("-", |s| s.label())),
        format!("Ativo:             {}", if m.is_active() { "Sim" } else { "Não" }),
    ]
    .join("\n")
}

const VIEW: View<Medicamento, MedicamentoRow> = View {
    noun: "Medicamento",
    to_row: row,
    detail,
};

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Medicamento")]
    nome: String,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Forma")]
    forma: String,
    #[tabled(rename = "Carência")]
    carencia: String,
}

fn option_row(o: &MedicamentoOption) -> OptionRow {
    OptionRow {
        id: o.value,
        nome: o.label.clone(),
        estoque: format!("{} {}", o.estoque, o.unidade),
        forma: o.forma.map_or_else(|| "-".into(), |f| f.label().to_owned()),
        carencia: o
            .carencia
            .map_or_else(|| "-".into(), |d| format!("{d} dias")),
    }
}

#[derive(Tabled)]
struct EstoqueBaixoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Medicamento")]
    nome: String,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Mínimo")]
    minimo: String,
    #[tabled(rename = "Vence em")]
    vencimento: String,
    #[tabled(rename = "Alerta")]
    alerta: String,
}

fn estoque_baixo_row(e: &EstoqueBaixo, color: bool) -> EstoqueBaixoRow {
    EstoqueBaixoRow {
        id: e.medicamento_id,
        nome: e.nome.clone(),
        estoque: format!("{} {}", e.estoque_atual, e.unidade_medida),
        minimo: format!("{} {}", e.estoque_minimo, e.unidade_medida),
        vencimento: e
            .dias_vencimento
            .map_or_else(|| "-".into(), |d| format!("{d} dias")),
        alerta: paint(e.status_alerta.label(), e.status_alerta.color(), color),
    }
}

// ── Stock entry ─────────────────────────────────────────────────────

fn entrada(args: EntradaArgs) -> Result<EntradaEstoque, CliError> {
    if args.quantidade <= 0.0 {
        return Err(CliError::Validation {
            field: "quantidade".into(),
            reason: "must be greater than zero".into(),
        });
    }
    if args.lote.trim().is_empty() {
        return Err(CliError::Validation {
            field: "lote".into(),
            reason: "cannot be empty".into(),
        });
    }
    let data_validade = util::query_date(Some(&args.validade), "validade")?.unwrap_or_default();
    Ok(EntradaEstoque {
        id_medicamento: args.medicamento,
        quantidade: args.quantidade,
        lote: args.lote,
        data_validade,
        data_fabricacao: util::query_date(args.fabricacao.as_deref(), "fabricacao")?,
        nota_fiscal: args.nota_fiscal,
        fornecedor: args.fornecedor,
        preco_unitario: args.preco,
        observacoes: args.observacoes,
    })
}

// ── Application from stock ──────────────────────────────────────────

fn aplicacao(
    medicamento: i64,
    animal: i64,
    quantidade: f64,
    veterinario: Option<String>,
    observacoes: Option<String>,
) -> Result<AplicacaoMedicamento, CliError> {
    if quantidade <= 0.0 {
        return Err(CliError::Validation {
            field: "quantidade".into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(AplicacaoMedicamento {
        id_medicamento: medicamento,
        id_animal: animal,
        quantidade_aplicada: quantidade,
        veterinario_responsavel: veterinario.filter(|v| !v.trim().is_empty()),
        observacoes,
    })
}

// ── Ledger and reports ──────────────────────────────────────────────

#[derive(Tabled)]
struct MovimentacaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Medicamento")]
    medicamento: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Quantidade")]
    quantidade: f64,
    #[tabled(rename = "Saldo")]
    saldo: String,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Lote")]
    lote: String,
}

fn movimentacao_row(m: &MovimentacaoMedicamento, color: bool) -> MovimentacaoRow {
    MovimentacaoRow {
        id: m.id,
        data: output::date(m.data_registro.as_ref()),
        medicamento: m
            .medicamento_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", m.id_medicamento)),
        tipo: paint(
            m.tipo_movimentacao.label(),
            m.tipo_movimentacao.color(),
            color,
        ),
        quantidade: m.quantidade,
        saldo: output::opt(m.quantidade_atual.as_ref()),
        animal: output::opt(m.animal_nome.as_ref()),
        lote: output::opt(m.lote.as_ref()),
    }
}

#[derive(Tabled)]
struct ConsumoRow {
    #[tabled(rename = "Medicamento")]
    medicamento: String,
    #[tabled(rename = "Total aplicado")]
    total: String,
    #[tabled(rename = "Aplicações")]
    aplicacoes: i64,
    #[tabled(rename = "Última")]
    ultima: String,
    #[tabled(rename = "Custo")]
    custo: String,
}

fn consumo_row(c: &ConsumoMedicamentoAnimal) -> ConsumoRow {
    ConsumoRow {
        medicamento: c.medicamento_nome.clone(),
        total: format!("{} {}", c.total_aplicado, c.unidade_medida),
        aplicacoes: c.numero_aplicacoes,
        ultima: output::date(c.ultima_aplicacao.as_ref()),
        custo: output::money(c.custo_total),
    }
}

#[derive(Tabled)]
struct PrevisaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Medicamento")]
    medicamento: String,
    #[tabled(rename = "Consumo/mês")]
    consumo: f64,
    #[tabled(rename = "Estoque")]
    estoque: f64,
    #[tabled(rename = "Dias restantes")]
    dias: i64,
    #[tabled(rename = "Fim previsto")]
    fim: String,
    #[tabled(rename = "Recomendação")]
    recomendacao: String,
}

fn previsao_row(p: &PrevisaoConsumoMedicamento, color: bool) -> PrevisaoRow {
    PrevisaoRow {
        id: p.medicamento_id,
        medicamento: p.medicamento_nome.clone(),
        consumo: p.consumo_mensal_medio,
        estoque: p.estoque_atual,
        dias: p.dias_restantes,
        fim: output::date(p.data_prevista_fim.as_ref()),
        recomendacao: paint(
            labels::recomendacao_label(&p.recomendacao),
            labels::recomendacao_color(&p.recomendacao),
            color,
        ),
    }
}

#[derive(Tabled)]
struct PeriodoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Medicamento")]
    medicamento: String,
    #[tabled(rename = "Entradas")]
    entradas: f64,
    #[tabled(rename = "Saídas")]
    saidas: f64,
    #[tabled(rename = "Saldo")]
    saldo: f64,
    #[tabled(rename = "Valor")]
    valor: String,
    #[tabled(rename = "Última movimentação")]
    ultima: String,
}

fn periodo_row(p: &MovimentacaoPeriodoMedicamento) -> PeriodoRow {
    PeriodoRow {
        id: p.medicamento_id,
        medicamento: p.medicamento_nome.clone(),
        entradas: p.total_entradas,
        saidas: p.total_saidas,
        saldo: p.saldo_atual,
        valor: labels::format_currency(p.valor_total),
        ultima: output::date(p.ultima_movimentacao.as_ref()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    farm: &Farm,
    args: MedicamentosArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    match args.command {
        MedicamentosCommand::Crud(cmd) => {
            crud::handle(farm.medicamentos(), cmd, &VIEW, global).await
        }

        MedicamentosCommand::Buscar { termo, limit } => {
            let found = farm.api().autocomplete_medicamentos(&termo, limit).await?;
            let out = output::render_list(format, &found, option_row, |o| o.value.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MedicamentosCommand::Entrada(args) => {
            let dados = entrada(args)?;
            let result = farm.api().entrada_estoque(&dados).await?;
            output::print_notice(&Notice::success(result.message.clone()), global.quiet, color);
            let out = output::render_single(
                format,
                &result,
                |r| {
                    format!(
                        "Movimentação: #{}\nEstoque atual: {}",
                        r.movimentacao_id,
                        output::opt(r.estoque_atual.as_ref())
                    )
                },
                |r| r.movimentacao_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MedicamentosCommand::EstoqueBaixo { dias } => {
            let alertas = farm.api().estoque_baixo(dias).await?;
            if alertas.is_empty() && format == OutputFormat::Table {
                output::print_notice(
                    &Notice::info("Nenhum medicamento com estoque baixo."),
                    global.quiet,
                    color,
                );
                return Ok(());
            }
            let out = output::render_list(
                format,
                &alertas,
                |e| estoque_baixo_row(e, color),
                |e| e.medicamento_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MedicamentosCommand::Aplicar {
            medicamento,
            animal,
            quantidade,
            veterinario,
            observacoes,
        } => {
            let dados = aplicacao(medicamento, animal, quantidade, veterinario, observacoes)?;
            let result = farm.api().aplicar_medicamento(&dados).await?;
            output::print_notice(&Notice::success(result.message.clone()), global.quiet, color);
            if let Some(saude_id) = result.saude_id {
                let out = output::render_single(
                    format,
                    &result,
                    |_| format!("Registro de saúde: #{saude_id}"),
                    |_| saude_id.to_string(),
                );
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        MedicamentosCommand::Movimentacoes { ledger, animal } => {
            let filtro = util::ledger_filter(&ledger, animal)?;
            let page = farm.api().movimentacoes_medicamento(&filtro).await?;
            let out = output::render_list(
                format,
                &page.items,
                |m| movimentacao_row(m, color),
                |m| m.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if format == OutputFormat::Table && !global.quiet {
                eprintln!("{}", estoque::page_footer(&page));
            }
            Ok(())
        }

        MedicamentosCommand::Consumo { animal_id, period } => {
            let filtro = util::period_filter(&period, None)?;
            let consumo = farm
                .api()
                .consumo_medicamento_animal(animal_id, filtro.data_inicio, filtro.data_fim)
                .await?;
            estoque::print_report(
                &consumo,
                "Nenhuma aplicação no período.",
                global,
                consumo_row,
                |c| c.medicamento_nome.clone(),
            );
            Ok(())
        }

        MedicamentosCommand::Previsao { dias } => {
            let previsao = farm.api().previsao_consumo_medicamento(dias).await?;
            estoque::print_report(
                &previsao,
                "Sem consumo registrado no período analisado.",
                global,
                |p| previsao_row(p, color),
                |p| p.medicamento_id.to_string(),
            );
            Ok(())
        }

        MedicamentosCommand::MovimentacaoPeriodo { period } => {
            let filtro = util::period_filter(&period, None)?;
            let resumo = farm
                .api()
                .movimentacao_periodo_medicamento(filtro.data_inicio, filtro.data_fim)
                .await?;
            estoque::print_report(
                &resumo,
                "Nenhuma movimentação no período.",
                global,
                periodo_row,
                |p| p.medicamento_id.to_string(),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args() -> EntradaArgs {
        EntradaArgs {
            medicamento: 3,
            quantidade: 10.0,
            lote: "L2024-01".into(),
            validade: "31/12/2025".into(),
            fabricacao: None,
            nota_fiscal: Some("NF-123".into()),
            fornecedor: None,
            preco: Some(12.5),
            observacoes: None,
        }
    }

    #[test]
    fn entrada_sends_iso_expiry() {
        let dados = entrada(args()).unwrap();
        assert_eq!(dados.data_validade, "2025-12-31");
        assert_eq!(dados.data_fabricacao, None);
        assert_eq!(dados.nota_fiscal.as_deref(), Some("NF-123"));
    }

    #[test]
    fn entrada_rejects_non_positive_quantity() {
        let mut a = args();
        a.quantidade = 0.0;
        let err = entrada(a).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "quantidade"));
    }

    #[test]
    fn application_needs_a_positive_quantity() {
        let dados = aplicacao(3, 9, 2.5, Some(" ".into()), None).unwrap();
        assert_eq!(dados.quantidade_aplicada, 2.5);
        assert_eq!(dados.veterinario_responsavel, None);

        let err = aplicacao(3, 9, 0.0, None, None).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "quantidade"));
    }

    #[test]
    fn ledger_row_names_medicine_and_animal() {
        let m: MovimentacaoMedicamento = serde_json::from_value(serde_json::json!({
            "ID": 12,
            "ID_MEDICAMENTO": 3,
            "TIPO_MOVIMENTACAO": "SAIDA",
            "QUANTIDADE": 2.0,
            "QUANTIDADE_ATUAL": 18.0,
            "animal_nome": "Estrela",
        }))
        .unwrap();
        let r = movimentacao_row(&m, false);
        assert_eq!(r.medicamento, "#3");
        assert_eq!(r.animal, "Estrela");
        assert_eq!(r.saldo, "18");
        assert_eq!(r.lote, "-");
    }

    #[test]
    fn entrada_rejects_bad_expiry() {
        let mut a = args();
        a.validade = "amanhã".into();
        assert!(entrada(a).is_err());
    }
}
