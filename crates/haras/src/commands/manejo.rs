//! Field-input product, stock, soil-analysis and paddock report command
//! handlers.

use std::path::{Path, PathBuf};

use tabled::Tabled;

use haras_api::laudo_content_type;
use haras_api::models::{
    AnaliseSolo, ConsumoTerreno, LiberacaoTerreno, PrevisaoConsumoManejo, ProdutoManejo,
    ResumoEstoqueManejo, TipoProdutoManejo,
};
use haras_core::{Farm, Labeled, Notice, labels};

use crate::cli::{AnalisesCommand, GlobalOpts, ManejoArgs, ManejoCommand};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};
use super::{estoque, util};

#[derive(Tabled)]
struct ProdutoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Tipo")]
    tipo: &'static str,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Mínimo")]
    minimo: String,
    #[tabled(rename = "Validade")]
    validade: String,
    #[tabled(rename = "Situação")]
    situacao: String,
}

fn row(p: &ProdutoManejo, color: bool) -> ProdutoRow {
    ProdutoRow {
        id: p.id,
        nome: p.nome.clone(),
        tipo: p.tipo_produto.label(),
        estoque: format!("{} {}", p.estoque_atual, p.unidade_medida),
        minimo: format!("{} {}", p.estoque_minimo, p.unidade_medida),
        validade: output::date(p.data_validade.as_ref()),
        situacao: p
            .status_estoque
            .map_or_else(|| "-".into(), |s| paint(s.label(), s.color(), color)),
    }
}

fn detail(p: &ProdutoManejo) -> String {
    let mut lines = vec![
        format!("ID:               {}", p.id),
        format!("Nome:             {}", p.nome),
        format!("Tipo:             {}", p.tipo_produto.label()),
        format!("Princípio ativo:  {}", output::opt(p.principio_ativo.as_ref())),
        format!("Fabricante:       {}", output::opt(p.fabricante.as_ref())),
        format!("Estoque atual:    {} {}", p.estoque_atual, p.unidade_medida),
        format!("Estoque mínimo:   {} {}", p.estoque_minimo, p.unidade_medida),
        format!("Lote:             {}", output::opt(p.lote_atual.as_ref())),
        format!("Validade:         {}", output::date(p.data_validade.as_ref())),
        format!("Preço unitário:   {}", output::money(p.preco_unitario)),
        format!("Valor em estoque: {}", output::money(p.valor_total_estoque)),
        format!("Fornecedor:       {}", output::opt(p.fornecedor_principal.as_ref())),
        format!("Armazenamento:    {}", output::opt(p.local_armazenamento.as_ref())),
        format!("Situação:         {}", p.status_estoque.map_or("-", |s| s.label())),
    ];
    if let Some(dose) = p.dose_recomendada {
        lines.push(format!("Dose recomendada: {dose} {}/ha", p.unidade_medida));
    }
    if let Some(dias) = p.periodo_carencia {
        lines.push(format!("Carência:         {dias} dias"));
    }
    lines.join("\n")
}

const VIEW: View<ProdutoManejo, ProdutoRow> = View {
    noun: "Produto",
    to_row: row,
    detail,
};

// ── Soil analyses ───────────────────────────────────────────────────

#[derive(Tabled)]
struct AnaliseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Terreno")]
    terreno: String,
    #[tabled(rename = "Coleta")]
    coleta: String,
    #[tabled(rename = "Resultado")]
    resultado: String,
    #[tabled(rename = "Laboratório")]
    laboratorio: String,
    #[tabled(rename = "pH (CaCl₂)")]
    ph: String,
    #[tabled(rename = "V%")]
    saturacao: String,
    #[tabled(rename = "Laudo")]
    laudo: String,
}

fn analise_row(a: &AnaliseSolo, color: bool) -> AnaliseRow {
    AnaliseRow {
        id: a.id,
        terreno: a
            .terreno_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", a.id_terreno)),
        coleta: output::date(a.data_coleta.as_ref()),
        resultado: output::date(a.data_resultado.as_ref()),
        laboratorio: output::opt(a.laboratorio.as_ref()),
        ph: output::opt(a.ph_cacl2.as_ref()),
        saturacao: output::opt(a.saturacao_bases.as_ref()),
        laudo: if a.has_laudo() {
            paint("Anexado", "positive", color)
        } else {
            "-".into()
        },
    }
}

const ANALISE_VIEW: View<AnaliseSolo, AnaliseRow> = View {
    noun: "Análise de solo",
    to_row: analise_row,
    detail: output::render_detail,
};

/// Where a downloaded report lands: the given path, else the server's
/// file name stripped of any directory part.
fn download_path(
    destino: Option<PathBuf>,
    server_name: Option<&str>,
    analise_id: i64,
) -> PathBuf {
    if let Some(path) = destino {
        return path;
    }
    server_name
        .and_then(|name| Path::new(name).file_name())
        .map_or_else(
            || PathBuf::from(haras_api::default_laudo_filename(analise_id)),
            PathBuf::from,
        )
}

fn checked_laudo(path: &Path) -> Result<String, CliError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_owned();
    if laudo_content_type(&filename).is_none() {
        return Err(CliError::Validation {
            field: "path".into(),
            reason: "the report must be a PDF, JPEG or PNG file".into(),
        });
    }
    Ok(filename)
}

async fn analises(farm: &Farm, cmd: AnalisesCommand, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color_mode());

    match cmd {
        AnalisesCommand::Crud(cmd) => {
            crud::handle(farm.analises(), cmd, &ANALISE_VIEW, global).await
        }

        AnalisesCommand::Upload { id, path } => {
            let filename = checked_laudo(&path)?;
            let bytes = tokio::fs::read(&path).await?;
            let uploaded = farm.api().upload_laudo(id, &filename, bytes).await?;
            output::print_notice(&Notice::success(uploaded.message.clone()), global.quiet, color);
            let out = output::render_single(
                global.output_format(),
                &uploaded,
                |u| format!("Arquivo: {}", u.arquivo),
                |u| u.arquivo.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnalisesCommand::Download { id, destino } => {
            let file = farm.api().download_laudo(id).await?;
            let path = download_path(destino, file.filename.as_deref(), id);
            tokio::fs::write(&path, &file.bytes).await?;
            output::print_notice(
                &Notice::success(format!(
                    "Laudo salvo em {} ({} bytes)",
                    path.display(),
                    file.bytes.len()
                )),
                global.quiet,
                color,
            );
            Ok(())
        }

        AnalisesCommand::Info { id } => {
            let info = farm.api().laudo_info(id).await?;
            let out = output::render_single(
                global.output_format(),
                &info,
                output::render_detail,
                |_| id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

// ── Reports ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ResumoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Tipo")]
    tipo: &'static str,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Entradas")]
    entradas: f64,
    #[tabled(rename = "Saídas")]
    saidas: f64,
    #[tabled(rename = "Valor entradas")]
    valor: String,
    #[tabled(rename = "Última movimentação")]
    ultima: String,
}

fn resumo_row(r: &ResumoEstoqueManejo) -> ResumoRow {
    ResumoRow {
        id: r.produto_id,
        produto: r.produto_nome.clone(),
        tipo: r.tipo_produto.label(),
        estoque: format!("{} / {} {}", r.estoque_atual, r.estoque_minimo, r.unidade_medida),
        entradas: r.total_entradas,
        saidas: r.total_saidas,
        valor: labels::format_currency(r.valor_entradas),
        ultima: output::date(r.ultima_movimentacao.as_ref()),
    }
}

#[derive(Tabled)]
struct ConsumoRow {
    #[tabled(rename = "Terreno")]
    terreno: String,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Manejo")]
    manejo: String,
    #[tabled(rename = "Aplicado")]
    aplicado: String,
    #[tabled(rename = "Aplicações")]
    aplicacoes: i64,
    #[tabled(rename = "Última")]
    ultima: String,
    #[tabled(rename = "Custo")]
    custo: String,
}

fn consumo_row(c: &ConsumoTerreno) -> ConsumoRow {
    ConsumoRow {
        terreno: c.terreno_nome.clone(),
        produto: c.produto_nome.clone(),
        manejo: c.tipo_manejo.clone(),
        aplicado: format!("{} {}", c.total_aplicado, c.unidade_medida),
        aplicacoes: c.numero_aplicacoes,
        ultima: output::date(c.ultima_aplicacao.as_ref()),
        custo: output::money(c.custo_total),
    }
}

#[derive(Tabled)]
struct PrevisaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Produto")]
    produto: String,
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

fn previsao_row(p: &PrevisaoConsumoManejo, color: bool) -> PrevisaoRow {
    PrevisaoRow {
        id: p.produto_id,
        produto: p.produto_nome.clone(),
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
struct LiberacaoRow {
    #[tabled(rename = "Terreno")]
    terreno: String,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Aplicação")]
    aplicacao: String,
    #[tabled(rename = "Liberação")]
    liberacao: String,
    #[tabled(rename = "Faltam")]
    faltam: String,
}

fn liberacao_row(l: &LiberacaoTerreno, color: bool) -> LiberacaoRow {
    let faltam = match l.dias_para_liberacao {
        d if d <= 0 => paint("Liberado", "positive", color),
        1 => "1 dia".into(),
        d if d <= 7 => paint(&format!("{d} dias"), "warning", color),
        d => format!("{d} dias"),
    };
    LiberacaoRow {
        terreno: l.terreno_nome.clone(),
        produto: l.produto_nome.clone(),
        aplicacao: output::date(l.data_aplicacao.as_ref()),
        liberacao: output::date(l.data_liberacao.as_ref()),
        faltam,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

fn tipo_produto(raw: Option<&str>) -> Result<Option<TipoProdutoManejo>, CliError> {
    util::parse_optional_code(raw, "tipo")
}

pub async fn handle(farm: &Farm, args: ManejoArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color_mode());

    match args.command {
        ManejoCommand::Crud(cmd) => crud::handle(farm.manejo(), cmd, &VIEW, global).await,

        ManejoCommand::EstoqueBaixo(list) => {
            let state = crud::load(farm.manejo(), &list).await?;
            let baixos = state.estoque_baixo();
            let out = output::render_list(
                global.output_format(),
                &baixos,
                |p| row(p, color),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ManejoCommand::Entrada(entrada) => {
            let mov = farm.api().entrada_manejo(&estoque::entrada(entrada)?).await?;
            estoque::print_movement("Entrada registrada com sucesso!", &mov, global);
            Ok(())
        }

        ManejoCommand::Saida { saida, terreno } => {
            let mov = farm
                .api()
                .saida_manejo(&estoque::saida(saida, None, terreno)?)
                .await?;
            estoque::print_movement("Saída registrada com sucesso!", &mov, global);
            Ok(())
        }

        ManejoCommand::Ajuste(ajuste) => {
            let mov = farm.api().ajuste_manejo(&estoque::ajuste(ajuste)?).await?;
            estoque::print_movement("Estoque ajustado com sucesso!", &mov, global);
            Ok(())
        }

        ManejoCommand::Movimentacoes(ledger) => {
            let filtro = util::ledger_filter(&ledger, None)?;
            let page = farm.api().movimentacoes_manejo(&filtro).await?;
            estoque::print_ledger(&page, global);
            Ok(())
        }

        ManejoCommand::Alertas => {
            let alertas = farm.api().alertas_estoque_manejo().await?;
            estoque::print_alerts(&alertas, global);
            Ok(())
        }

        ManejoCommand::Resumo { tipo } => {
            let resumo = farm
                .api()
                .resumo_estoque_manejo(tipo_produto(tipo.as_deref())?)
                .await?;
            estoque::print_report(
                &resumo,
                "Nenhum produto ativo.",
                global,
                resumo_row,
                |r| r.produto_id.to_string(),
            );
            Ok(())
        }

        ManejoCommand::Analises(a) => analises(farm, a.command, global).await,

        ManejoCommand::Consumo {
            terreno,
            tipo,
            period,
        } => {
            let filtro = util::period_filter(&period, None)?;
            let consumo = farm
                .api()
                .consumo_terreno(
                    terreno,
                    tipo_produto(tipo.as_deref())?,
                    filtro.data_inicio,
                    filtro.data_fim,
                )
                .await?;
            estoque::print_report(
                &consumo,
                "Nenhuma aplicação no período.",
                global,
                consumo_row,
                |c| c.terreno_id.to_string(),
            );
            Ok(())
        }

        ManejoCommand::Previsao { tipo } => {
            let previsao = farm
                .api()
                .previsao_consumo_manejo(tipo_produto(tipo.as_deref())?)
                .await?;
            estoque::print_report(
                &previsao,
                "Sem consumo registrado.",
                global,
                |p| previsao_row(p, color),
                |p| p.produto_id.to_string(),
            );
            Ok(())
        }

        ManejoCommand::Liberacao { dias } => {
            let liberacoes = farm.api().terrenos_liberacao(dias).await?;
            estoque::print_report(
                &liberacoes,
                "Nenhum terreno em carência no período.",
                global,
                |l| liberacao_row(l, color),
                |l| l.terreno_id.to_string(),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn row_shows_stock_with_unit_and_status() {
        let p: ProdutoManejo = serde_json::from_value(serde_json::json!({
            "ID": 5,
            "NOME": "Ureia",
            "TIPO_PRODUTO": "FERTILIZANTE",
            "UNIDADE_MEDIDA": "kg",
            "ESTOQUE_ATUAL": 40.0,
            "ESTOQUE_MINIMO": 100.0,
            "status_estoque": "ESTOQUE_BAIXO",
        }))
        .unwrap();
        let r = row(&p, false);
        assert_eq!(r.tipo, "Fertilizante");
        assert_eq!(r.estoque, "40 kg");
        assert_eq!(r.minimo, "100 kg");
        assert_eq!(r.situacao, "Estoque Baixo");
        assert_eq!(r.validade, "-");
    }

    #[test]
    fn download_lands_on_server_name_without_directories() {
        assert_eq!(
            download_path(None, Some("../../etc/laudo_3.pdf"), 3),
            PathBuf::from("laudo_3.pdf")
        );
        assert_eq!(download_path(None, None, 3), PathBuf::from("laudo_analise_3.pdf"));
        assert_eq!(
            download_path(Some(PathBuf::from("/tmp/x.pdf")), Some("laudo.pdf"), 3),
            PathBuf::from("/tmp/x.pdf")
        );
    }

    #[test]
    fn upload_refuses_other_formats_before_sending() {
        assert_eq!(checked_laudo(Path::new("docs/Laudo.PDF")).unwrap(), "Laudo.PDF");
        let err = checked_laudo(Path::new("planilha.xlsx")).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "path"));
    }

    #[test]
    fn release_countdown() {
        let mut l = LiberacaoTerreno {
            terreno_id: 1,
            terreno_nome: "Piquete 1".into(),
            produto_nome: "Glifosato".into(),
            tipo_manejo: None,
            data_aplicacao: None,
            data_liberacao: None,
            dias_para_liberacao: 0,
        };
        assert_eq!(liberacao_row(&l, false).faltam, "Liberado");
        l.dias_para_liberacao = 1;
        assert_eq!(liberacao_row(&l, false).faltam, "1 dia");
        l.dias_para_liberacao = 12;
        assert_eq!(liberacao_row(&l, false).faltam, "12 dias");
    }

    #[test]
    fn analysis_row_marks_attached_report() {
        let a: AnaliseSolo = serde_json::from_value(serde_json::json!({
            "ID": 8,
            "ID_TERRENO": 2,
            "DATA_COLETA": "2024-04-10",
            "PH_CACL2": 5.2,
            "ARQUIVO_LAUDO": "laudo_8.pdf",
        }))
        .unwrap();
        let r = analise_row(&a, false);
        assert_eq!(r.terreno, "#2");
        assert_eq!(r.coleta, "10/04/2024");
        assert_eq!(r.ph, "5.2");
        assert_eq!(r.laudo, "Anexado");
    }
}
