//! Shoeing and hoof-care command handlers.

use tabled::Tabled;

use haras_api::models::{
    AlertaVencimentoFerrageamento, EstatisticaFerrageamentoAnimal, EstatisticasFerrageamento,
    FerradorEstatisticas, FerradorOption, Ferrageamento, FerrageamentoRapido,
    RelatorioFerrageamento,
};
use haras_core::{CoreError, Farm, Labeled, Notice, labels};

use crate::cli::{FerrageamentoArgs, FerrageamentoCommand, GlobalOpts, RapidoArgs};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};
use super::{estoque, util};

#[derive(Tabled)]
struct FerrageamentoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Ferrador")]
    ferrador: String,
    #[tabled(rename = "Casco")]
    casco: String,
    #[tabled(rename = "Próxima avaliação")]
    proxima: String,
    #[tabled(rename = "Custo")]
    custo: String,
}

/// Next evaluation date, red when it is already past.
fn proxima_cell(f: &Ferrageamento, color: bool) -> String {
    let date = output::date(f.proxima_avaliacao.as_ref());
    match f.dias_proxima_avaliacao {
        Some(d) if d < 0 => paint(&format!("{date} (vencida)"), "negative", color),
        _ => date,
    }
}

fn row(f: &Ferrageamento, color: bool) -> FerrageamentoRow {
    FerrageamentoRow {
        id: f.id,
        animal: f
            .animal_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", f.id_animal)),
        tipo: paint(
            f.tipo_ferrageamento.label(),
            f.tipo_ferrageamento.color(),
            color,
        ),
        data: output::date(f.data_ocorrencia.as_ref()),
        ferrador: output::opt(f.ferrador_responsavel.as_ref()),
        casco: f
            .status_casco
            .map_or_else(|| "-".into(), |s| paint(s.label(), s.color(), color)),
        proxima: proxima_cell(f, color),
        custo: output::money(f.custo),
    }
}

fn detail(f: &Ferrageamento) -> String {
    [
        format!("ID:           {}", f.id),
        format!(
            "Animal:       {}",
            f.animal_nome
                .clone()
                .unwrap_or_else(|| format!("#{}", f.id_animal))
        ),
        format!("Tipo:         {}", f.tipo_ferrageamento.label()),
        format!("Data:         {}", output::date(f.data_ocorrencia.as_ref())),
        format!("Descrição:    {}", output::opt(f.descricao.as_ref())),
        format!("Ferradura:    {}", f.tipo_ferradura.map_or("-", |t| t.label())),
        format!("Membro:       {}", f.membro_tratado.map_or("-", |m| m.label())),
        format!("Problema:     {}", output::opt(f.problema_detectado.as_ref())),
        format!("Técnica:      {}", output::opt(f.tecnica_aplicada.as_ref())),
        format!("Ferrador:     {}", output::opt(f.ferrador_responsavel.as_ref())),
        format!("Casco:        {}", f.status_casco.map_or("-", |s| s.label())),
        format!("Próxima:      {}", proxima_cell(f, false)),
        format!("Custo:        {}", output::money(f.custo)),
        format!("Observações:  {}", output::opt(f.observacoes.as_ref())),
    ]
    .join("\n")
}

const VIEW: View<Ferrageamento, FerrageamentoRow> = View {
    noun: "Registro de ferrageamento",
    to_row: row,
    detail,
};

// ── Quick record ────────────────────────────────────────────────────

fn rapido(args: RapidoArgs) -> Result<FerrageamentoRapido, CliError> {
    if args.custo.is_some_and(|c| c < 0.0) {
        return Err(CliError::Validation {
            field: "custo".into(),
            reason: "cannot be negative".into(),
        });
    }
    Ok(FerrageamentoRapido {
        id_animal: args.animal,
        tipo_ferrageamento: util::parse_code(&args.tipo, "tipo")?,
        membro_tratado: util::parse_code(&args.membro, "membro")?,
        ferrador_responsavel: args.ferrador.filter(|f| !f.trim().is_empty()),
        status_casco: util::parse_optional_code(args.casco.as_deref(), "casco")?,
        custo: args.custo,
        observacoes: args.observacoes,
    })
}

// ── Due evaluations ─────────────────────────────────────────────────

#[derive(Tabled)]
struct VencimentoRow {
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Último")]
    ultimo: String,
    #[tabled(rename = "Vencimento")]
    vencimento: String,
    #[tabled(rename = "Dias")]
    dias: i64,
    #[tabled(rename = "Situação")]
    situacao: String,
    #[tabled(rename = "Ferrador")]
    ferrador: String,
}

fn status_cell(status: Option<&str>, color: bool) -> String {
    status.map_or_else(
        || "-".into(),
        |s| paint(labels::vencimento_label(s), labels::vencimento_color(s), color),
    )
}

fn vencimento_row(a: &AlertaVencimentoFerrageamento, color: bool) -> VencimentoRow {
    VencimentoRow {
        animal: if a.animal_nome.is_empty() {
            format!("#{}", a.animal_id)
        } else {
            a.animal_nome.clone()
        },
        tipo: output::opt(a.tipo_ferrageamento.as_ref()),
        ultimo: output::date(a.data_ultima.as_ref()),
        vencimento: output::date(a.proxima_avaliacao.as_ref()),
        dias: a.dias_vencimento,
        situacao: status_cell(a.status_vencimento.as_deref(), color),
        ferrador: output::opt(a.ferrador_anterior.as_ref()),
    }
}

// ── Statistics ──────────────────────────────────────────────────────

fn estatisticas_detail(e: &EstatisticasFerrageamento) -> String {
    [
        format!("Registros:            {}", e.total_registros),
        format!("Registros no mês:     {}", e.registros_mes_atual),
        format!("Custo no mês:         {}", labels::format_currency(e.custo_total_mes)),
        format!("Ferradores ativos:    {}", e.ferradores_ativos),
        format!("Próximas avaliações:  {}", e.proximas_avaliacoes),
        format!("Animais atrasados:    {}", e.animais_atrasados),
        format!(
            "Por tipo:             {} ferrageamentos, {} casqueamentos, {} corretivos, {} terapêuticos",
            e.total_ferrageamento, e.total_casqueamento, e.total_corretivo, e.total_terapeutico
        ),
    ]
    .join("\n")
}

#[derive(Tabled)]
struct AnimalRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Ferrageamentos")]
    ferrageamentos: i64,
    #[tabled(rename = "Casqueamentos")]
    casqueamentos: i64,
    #[tabled(rename = "Casco")]
    casco: String,
    #[tabled(rename = "Próxima")]
    proxima: String,
    #[tabled(rename = "Situação")]
    situacao: String,
    #[tabled(rename = "Custo")]
    custo: String,
}

fn animal_row(a: &EstatisticaFerrageamentoAnimal, color: bool) -> AnimalRow {
    AnimalRow {
        id: a.animal_id,
        animal: a.animal_nome.clone(),
        ferrageamentos: a.total_ferrageamentos,
        casqueamentos: a.total_casqueamentos,
        casco: a
            .status_atual_casco
            .map_or_else(|| "-".into(), |s| paint(s.label(), s.color(), color)),
        proxima: output::date(a.proxima_data.as_ref()),
        situacao: status_cell(a.status_vencimento.as_deref(), color),
        custo: output::money(a.custo_total),
    }
}

/// The per-animal table is optional: a failure to load it becomes a
/// notice and the counters are still shown.
fn per_animal(
    result: Result<Vec<EstatisticaFerrageamentoAnimal>, haras_api::Error>,
) -> (Option<Vec<EstatisticaFerrageamentoAnimal>>, Option<Notice>) {
    match result {
        Ok(animais) => (Some(animais), None),
        Err(e) => (None, Some(Notice::from_error(&CoreError::from(e)))),
    }
}

/// Farm-wide counters plus the per-animal table, when it loaded.
fn estatisticas_view(
    geral: &EstatisticasFerrageamento,
    animais: Option<&[EstatisticaFerrageamentoAnimal]>,
    color: bool,
) -> String {
    let mut out = estatisticas_detail(geral);
    if let Some(animais) = animais.filter(|a| !a.is_empty()) {
        let rows: Vec<AnimalRow> = animais.iter().map(|a| animal_row(a, color)).collect();
        out.push_str("\n\n");
        out.push_str(&output::render_table(&rows));
    }
    out
}

// ── Farriers and report ─────────────────────────────────────────────

#[derive(Tabled)]
struct FerradorRow {
    #[tabled(rename = "Ferrador")]
    nome: String,
    #[tabled(rename = "Atendimentos")]
    atendimentos: i64,
    #[tabled(rename = "Custo total")]
    custo: String,
    #[tabled(rename = "Última atividade")]
    ultima: String,
}

fn ferrador_row(f: &FerradorEstatisticas) -> FerradorRow {
    FerradorRow {
        nome: f.ferrador_nome.clone(),
        atendimentos: f.total_atendimentos,
        custo: labels::format_currency(f.custo_total),
        ultima: output::date(f.ultima_atividade.as_ref()),
    }
}

#[derive(Tabled)]
struct FerradorOptionRow {
    #[tabled(rename = "Ferrador")]
    label: String,
}

fn relatorio_view(r: &RelatorioFerrageamento, color: bool) -> String {
    let mut lines = vec![
        format!(
            "Período:      {} a {}",
            output::date(r.periodo_inicio.as_ref()),
            output::date(r.periodo_fim.as_ref())
        ),
        format!("Registros:    {}", r.total_registros),
        format!("Custo total:  {}", output::money(r.custo_total)),
        format!("Animais:      {}", r.animais_atendidos),
        format!("Ferradores:   {}", r.ferradores_utilizados),
    ];
    if !r.tipos_mais_realizados.is_empty() {
        let mut tipos: Vec<_> = r.tipos_mais_realizados.iter().collect();
        tipos.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let tipos: Vec<String> = tipos.iter().map(|(t, n)| format!("{t} ({n})")).collect();
        lines.push(format!("Tipos:        {}", tipos.join(", ")));
    }
    if !r.problemas_mais_comuns.is_empty() {
        lines.push(format!("Problemas:    {}", r.problemas_mais_comuns.join(", ")));
    }
    let mut out = lines.join("\n");
    if !r.registros.is_empty() {
        let rows: Vec<FerrageamentoRow> = r.registros.iter().map(|f| row(f, color)).collect();
        out.push_str("\n\n");
        out.push_str(&output::render_table(&rows));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    farm: &Farm,
    args: FerrageamentoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    match args.command {
        FerrageamentoCommand::Crud(cmd) => {
            crud::handle(farm.ferrageamento(), cmd, &VIEW, global).await
        }

        FerrageamentoCommand::Rapido(rapido_args) => {
            let dados = rapido(rapido_args)?;
            let registro = farm.api().ferrageamento_rapido(&dados).await?;
            output::print_notice(
                &Notice::success("Ferrageamento registrado com sucesso!"),
                global.quiet,
                color,
            );
            let out = output::render_single(format, &registro, detail, |f| f.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FerrageamentoCommand::Vencimentos { dias } => {
            let alertas = farm.api().vencimentos_ferrageamento(dias).await?;
            estoque::print_report(
                &alertas,
                "Nenhuma avaliação vencida ou próxima.",
                global,
                |a| vencimento_row(a, color),
                |a| a.animal_id.to_string(),
            );
            Ok(())
        }

        FerrageamentoCommand::Estatisticas { meses } => {
            let geral = farm.api().estatisticas_ferrageamento().await?;
            let (animais, notice) =
                per_animal(farm.api().estatisticas_ferrageamento_animais(meses).await);
            if let Some(notice) = notice {
                output::print_notice(&notice, global.quiet, color);
            }
            let out = output::render_single(
                format,
                &geral,
                |g| estatisticas_view(g, animais.as_deref(), color),
                |g| g.total_registros.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FerrageamentoCommand::Ferradores { ano } => {
            let ferradores = farm.api().relatorio_ferradores(ano).await?;
            estoque::print_report(
                &ferradores,
                "Nenhum ferrador com atendimentos.",
                global,
                ferrador_row,
                |f| f.ferrador_nome.clone(),
            );
            Ok(())
        }

        FerrageamentoCommand::Buscar { termo } => {
            let options = farm.api().buscar_ferradores(&termo).await?;
            let out = output::render_list(
                format,
                &options,
                |o: &FerradorOption| FerradorOptionRow {
                    label: o.label.clone(),
                },
                |o| o.value.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FerrageamentoCommand::Relatorio {
            data_inicio,
            data_fim,
            animal,
            tipo,
        } => {
            let inicio = util::query_date(Some(&data_inicio), "data-inicio")?.unwrap_or_default();
            let fim = util::query_date(Some(&data_fim), "data-fim")?.unwrap_or_default();
            let tipo = util::parse_optional_code(tipo.as_deref(), "tipo")?;
            let relatorio = farm
                .api()
                .relatorio_ferrageamento(&inicio, &fim, animal, tipo)
                .await?;
            let out = output::render_single(
                format,
                &relatorio,
                |r| relatorio_view(r, color),
                |r| {
                    r.registros
                        .iter()
                        .map(|f| f.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn overdue_evaluation_is_flagged() {
        let f: Ferrageamento = serde_json::from_value(serde_json::json!({
            "ID": 1,
            "ID_ANIMAL": 2,
            "TIPO_FERRAGEAMENTO": "CASQUEAMENTO",
            "PROXIMA_AVALIACAO": "2024-02-01",
            "dias_proxima_avaliacao": -5,
        }))
        .unwrap();
        assert_eq!(proxima_cell(&f, false), "01/02/2024 (vencida)");
        assert_eq!(row(&f, false).animal, "#2");
    }

    fn rapido_args() -> RapidoArgs {
        RapidoArgs {
            animal: 4,
            tipo: "casqueamento".into(),
            membro: "TODOS".into(),
            ferrador: Some("  ".into()),
            casco: Some("bom".into()),
            custo: Some(120.0),
            observacoes: None,
        }
    }

    #[test]
    fn quick_record_parses_codes() {
        let dados = rapido(rapido_args()).unwrap();
        assert_eq!(
            dados.tipo_ferrageamento,
            haras_api::models::TipoFerrageamento::Casqueamento
        );
        assert_eq!(dados.status_casco, Some(haras_api::models::StatusCasco::Bom));
        assert_eq!(dados.ferrador_responsavel, None);
    }

    #[test]
    fn quick_record_rejects_unknown_limb() {
        let mut a = rapido_args();
        a.membro = "DIANTEIRO".into();
        let err = rapido(a).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "membro"));
    }

    #[test]
    fn failed_per_animal_stats_leave_the_counters_and_a_notice() {
        let geral = EstatisticasFerrageamento {
            total_registros: 40,
            animais_atrasados: 2,
            ..EstatisticasFerrageamento::default()
        };
        let (animais, notice) = per_animal(Err(haras_api::Error::Api {
            status: 500,
            detail: None,
            message: Some("Falha ao consultar o histórico".into()),
        }));
        assert_eq!(animais, None);
        let notice = notice.unwrap();
        assert_eq!(notice.level, haras_core::NoticeLevel::Negative);
        assert_eq!(notice.message, "Falha ao consultar o histórico");

        let view = estatisticas_view(&geral, animais.as_deref(), false);
        assert!(view.contains("Registros:            40"));
        assert!(view.contains("Animais atrasados:    2"));
        assert!(!view.contains("Ferrageamentos"));

        let (animais, notice) = per_animal(Ok(Vec::new()));
        assert_eq!(animais, Some(Vec::new()));
        assert!(notice.is_none());
    }

    #[test]
    fn stats_view_appends_animal_table() {
        let animal: EstatisticaFerrageamentoAnimal = serde_json::from_value(serde_json::json!({
            "animal_id": 9,
            "animal_nome": "Trovão",
            "total_ferrageamentos": 3,
            "status_vencimento": "VENCIDO",
        }))
        .unwrap();
        let view = estatisticas_view(
            &EstatisticasFerrageamento::default(),
            Some(std::slice::from_ref(&animal)),
            false,
        );
        assert!(view.contains("Trovão"));
        assert!(view.contains("Vencido"));
    }

    #[test]
    fn report_lists_types_by_count() {
        let r: RelatorioFerrageamento = serde_json::from_value(serde_json::json!({
            "periodo_inicio": "2024-01-01",
            "periodo_fim": "2024-03-31",
            "total_registros": 5,
            "tipos_mais_realizados": {"CASQUEAMENTO": 1, "FERRAGEAMENTO": 4},
        }))
        .unwrap();
        let view = relatorio_view(&r, false);
        assert!(view.contains("01/01/2024 a 31/03/2024"));
        assert!(view.contains("FERRAGEAMENTO (4), CASQUEAMENTO (1)"));
    }
}
