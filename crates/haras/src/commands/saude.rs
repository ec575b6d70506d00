//! Health record command handlers.

use std::str::FromStr;

use strum::IntoEnumIterator;
use tabled::Tabled;

use haras_api::Resource;
use haras_api::models::{
    AplicacaoRapida, EstatisticasSaude, HistoricoSaude, ProximaAplicacao, Saude, TipoRegistro,
};
use haras_core::store::UpcomingBuckets;
use haras_core::{Farm, Labeled, Notice, labels};

use crate::cli::{AplicarArgs, GlobalOpts, SaudeArgs, SaudeCommand};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SaudeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Medicamento")]
    medicamento: String,
    #[tabled(rename = "Veterinário")]
    veterinario: String,
    #[tabled(rename = "Próxima")]
    proxima: String,
    #[tabled(rename = "Custo")]
    custo: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn animal_name(nome: Option<&String>, id: i64) -> String {
    nome.cloned().unwrap_or_else(|| format!("#{id}"))
}

fn row(s: &Saude, color: bool) -> SaudeRow {
    SaudeRow {
        id: s.id,
        animal: animal_name(s.animal_nome.as_ref(), s.id_animal),
        tipo: paint(s.tipo_registro.label(), s.tipo_registro.color(), color),
        data: output::date(s.data_ocorrencia.as_ref()),
        medicamento: output::opt(
            s.medicamento_nome
                .as_ref()
                .or(s.medicamento_aplicado.as_ref()),
        ),
        veterinario: output::opt(s.veterinario_responsavel.as_ref()),
        proxima: output::date(s.proxima_aplicacao.as_ref()),
        custo: output::money(s.custo),
        status: s.status_aplicacao.as_deref().map_or_else(
            || "-".into(),
            |st| paint(st, labels::status_aplicacao_color(st), color),
        ),
    }
}

fn detail(s: &Saude) -> String {
    let mut lines = vec![
        format!("ID:            {}", s.id),
        format!("Animal:        {}", animal_name(s.animal_nome.as_ref(), s.id_animal)),
        format!("Tipo:          {}", s.tipo_registro.label()),
        format!("Data:          {}", output::date(s.data_ocorrencia.as_ref())),
        format!("Descrição:     {}", output::opt(s.descricao.as_ref())),
        format!("Veterinário:   {}", output::opt(s.veterinario_responsavel.as_ref())),
        format!(
            "Medicamento:   {}",
            output::opt(s.medicamento_nome.as_ref().or(s.medicamento_aplicado.as_ref()))
        ),
        format!("Dose:          {}", output::opt(s.dose_aplicada.as_ref())),
    ];
    if let Some(q) = s.quantidade_aplicada {
        let unidade = s.unidade_aplicada.as_deref().unwrap_or("");
        lines.push(format!("Quantidade:    {q} {unidade}").trim_end().to_owned());
    }
    lines.extend([
        format!("Próxima:       {}", output::date(s.proxima_aplicacao.as_ref())),
        format!("Custo:         {}", output::money(s.custo)),
        format!("Status:        {}", output::opt(s.status_aplicacao.as_ref())),
        format!("Observações:   {}", output::opt(s.observacoes.as_ref())),
    ]);
    lines.join("\n")
}

const VIEW: View<Saude, SaudeRow> = View {
    noun: "Registro de saúde",
    to_row: row,
    detail,
};

#[derive(Tabled)]
struct ProximaRow {
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Dias")]
    dias: i64,
    #[tabled(rename = "Medicamento")]
    medicamento: String,
    #[tabled(rename = "Veterinário")]
    veterinario: String,
}

impl From<&ProximaAplicacao> for ProximaRow {
    fn from(p: &ProximaAplicacao) -> Self {
        Self {
            animal: p.animal_nome.clone(),
            tipo: TipoRegistro::from_str(&p.tipo_registro)
                .map_or_else(|_| p.tipo_registro.clone(), |t| t.label().to_owned()),
            data: output::date(p.data_aplicacao.as_ref()),
            dias: p.dias_restantes,
            medicamento: output::opt(p.medicamento_nome.as_ref()),
            veterinario: output::opt(p.veterinario_responsavel.as_ref()),
        }
    }
}

// ── Sections ────────────────────────────────────────────────────────

fn buckets_view(b: &UpcomingBuckets, color: bool) -> String {
    if b.is_empty() {
        return "Nenhuma aplicação prevista no período.".into();
    }
    let sections = [
        ("Atrasadas", "negative", &b.atrasadas),
        ("Urgentes (até 7 dias)", "warning", &b.urgentes),
        ("Próximas (8 a 30 dias)", "info", &b.proximas),
    ];
    sections
        .iter()
        .filter(|(_, _, rows)| !rows.is_empty())
        .map(|(title, tone, rows)| {
            let heading = paint(&format!("{title} ({})", rows.len()), tone, color);
            let rows: Vec<ProximaRow> = rows.iter().map(ProximaRow::from).collect();
            format!("{heading}\n{}", output::render_table(&rows))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn estatisticas_detail(e: &EstatisticasSaude) -> String {
    [
        format!("Total de registros:    {}", e.total_registros),
        format!("Registros no mês:      {}", e.registros_mes_atual),
        format!("Custo no mês:          {}", labels::format_currency(e.custo_total_mes)),
        format!("Próximas aplicações:   {}", e.proximas_aplicacoes),
        format!("Animais em tratamento: {}", e.animais_em_tratamento),
        format!("Vacinas:               {}", e.total_vacinas),
        format!("Vermífugos:            {}", e.total_vermifugos),
        format!("Medicamentos:          {}", e.total_medicamentos),
        format!("Exames:                {}", e.total_exames),
        format!("Consultas:             {}", e.total_consultas),
    ]
    .join("\n")
}

fn historico_view(h: &HistoricoSaude, color: bool) -> String {
    let mut out = format!(
        "{} (#{}) - {}\nCusto total: {}",
        h.animal_nome,
        h.animal_id,
        if h.periodo_analise.is_empty() { "-" } else { &h.periodo_analise },
        output::money(h.total_custo),
    );
    if !h.resumo_tipos.is_empty() {
        let resumo = h
            .resumo_tipos
            .iter()
            .map(|(tipo, n)| {
                let label = TipoRegistro::from_str(tipo).map_or(tipo.as_str(), |t| t.label());
                format!("{label}: {n}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("\nPor tipo: {resumo}"));
    }
    if !h.registros.is_empty() {
        out.push('\n');
        let rows: Vec<SaudeRow> = h.registros.iter().map(|s| row(s, color)).collect();
        out.push_str(&output::render_table(&rows));
    }
    out
}

// ── Quick application ───────────────────────────────────────────────

fn aplicacao(args: AplicarArgs) -> Result<AplicacaoRapida, CliError> {
    let tipo = TipoRegistro::from_str(&args.tipo.to_uppercase()).map_err(|_| {
        CliError::Validation {
            field: "tipo".into(),
            reason: format!("'{}' is not one of {}", args.tipo, tipo_registro_codes()),
        }
    })?;
    if args.medicamento.is_some() && args.quantidade.is_none() {
        return Err(CliError::Validation {
            field: "quantidade".into(),
            reason: "required when --medicamento is given".into(),
        });
    }
    Ok(AplicacaoRapida {
        id_animal: args.animal,
        tipo_registro: tipo,
        id_medicamento: args.medicamento,
        quantidade_aplicada: args.quantidade,
        medicamento_aplicado: args.medicamento_nome,
        dose_aplicada: args.dose,
        veterinario_responsavel: args.veterinario,
        observacoes: args.observacoes,
    })
}

fn tipo_registro_codes() -> String {
    TipoRegistro::iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(farm: &Farm, args: SaudeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());
    let err = |e| CliError::from_core(e, Saude::SPEC.name);

    match args.command {
        SaudeCommand::Crud(cmd) => crud::handle(farm.saude(), cmd, &VIEW, global).await,

        SaudeCommand::Proximas { dias } => {
            let buckets = farm.upcoming_applications(dias).await.map_err(err)?;
            let out = output::render_single(
                format,
                &buckets,
                |b| buckets_view(b, color),
                |b| {
                    b.atrasadas
                        .iter()
                        .chain(&b.urgentes)
                        .chain(&b.proximas)
                        .map(|p| p.animal_id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SaudeCommand::Aplicar(aplicar) => {
            let dados = aplicacao(aplicar)?;
            let registro = farm.api().aplicacao_rapida(&dados).await?;
            output::print_notice(
                &Notice::success("Aplicação registrada com sucesso!"),
                global.quiet,
                color,
            );
            let out = output::render_single(format, &registro, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SaudeCommand::Estatisticas => {
            let stats = farm.api().estatisticas_saude().await?;
            let out = output::render_single(format, &stats, estatisticas_detail, |e| {
                e.total_registros.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SaudeCommand::Historico { animal_id, meses } => {
            let historico = farm.api().historico_saude(animal_id, meses).await?;
            let out = output::render_single(
                format,
                &historico,
                |h| historico_view(h, color),
                |h| {
                    h.registros
                        .iter()
                        .map(|s| s.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SaudeCommand::PorStatus(list) => {
            let state = crud::load(farm.saude(), &list).await?;
            let groups = state.por_status();
            let out = output::render_single(
                format,
                &groups,
                |g| {
                    g.iter()
                        .map(|(status, registros)| {
                            let heading = paint(
                                &format!("{status} ({})", registros.len()),
                                labels::status_aplicacao_color(status),
                                color,
                            );
                            let rows: Vec<SaudeRow> =
                                registros.iter().map(|s| row(s, color)).collect();
                            format!("{heading}\n{}", output::render_table(&rows))
                        })
                        .collect::<Vec<_>>()
                        .join("\n\n")
                },
                |g| g.keys().cloned().collect::<Vec<_>>().join("\n"),
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

    fn aplicar(tipo: &str) -> AplicarArgs {
        AplicarArgs {
            animal: 4,
            tipo: tipo.into(),
            medicamento: None,
            quantidade: None,
            medicamento_nome: Some("Vacina Influenza".into()),
            dose: Some("5 ml".into()),
            veterinario: None,
            observacoes: None,
        }
    }

    #[test]
    fn aplicacao_accepts_lowercase_type() {
        let dados = aplicacao(aplicar("vacina")).unwrap();
        assert_eq!(dados.tipo_registro, TipoRegistro::Vacina);
        assert_eq!(dados.id_animal, 4);
    }

    #[test]
    fn aplicacao_rejects_unknown_type() {
        let err = aplicacao(aplicar("banho")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Validation { ref reason, .. } if reason.contains("VERMIFUGO")
        ));
    }

    #[test]
    fn stock_medicine_needs_a_quantity() {
        let mut args = aplicar("MEDICAMENTO");
        args.medicamento = Some(9);
        let err = aplicacao(args).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "quantidade"));
    }

    #[test]
    fn empty_buckets_say_so() {
        let out = buckets_view(&UpcomingBuckets::default(), false);
        assert!(out.contains("Nenhuma"));
    }

    #[test]
    fn buckets_list_sections_with_counts() {
        let overdue: ProximaAplicacao = serde_json::from_value(serde_json::json!({
            "animal_id": 1,
            "animal_nome": "Estrela",
            "tipo_registro": "VACINA",
            "data_aplicacao": "2024-01-10",
            "dias_restantes": -3,
        }))
        .unwrap();
        let buckets = UpcomingBuckets::split([overdue]);
        let out = buckets_view(&buckets, false);
        assert!(out.starts_with("Atrasadas (1)"), "{out}");
        assert!(out.contains("10/01/2024"), "{out}");
        assert!(!out.contains("Urgentes"), "{out}");
    }
}
