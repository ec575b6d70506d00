//! Reproduction command handlers.

use tabled::Tabled;

use haras_api::models::{EstatisticasReproducao, EventoReproducao, HistoricoEgua, Reproducao};
use haras_core::{Farm, Labeled};

use crate::cli::{GlobalOpts, ReproducaoArgs, ReproducaoCommand};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};

#[derive(Tabled)]
struct ReproducaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Égua")]
    egua: String,
    #[tabled(rename = "Parceiro")]
    parceiro: String,
    #[tabled(rename = "Cobertura")]
    tipo: &'static str,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Diagnóstico")]
    resultado: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Parto previsto")]
    parto: String,
}

fn egua(r: &Reproducao) -> String {
    r.egua_nome.clone().unwrap_or_else(|| format!("#{}", r.id_egua))
}

fn parceiro(r: &Reproducao) -> String {
    match (&r.parceiro_nome, r.id_parceiro) {
        (Some(nome), _) => nome.clone(),
        (None, Some(id)) => format!("#{id}"),
        (None, None) => "-".into(),
    }
}

fn row(r: &Reproducao, color: bool) -> ReproducaoRow {
    ReproducaoRow {
        id: r.id,
        egua: egua(r),
        parceiro: parceiro(r),
        tipo: r.tipo_cobertura.label(),
        data: output::date(r.data_cobertura.as_ref()),
        resultado: paint(
            r.resultado_diagnostico.label(),
            r.resultado_diagnostico.color(),
            color,
        ),
        status: paint(r.status_reproducao.label(), r.status_reproducao.color(), color),
        parto: output::date(r.data_parto_prevista.as_ref()),
    }
}

fn detail(r: &Reproducao) -> String {
    let mut lines = vec![
        format!("ID:              {}", r.id),
        format!("Égua:            {} (#{})", egua(r), r.id_egua),
        format!("Parceiro:        {}", parceiro(r)),
        format!("Cobertura:       {}", r.tipo_cobertura.label()),
        format!("Data cobertura:  {}", output::date(r.data_cobertura.as_ref())),
        format!("Diagnóstico:     {}", output::date(r.data_diagnostico.as_ref())),
        format!("Resultado:       {}", r.resultado_diagnostico.label()),
        format!("Parto previsto:  {}", output::date(r.data_parto_prevista.as_ref())),
        format!("Parto real:      {}", output::date(r.data_parto_real.as_ref())),
        format!("Status:          {}", r.status_reproducao.label()),
    ];
    if let Some(dias) = r.dias_gestacao {
        lines.push(format!("Gestação:        {dias} dias"));
    }
    if let Some(ref obs) = r.observacoes {
        lines.push(format!("Observações:     {obs}"));
    }
    lines.join("\n")
}

const VIEW: View<Reproducao, ReproducaoRow> = View {
    noun: "Registro de reprodução",
    to_row: row,
    detail,
};

fn estatisticas_detail(e: &EstatisticasReproducao) -> String {
    [
        format!("Coberturas:        {}", e.total_coberturas),
        format!("  positivas:       {}", e.coberturas_positivas),
        format!("  negativas:       {}", e.coberturas_negativas),
        format!("  pendentes:       {}", e.coberturas_pendentes),
        format!("Taxa de sucesso:   {:.1}%", e.taxa_sucesso),
        format!("Partos realizados: {}", e.partos_realizados),
        format!("Gestações ativas:  {}", e.gestacoes_ativas),
    ]
    .join("\n")
}

#[derive(Tabled)]
struct EventoRow {
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Faltam")]
    faltam: String,
    #[tabled(rename = "Égua")]
    egua: String,
    #[tabled(rename = "Evento")]
    evento: String,
    #[tabled(rename = "Observações")]
    observacoes: String,
}

fn faltam(dias: i64) -> String {
    match dias {
        0 => "hoje".into(),
        1 => "1 dia".into(),
        d if d < 0 => format!("{} dias atrás", -d),
        d => format!("{d} dias"),
    }
}

fn evento_row(e: &EventoReproducao) -> EventoRow {
    EventoRow {
        data: output::date(Some(&e.data_evento)),
        faltam: faltam(e.dias_restantes),
        egua: format!("{} (#{})", e.egua_nome, e.egua_id),
        evento: e.evento_tipo.clone(),
        observacoes: output::opt(e.observacoes.as_ref()),
    }
}

fn historico_view(h: &HistoricoEgua, color: bool) -> String {
    let summary = format!(
        "Coberturas: {}  Partos: {}  Taxa de sucesso: {:.1}%",
        h.total_coberturas, h.partos_realizados, h.taxa_sucesso
    );
    if h.reproducoes.is_empty() {
        return format!("{summary}\n\nNenhuma cobertura registrada.");
    }
    let rows: Vec<ReproducaoRow> = h.reproducoes.iter().map(|r| row(r, color)).collect();
    format!("{summary}\n\n{}", output::render_table(&rows))
}

pub async fn handle(
    farm: &Farm,
    args: ReproducaoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    match args.command {
        ReproducaoCommand::Crud(cmd) => crud::handle(farm.reproducao(), cmd, &VIEW, global).await,

        ReproducaoCommand::Estatisticas { ano } => {
            let stats = farm.api().estatisticas_reproducao(ano).await?;
            let out = output::render_single(format, &stats, estatisticas_detail, |s| {
                s.total_coberturas.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReproducaoCommand::Calendario { dias } => {
            let eventos = farm.api().calendario_reproducao(dias).await?;
            let out = output::render_list(format, &eventos, evento_row, |e| e.egua_id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReproducaoCommand::HistoricoEgua { id } => {
            let historico = farm.api().historico_egua(id).await?;
            let out = output::render_single(
                format,
                &historico,
                |h| historico_view(h, color),
                |h| {
                    h.reproducoes
                        .iter()
                        .map(|r| r.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReproducaoCommand::Gestacoes(list) => {
            let state = crud::load(farm.reproducao(), &list).await?;
            let gestacoes = state.gestacoes_ativas();
            let out = output::render_list(
                format,
                &gestacoes,
                |r| row(r, color),
                |r| r.id.to_string(),
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

    fn reproducao(value: serde_json::Value) -> Reproducao {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn partner_falls_back_to_id_then_dash() {
        let named = reproducao(serde_json::json!({
            "ID": 1, "ID_EGUA": 4, "ID_PARCEIRO": 9, "TIPO_COBERTURA": "NATURAL",
            "parceiro_nome": "Trovão",
        }));
        let unnamed = reproducao(serde_json::json!({
            "ID": 2, "ID_EGUA": 4, "ID_PARCEIRO": 9, "TIPO_COBERTURA": "IA",
        }));
        let none = reproducao(serde_json::json!({
            "ID": 3, "ID_EGUA": 4, "TIPO_COBERTURA": "TE",
        }));
        assert_eq!(parceiro(&named), "Trovão");
        assert_eq!(parceiro(&unnamed), "#9");
        assert_eq!(parceiro(&none), "-");
    }

    #[test]
    fn countdown_reads_naturally() {
        assert_eq!(faltam(0), "hoje");
        assert_eq!(faltam(1), "1 dia");
        assert_eq!(faltam(12), "12 dias");
        assert_eq!(faltam(-3), "3 dias atrás");
    }

    #[test]
    fn empty_history_says_so() {
        let h = HistoricoEgua {
            reproducoes: Vec::new(),
            total_coberturas: 0,
            partos_realizados: 0,
            taxa_sucesso: 0.0,
        };
        let out = historico_view(&h, false);
        assert!(out.ends_with("Nenhuma cobertura registrada."));
        assert!(out.starts_with("Coberturas: 0"));
    }
}
