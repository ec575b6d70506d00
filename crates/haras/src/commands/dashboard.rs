//! Dashboard command handler.

use serde::Serialize;
use tabled::Tabled;

use haras_api::models::{AlertaEstoque, AlertaSaude, CustoProprietario, Dashboard};
use haras_core::store::{CriticalAlert, DashboardSummary};
use haras_core::{Farm, labels};

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, paint};

use super::util;

// ── Rows ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertaSaudeRow {
    #[tabled(rename = "Prioridade")]
    prioridade: String,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Alerta")]
    tipo: String,
    #[tabled(rename = "Descrição")]
    descricao: String,
    #[tabled(rename = "Vencimento")]
    vencimento: String,
    #[tabled(rename = "Atraso")]
    atraso: String,
}

fn saude_row(a: &AlertaSaude, color: bool) -> AlertaSaudeRow {
    AlertaSaudeRow {
        prioridade: paint(&a.prioridade, labels::prioridade_color(&a.prioridade), color),
        animal: format!("{} (#{})", a.animal_nome, a.animal_id),
        tipo: a.tipo_alerta.clone(),
        descricao: a.descricao.clone(),
        vencimento: output::date(a.data_vencimento.as_ref()),
        atraso: if a.dias_atraso > 0 {
            format!("{} dias", a.dias_atraso)
        } else {
            "-".into()
        },
    }
}

#[derive(Tabled)]
struct AlertaEstoqueRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Mínimo")]
    minimo: String,
    #[tabled(rename = "Vence em")]
    vencimento: String,
}

fn estoque_row(a: &AlertaEstoque, color: bool) -> AlertaEstoqueRow {
    AlertaEstoqueRow {
        status: paint(&a.status, labels::alerta_estoque_color(&a.status), color),
        produto: a.produto_nome.clone(),
        tipo: labels::tipo_estoque_label(&a.tipo_produto).to_owned(),
        estoque: format!("{} {}", a.estoque_atual, a.unidade_medida),
        minimo: format!("{} {}", a.estoque_minimo, a.unidade_medida),
        vencimento: a
            .dias_vencimento
            .map_or_else(|| "-".into(), |d| format!("{d} dias")),
    }
}

#[derive(Tabled)]
struct CustoRow {
    #[tabled(rename = "Proprietário")]
    proprietario: String,
    #[tabled(rename = "Animais")]
    animais: u64,
    #[tabled(rename = "Medicamentos")]
    medicamentos: String,
    #[tabled(rename = "Ração")]
    racao: String,
    #[tabled(rename = "Manejo")]
    manejo: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Por animal")]
    por_animal: String,
}

fn custo_row(c: &CustoProprietario) -> CustoRow {
    CustoRow {
        proprietario: c.proprietario.clone(),
        animais: c.numero_animais,
        medicamentos: labels::format_currency(c.total_medicamentos),
        racao: labels::format_currency(c.total_racao),
        manejo: labels::format_currency(c.total_manejo),
        total: labels::format_currency(c.total_geral),
        por_animal: labels::format_currency(c.custo_por_animal),
    }
}

// ── Views ───────────────────────────────────────────────────────────

fn section(title: &str, body: String) -> String {
    format!("{title}\n{body}")
}

fn dashboard_view(d: &Dashboard, summary: &DashboardSummary, color: bool) -> String {
    let k = &d.kpis;
    let mut parts = vec![section(
        "Indicadores",
        [
            format!("  Animais:              {}", k.total_animais),
            format!("  Terrenos:             {}", k.total_terrenos),
            format!("  Em tratamento:        {}", k.animais_tratamento),
            format!("  Alertas de estoque:   {}", k.alertas_estoque),
            format!("  Próximas aplicações:  {}", k.proximas_aplicacoes),
            format!("  Gestações ativas:     {}", k.gestacoes_ativas),
        ]
        .join("\n"),
    )];

    if !d.alertas_saude.is_empty() {
        let rows: Vec<AlertaSaudeRow> = d.alertas_saude.iter().map(|a| saude_row(a, color)).collect();
        parts.push(section("Alertas de saúde", output::render_table(&rows)));
    }
    if !d.alertas_estoque.is_empty() {
        let rows: Vec<AlertaEstoqueRow> =
            d.alertas_estoque.iter().map(|a| estoque_row(a, color)).collect();
        parts.push(section("Alertas de estoque", output::render_table(&rows)));
    }
    if !d.custos_proprietarios.is_empty() {
        let rows: Vec<CustoRow> = d.custos_proprietarios.iter().map(custo_row).collect();
        let periodo = d
            .custos_proprietarios
            .first()
            .map(|c| c.periodo.as_str())
            .unwrap_or_default();
        let title = if periodo.is_empty() {
            "Custos por proprietário".to_owned()
        } else {
            format!("Custos por proprietário ({periodo})")
        };
        parts.push(section(&title, output::render_table(&rows)));
    }

    let criticos = if summary.alertas_criticos > 0 {
        paint(
            &format!("{} críticos", summary.alertas_criticos),
            "negative",
            color,
        )
    } else {
        "nenhum crítico".into()
    };
    let mut footer = format!(
        "{} alertas ({criticos}) · custo total {}",
        summary.total_alertas,
        labels::format_currency(summary.custo_total)
    );
    if let Some(ref at) = d.ultimo_update {
        footer.push_str(&format!(" · atualizado em {at}"));
    }
    parts.push(footer);
    parts.join("\n\n")
}

/// Critical alerts split by kind, for structured output.
#[derive(Serialize)]
struct Criticos<'a> {
    saude: Vec<&'a AlertaSaude>,
    estoque: Vec<&'a AlertaEstoque>,
}

impl<'a> Criticos<'a> {
    fn from_alerts(alerts: &[CriticalAlert<'a>]) -> Self {
        let mut out = Self {
            saude: Vec::new(),
            estoque: Vec::new(),
        };
        for alert in alerts {
            match *alert {
                CriticalAlert::Saude(a) => out.saude.push(a),
                CriticalAlert::Estoque(a) => out.estoque.push(a),
            }
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.saude.is_empty() && self.estoque.is_empty()
    }
}

fn criticos_view(c: &Criticos<'_>, color: bool) -> String {
    if c.is_empty() {
        return "Nenhum alerta crítico.".into();
    }
    let mut parts = Vec::new();
    if !c.saude.is_empty() {
        let rows: Vec<AlertaSaudeRow> = c.saude.iter().map(|a| saude_row(a, color)).collect();
        parts.push(section("Saúde", output::render_table(&rows)));
    }
    if !c.estoque.is_empty() {
        let rows: Vec<AlertaEstoqueRow> = c.estoque.iter().map(|a| estoque_row(a, color)).collect();
        parts.push(section("Estoque", output::render_table(&rows)));
    }
    parts.join("\n\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(farm: &Farm, args: DashboardArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());
    let filter = util::period_filter(&args.period, args.proprietario)?;

    let dashboard = farm.dashboard().load(&filter).await?;
    let state = farm.dashboard().snapshot();

    let out = if args.criticos {
        let alerts = state.alertas_criticos();
        let criticos = Criticos::from_alerts(&alerts);
        output::render_single(
            format,
            &criticos,
            |c| criticos_view(c, color),
            |c| {
                c.saude
                    .iter()
                    .map(|a| a.animal_id.to_string())
                    .chain(c.estoque.iter().map(|a| a.produto_id.to_string()))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        )
    } else {
        let summary = state.summary();
        output::render_single(
            format,
            &dashboard,
            |d| dashboard_view(d, &summary, color),
            |d| d.kpis.total_animais.to_string(),
        )
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn alerta_saude(prioridade: &str) -> AlertaSaude {
        AlertaSaude {
            animal_id: 4,
            animal_nome: "Estrela".into(),
            tipo_alerta: "VACINA".into(),
            descricao: "Influenza vencida".into(),
            dias_atraso: 3,
            prioridade: prioridade.into(),
            data_vencimento: Some("2024-05-01".into()),
        }
    }

    fn alerta_estoque(status: &str) -> AlertaEstoque {
        AlertaEstoque {
            produto_id: 9,
            produto_nome: "Ivermectina".into(),
            tipo_produto: "MEDICAMENTO".into(),
            estoque_atual: 2.0,
            estoque_minimo: 10.0,
            unidade_medida: "ml".into(),
            status: status.into(),
            dias_vencimento: None,
        }
    }

    #[test]
    fn critical_alerts_are_split_by_kind() {
        let saude = alerta_saude("ALTA");
        let estoque = alerta_estoque("CRITICO");
        let alerts = [CriticalAlert::Estoque(&estoque), CriticalAlert::Saude(&saude)];
        let c = Criticos::from_alerts(&alerts);
        assert_eq!(c.saude.len(), 1);
        assert_eq!(c.estoque.len(), 1);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["estoque"][0]["produto_nome"], "Ivermectina");
    }

    #[test]
    fn no_critical_alerts_says_so() {
        let c = Criticos::from_alerts(&[]);
        assert_eq!(criticos_view(&c, false), "Nenhum alerta crítico.");
    }

    #[test]
    fn view_skips_empty_sections_and_ends_with_summary() {
        let d = Dashboard {
            alertas_saude: vec![alerta_saude("MEDIA")],
            ..Dashboard::default()
        };
        let summary = DashboardSummary {
            total_alertas: 1,
            alertas_criticos: 0,
            custo_total: 0.0,
        };
        let out = dashboard_view(&d, &summary, false);
        assert!(out.starts_with("Indicadores\n"));
        assert!(out.contains("\n\nAlertas de saúde\n"));
        // The KPI block always counts stock alerts; only the section is skipped.
        assert!(out.contains("  Alertas de estoque:   0"));
        assert!(!out.contains("\n\nAlertas de estoque\n"));
        assert!(!out.contains("Custos por proprietário"));
        assert!(out.ends_with("1 alertas (nenhum crítico) · custo total R$ 0,00"));
    }

    #[test]
    fn stock_row_uses_product_kind_label() {
        let r = estoque_row(&alerta_estoque("BAIXO"), false);
        assert_eq!(r.tipo, "Medicamento");
        assert_eq!(r.estoque, "2 ml");
        assert_eq!(r.vencimento, "-");
    }
}
