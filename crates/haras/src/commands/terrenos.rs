//! Paddock command handlers.

use tabled::Tabled;

use haras_api::Resource;
use haras_api::models::{RelatorioTerreno, Terreno};
use haras_core::store::TerrenoStats;
use haras_core::{Farm, Labeled, labels};

use crate::cli::{GlobalOpts, TerrenosArgs, TerrenosCommand};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};

#[derive(Tabled)]
struct TerrenoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Área (ha)")]
    area: String,
    #[tabled(rename = "Pastagem")]
    pastagem: String,
    #[tabled(rename = "Capacidade")]
    capacidade: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Known statuses get their label and color; anything else is shown raw.
fn status_cell(t: &Terreno, color: bool) -> String {
    match t.status() {
        Some(s) => paint(s.label(), s.color(), color),
        None if t.status_terreno.is_empty() => "-".into(),
        None => t.status_terreno.clone(),
    }
}

fn row(t: &Terreno, color: bool) -> TerrenoRow {
    TerrenoRow {
        id: t.id,
        nome: t.nome.clone(),
        area: output::opt(t.area_hectares.as_ref()),
        pastagem: output::opt(t.tipo_pastagem.as_ref()),
        capacidade: output::opt(t.capacidade_animais.as_ref()),
        status: status_cell(t, color),
    }
}

fn detail(t: &Terreno) -> String {
    let coords = match (t.latitude, t.longitude) {
        (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
        _ => "-".into(),
    };
    [
        format!("ID:          {}", t.id),
        format!("Nome:        {}", t.nome),
        format!("Área (ha):   {}", output::opt(t.area_hectares.as_ref())),
        format!("Solo:        {}", output::opt(t.tipo_solo.as_ref())),
        format!("Topografia:  {}", output::opt(t.topografia.as_ref())),
        format!("Pastagem:    {}", output::opt(t.tipo_pastagem.as_ref())),
        format!("Capacidade:  {}", output::opt(t.capacidade_animais.as_ref())),
        format!("Coordenadas: {coords}"),
        format!("Status:      {}", status_cell(t, false)),
        format!("Observações: {}", output::opt(t.observacoes.as_ref())),
    ]
    .join("\n")
}

const VIEW: View<Terreno, TerrenoRow> = View {
    noun: "Terreno",
    to_row: row,
    detail,
};

fn relatorio_detail(r: &RelatorioTerreno) -> String {
    [
        format!("Terreno:            {} (#{})", r.terreno_nome, r.terreno_id),
        format!("Área (ha):          {}", r.area_hectares),
        format!("Uso:                {}", r.tipo_uso),
        format!("Animais atuais:     {}", r.animais_atuais),
        format!("Capacidade máxima:  {}", output::opt(r.capacidade_maxima.as_ref())),
        format!(
            "Ocupação:           {}",
            r.taxa_ocupacao.map_or_else(|| "-".into(), |t| format!("{t:.1}%"))
        ),
        format!("Última aplicação:   {}", output::date(r.ultima_aplicacao.as_ref())),
        format!("Produtos aplicados: {}", r.produtos_aplicados),
        format!("Custo de manejo:    {}", labels::format_currency(r.custo_manejo)),
        format!("Última análise:     {}", output::date(r.ultima_analise.as_ref())),
        format!("pH médio:           {}", output::opt(r.ph_medio.as_ref())),
    ]
    .join("\n")
}

fn stats_detail(s: &TerrenoStats) -> String {
    [
        format!("Total:       {}", s.total),
        format!("Disponíveis: {}", s.disponiveis),
        format!("Ocupados:    {}", s.ocupados),
        format!("Manutenção:  {}", s.manutencao),
        format!("Área total:  {} ha", s.area_total),
    ]
    .join("\n")
}

pub async fn handle(farm: &Farm, args: TerrenosArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output_format();

    match args.command {
        TerrenosCommand::Crud(cmd) => crud::handle(farm.terrenos(), cmd, &VIEW, global).await,

        TerrenosCommand::Relatorio { id } => {
            let report = farm
                .dashboard()
                .relatorio_terreno(id)
                .await
                .map_err(|e| CliError::from_core(e, Terreno::SPEC.name))?;
            let out = output::render_single(format, &report, relatorio_detail, |r| {
                r.terreno_id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TerrenosCommand::Resumo(list) => {
            let state = crud::load(farm.terrenos(), &list).await?;
            let stats = state.estatisticas();
            let out = output::render_single(format, &stats, stats_detail, |s| s.total.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn terreno(status: &str) -> Terreno {
        serde_json::from_value(serde_json::json!({
            "ID": 3,
            "NOME": "Piquete Norte",
            "STATUS_TERRENO": status,
        }))
        .unwrap()
    }

    #[test]
    fn status_accepts_both_spellings_of_maintenance() {
        assert_eq!(status_cell(&terreno("MANUTENCAO"), false), "Manutenção");
        assert_eq!(status_cell(&terreno("MANUTENÇÃO"), false), "Manutenção");
    }

    #[test]
    fn unknown_status_is_shown_raw() {
        assert_eq!(status_cell(&terreno("RESERVADO"), false), "RESERVADO");
        assert_eq!(status_cell(&terreno(""), false), "-");
    }
}
