//! Field-management application command handlers.

use tabled::Tabled;

use haras_api::models::AplicacaoManejo;
use haras_core::store::ManejoStats;
use haras_core::{Farm, Labeled, labels};

use crate::cli::{AplicacoesArgs, AplicacoesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::crud::{self, View};

#[derive(Tabled)]
struct AplicacaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Terreno")]
    terreno: String,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Manejo")]
    tipo: &'static str,
    #[tabled(rename = "Quantidade")]
    quantidade: String,
    #[tabled(rename = "Área (ha)")]
    area: String,
    #[tabled(rename = "Custo")]
    custo: String,
}

fn row(a: &AplicacaoManejo, _color: bool) -> AplicacaoRow {
    AplicacaoRow {
        id: a.id,
        data: output::date(a.data_aplicacao.as_ref()),
        terreno: a
            .terreno_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", a.id_terreno)),
        produto: a
            .produto_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", a.id_produto)),
        tipo: a.tipo_manejo.label(),
        quantidade: format!("{} {}", a.quantidade, a.unidade_medida),
        area: output::opt(a.area_aplicada.as_ref()),
        custo: output::money(a.custo_total),
    }
}

const VIEW: View<AplicacaoManejo, AplicacaoRow> = View {
    noun: "Registro de aplicação",
    to_row: row,
    detail: output::render_detail,
};

fn stats_detail(s: &ManejoStats) -> String {
    [
        format!("Aplicações:          {}", s.total_aplicacoes),
        format!("Custo total:         {}", labels::format_currency(s.custo_total)),
        format!("Terrenos manejados:  {}", s.terrenos_manejados),
    ]
    .join("\n")
}

pub async fn handle(
    farm: &Farm,
    args: AplicacoesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AplicacoesCommand::Crud(cmd) => crud::handle(farm.aplicacoes(), cmd, &VIEW, global).await,

        AplicacoesCommand::Resumo(list) => {
            let state = crud::load(farm.aplicacoes(), &list).await?;
            let stats = state.estatisticas();
            let out = output::render_single(global.output_format(), &stats, stats_detail, |s| {
                s.total_aplicacoes.to_string()
            });
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
    fn row_names_paddock_and_product_by_id_when_unjoined() {
        let a: AplicacaoManejo = serde_json::from_value(serde_json::json!({
            "ID": 11,
            "ID_TERRENO": 2,
            "ID_PRODUTO": 5,
            "TIPO_MANEJO": "ADUBACAO",
            "QUANTIDADE": 150.0,
            "UNIDADE_MEDIDA": "kg",
        }))
        .unwrap();
        let r = row(&a, false);
        assert_eq!(r.terreno, "#2");
        assert_eq!(r.produto, "#5");
        assert_eq!(r.tipo, "Adubação");
        assert_eq!(r.quantidade, "150 kg");
        assert_eq!(r.custo, "-");
    }
}
