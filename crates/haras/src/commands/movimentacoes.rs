//! Animal movement command handlers.

use tabled::Tabled;

use haras_api::models::{HistoricoMovimentacao, LocalizacaoAtual, Movimentacao};
use haras_core::{Farm, Labeled};

use crate::cli::{GlobalOpts, MovimentacoesArgs, MovimentacoesCommand};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};

#[derive(Tabled)]
struct MovimentacaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Origem")]
    origem: String,
    #[tabled(rename = "Destino")]
    destino: String,
    #[tabled(rename = "Motivo")]
    motivo: String,
}

/// Paddock name, paddock id, external place, in that order.
fn lugar(nome: Option<&String>, terreno: Option<i64>, externo: Option<&String>) -> String {
    match (nome, terreno, externo) {
        (Some(n), _, _) => n.clone(),
        (None, Some(id), _) => format!("Terreno #{id}"),
        (None, None, Some(e)) => e.clone(),
        (None, None, None) => "-".into(),
    }
}

fn origem(m: &Movimentacao) -> String {
    lugar(
        m.terreno_origem_nome.as_ref(),
        m.id_terreno_origem,
        m.origem_externa.as_ref(),
    )
}

fn destino(m: &Movimentacao) -> String {
    lugar(
        m.terreno_destino_nome.as_ref(),
        m.id_terreno_destino,
        m.destino_externo.as_ref(),
    )
}

fn row(m: &Movimentacao, color: bool) -> MovimentacaoRow {
    MovimentacaoRow {
        id: m.id,
        data: output::date(m.data_movimentacao.as_ref()),
        animal: m
            .animal_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", m.id_animal)),
        tipo: paint(m.tipo_movimentacao.label(), m.tipo_movimentacao.color(), color),
        origem: origem(m),
        destino: destino(m),
        motivo: output::opt(m.motivo.as_ref()),
    }
}

fn detail(m: &Movimentacao) -> String {
    [
        format!("ID:          {}", m.id),
        format!("Animal:      {} (#{})", output::opt(m.animal_nome.as_ref()), m.id_animal),
        format!("Tipo:        {}", m.tipo_movimentacao.label()),
        format!("Data:        {}", output::date(m.data_movimentacao.as_ref())),
        format!("Origem:      {}", origem(m)),
        format!("Destino:     {}", destino(m)),
        format!("Motivo:      {}", output::opt(m.motivo.as_ref())),
        format!("Observações: {}", output::opt(m.observacoes.as_ref())),
    ]
    .join("\n")
}

const VIEW: View<Movimentacao, MovimentacaoRow> = View {
    noun: "Registro de movimentação",
    to_row: row,
    detail,
};

#[derive(Tabled)]
struct LocalizacaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Localização")]
    localizacao: String,
    #[tabled(rename = "Desde")]
    desde: String,
    #[tabled(rename = "Última movimentação")]
    tipo: String,
}

fn localizacao_row(l: &LocalizacaoAtual) -> LocalizacaoRow {
    let localizacao = l
        .localizacao
        .as_ref()
        .or(l.terreno_atual.as_ref())
        .or(l.local_externo.as_ref());
    LocalizacaoRow {
        id: l.animal_id,
        animal: l.animal_nome.clone(),
        localizacao: output::opt(localizacao),
        desde: output::date(l.data_ultima_movimentacao.as_ref()),
        tipo: output::opt(l.tipo_ultima_movimentacao.as_ref()),
    }
}

fn historico_view(h: &HistoricoMovimentacao, color: bool) -> String {
    let heading = format!("Localização atual: {}", h.localizacao_atual);
    if h.movimentacoes.is_empty() {
        return format!("{heading}\n\nNenhuma movimentação registrada.");
    }
    let rows: Vec<MovimentacaoRow> = h.movimentacoes.iter().map(|m| row(m, color)).collect();
    format!("{heading}\n\n{}", output::render_table(&rows))
}

pub async fn handle(
    farm: &Farm,
    args: MovimentacoesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    match args.command {
        MovimentacoesCommand::Crud(cmd) => {
            crud::handle(farm.movimentacoes(), cmd, &VIEW, global).await
        }

        MovimentacoesCommand::Localizacoes { animal, terreno } => {
            let locais = farm.api().localizacoes(animal, terreno).await?;
            let out =
                output::render_list(format, &locais, localizacao_row, |l| l.animal_id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MovimentacoesCommand::Historico { animal_id } => {
            let historico = farm.api().historico_movimentacoes(animal_id).await?;
            let out = output::render_single(
                format,
                &historico,
                |h| historico_view(h, color),
                |h| h.localizacao_atual.clone(),
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

    fn movimentacao(value: serde_json::Value) -> Movimentacao {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn places_prefer_paddock_names() {
        let m = movimentacao(serde_json::json!({
            "ID": 1,
            "ID_ANIMAL": 7,
            "TIPO_MOVIMENTACAO": "TRANSFERENCIA",
            "ID_TERRENO_ORIGEM": 2,
            "ID_TERRENO_DESTINO": 3,
            "terreno_destino_nome": "Piquete Sul",
        }));
        assert_eq!(origem(&m), "Terreno #2");
        assert_eq!(destino(&m), "Piquete Sul");
    }

    #[test]
    fn external_places_are_shown_for_sales() {
        let m = movimentacao(serde_json::json!({
            "ID": 2,
            "ID_ANIMAL": 7,
            "TIPO_MOVIMENTACAO": "VENDA",
            "ID_TERRENO_ORIGEM": 2,
            "DESTINO_EXTERNO": "Haras Boa Vista",
        }));
        let r = row(&m, false);
        assert_eq!(r.destino, "Haras Boa Vista");
        assert_eq!(r.tipo, "Venda");
        assert_eq!(r.animal, "#7");
    }

    #[test]
    fn history_heading_names_current_place() {
        let h = HistoricoMovimentacao {
            movimentacoes: Vec::new(),
            localizacao_atual: "Piquete Norte".into(),
        };
        assert_eq!(
            historico_view(&h, false),
            "Localização atual: Piquete Norte\n\nNenhuma movimentação registrada."
        );
    }
}
