//! Growth measurement command handlers.

use tabled::Tabled;

use haras_api::models::Crescimento;
use haras_core::Farm;

use crate::cli::{CrescimentoArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::crud::{self, View};

#[derive(Tabled)]
struct CrescimentoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Peso (kg)")]
    peso: String,
    #[tabled(rename = "Altura (cm)")]
    altura: String,
    #[tabled(rename = "Tórax (cm)")]
    torax: String,
    #[tabled(rename = "Intervalo")]
    intervalo: String,
}

fn row(c: &Crescimento, _color: bool) -> CrescimentoRow {
    CrescimentoRow {
        id: c.id,
        animal: c
            .animal_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", c.id_animal)),
        data: output::date(c.data_medicao.as_ref()),
        peso: output::opt(c.peso.as_ref()),
        altura: output::opt(c.altura.as_ref()),
        torax: output::opt(c.circunferencia_toracica.as_ref()),
        intervalo: c
            .dias_desde_ultima
            .map_or_else(|| "-".into(), |d| format!("{d} dias")),
    }
}

const VIEW: View<Crescimento, CrescimentoRow> = View {
    noun: "Registro de crescimento",
    to_row: row,
    detail: output::render_detail,
};

pub async fn handle(
    farm: &Farm,
    args: CrescimentoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    crud::handle(farm.crescimento(), args.command, &VIEW, global).await
}
