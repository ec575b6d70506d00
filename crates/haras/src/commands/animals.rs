//! Animal command handlers.

use tabled::Tabled;

use haras_api::models::{Animal, Genealogia, RelatorioAnimal};
use haras_api::{ParentOptions, Resource};
use haras_core::store::AnimalStats;
use haras_core::{CoreError, Farm, Labeled, Notice, labels};

use crate::cli::{AnimalsArgs, AnimalsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AnimalRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Registro")]
    registro: String,
    #[tabled(rename = "Sexo")]
    sexo: String,
    #[tabled(rename = "Nascimento")]
    nascimento: String,
    #[tabled(rename = "Pelagem")]
    pelagem: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Proprietário")]
    proprietario: String,
}

fn row(a: &Animal, color: bool) -> AnimalRow {
    AnimalRow {
        id: a.id,
        nome: a.nome.clone(),
        registro: output::opt(a.numero_registro.as_ref()),
        sexo: a.sexo.map_or_else(|| "-".into(), |s| s.label().to_owned()),
        nascimento: output::date(a.data_nascimento.as_ref()),
        pelagem: output::opt(a.pelagem.as_ref()),
        status: paint(a.status_animal.label(), a.status_animal.color(), color),
        proprietario: output::opt(a.proprietario.as_ref()),
    }
}

fn detail(a: &Animal) -> String {
    let mut lines = vec![
        format!("ID:           {}", a.id),
        format!("Nome:         {}", a.nome),
        format!("Registro:     {}", output::opt(a.numero_registro.as_ref())),
        format!("Chip:         {}", output::opt(a.chip_identificacao.as_ref())),
        format!("Sexo:         {}", a.sexo.map_or("-", |s| s.label())),
        format!("Nascimento:   {}", output::date(a.data_nascimento.as_ref())),
        format!("Pelagem:      {}", output::opt(a.pelagem.as_ref())),
        format!("Status:       {}", a.status_animal.label()),
        format!("Peso atual:   {}", a.peso_atual.map_or_else(|| "-".into(), |p| format!("{p} kg"))),
        format!("Origem:       {}", output::opt(a.origem.as_ref())),
        format!("Proprietário: {}", output::opt(a.proprietario.as_ref())),
        format!("Contato:      {}", output::opt(a.contato_proprietario.as_ref())),
    ];
    if let Some(id) = a.id_pai {
        lines.push(format!("Pai:          #{id}"));
    }
    if let Some(id) = a.id_mae {
        lines.push(format!("Mãe:          #{id}"));
    }
    if let Some(ref obs) = a.observacoes {
        lines.push(format!("Observações:  {obs}"));
    }
    lines.join("\n")
}

const VIEW: View<Animal, AnimalRow> = View {
    noun: "Animal",
    to_row: row,
    detail,
};

// ── Pedigree ────────────────────────────────────────────────────────

fn pedigree(g: &Genealogia) -> String {
    let mut lines = vec![format!("{} (#{})", g.animal.nome, g.animal.id)];
    pedigree_branches(g, "", &mut lines);
    lines.join("\n")
}

fn pedigree_branches(g: &Genealogia, prefix: &str, lines: &mut Vec<String>) {
    let branches: Vec<(&str, &Genealogia)> = [("Pai", g.pai.as_deref()), ("Mãe", g.mae.as_deref())]
        .into_iter()
        .filter_map(|(label, node)| node.map(|n| (label, n)))
        .collect();

    for (i, (label, node)) in branches.iter().enumerate() {
        let last = i + 1 == branches.len();
        let (joint, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        lines.push(format!(
            "{prefix}{joint}{label}: {} (#{})",
            node.animal.nome, node.animal.id
        ));
        pedigree_branches(node, &format!("{prefix}{indent}"), lines);
    }
}

// ── Parents ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ParentRow {
    #[tabled(rename = "Papel")]
    papel: &'static str,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
}

fn parents_table(p: &ParentOptions) -> String {
    let rows: Vec<ParentRow> = p
        .pais
        .iter()
        .map(|o| ParentRow {
            papel: "Pai",
            id: o.value,
            nome: o.label.clone(),
        })
        .chain(p.maes.iter().map(|o| ParentRow {
            papel: "Mãe",
            id: o.value,
            nome: o.label.clone(),
        }))
        .collect();
    output::render_table(&rows)
}

// ── Reports ─────────────────────────────────────────────────────────

fn relatorio_detail(r: &RelatorioAnimal) -> String {
    [
        format!("Animal:              {} (#{})", r.animal_nome, r.animal_id),
        format!("Raça:                {}", r.raca),
        format!("Proprietário:        {}", r.proprietario),
        format!("Nascimento:          {}", output::date(r.data_nascimento.as_ref())),
        format!("Idade:               {}", r.idade_anos.map_or_else(|| "-".into(), |i| format!("{i} anos"))),
        format!("Última vacina:       {}", output::date(r.ultima_vacina.as_ref())),
        format!("Último vermífugo:    {}", output::date(r.ultimo_vermifugo.as_ref())),
        format!("Tratamentos ativos:  {}", r.tratamentos_ativos),
        format!("Custo medicamentos:  {}", labels::format_currency(r.custo_medicamentos)),
        format!("Custo ração:         {}", labels::format_currency(r.custo_racao)),
        format!("Custo total:         {}", labels::format_currency(r.custo_total)),
        format!("Reprodução:          {}", output::opt(r.status_reproducao.as_ref())),
        format!("Última cobertura:    {}", output::date(r.data_ultima_cobertura.as_ref())),
    ]
    .join("\n")
}

fn stats_detail(s: &AnimalStats) -> String {
    [
        format!("Total:        {}", s.total),
        format!("Ativos:       {}", s.ativos),
        format!("Machos:       {}", s.machos),
        format!("Fêmeas:       {}", s.femeas),
        format!("Vendidos:     {}", s.vendidos),
        format!("Emprestados:  {}", s.emprestados),
        format!("Mortos:       {}", s.mortos),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(farm: &Farm, args: AnimalsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output_format();

    match args.command {
        AnimalsCommand::Crud(cmd) => crud::handle(farm.animals(), cmd, &VIEW, global).await,

        AnimalsCommand::Genealogia { id } => {
            let tree = farm.api().genealogia(id).await.map_err(|e| {
                CliError::from_core(
                    CoreError::from(e).or_not_found(Animal::SPEC.label, id),
                    Animal::SPEC.name,
                )
            })?;
            let out = output::render_single(format, &tree, pedigree, |g| g.animal.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnimalsCommand::Pais => {
            let options = farm.api().both_parent_options().await?;
            let out = output::render_single(format, &options, parents_table, |p| {
                p.pais
                    .iter()
                    .chain(&p.maes)
                    .map(|o| o.value.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnimalsCommand::Foto { id, path } => {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| CliError::Validation {
                    field: "path".into(),
                    reason: format!("'{}' is not a file name", path.display()),
                })?
                .to_owned();
            let bytes = std::fs::read(&path)?;
            let upload = farm.api().upload_photo(id, &filename, bytes).await?;
            output::print_notice(
                &Notice::success(upload.message.clone()),
                global.quiet,
                output::should_color(global.color_mode()),
            );
            let out = output::render_single(format, &upload, |u| u.url.clone(), |u| u.filename.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnimalsCommand::Relatorio { id, period } => {
            let filter = util::period_filter(&period, None)?;
            let report = farm
                .dashboard()
                .relatorio_animal(id, &filter)
                .await
                .map_err(|e| CliError::from_core(e, Animal::SPEC.name))?;
            let out = output::render_single(format, &report, relatorio_detail, |r| {
                r.animal_id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnimalsCommand::Resumo(list) => {
            let state = crud::load(farm.animals(), &list).await?;
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

    fn animal(id: i64, nome: &str) -> Animal {
        serde_json::from_value(serde_json::json!({ "ID": id, "NOME": nome })).unwrap()
    }

    fn node(id: i64, nome: &str, pai: Option<Genealogia>, mae: Option<Genealogia>) -> Genealogia {
        Genealogia {
            animal: animal(id, nome),
            pai: pai.map(Box::new),
            mae: mae.map(Box::new),
        }
    }

    #[test]
    fn pedigree_draws_both_lines() {
        let tree = node(
            1,
            "Estrela",
            Some(node(2, "Trovão", None, Some(node(4, "Brisa", None, None)))),
            Some(node(3, "Aurora", None, None)),
        );
        let out = pedigree(&tree);
        assert_eq!(
            out,
            "Estrela (#1)\n\
             ├── Pai: Trovão (#2)\n\
             │   └── Mãe: Brisa (#4)\n\
             └── Mãe: Aurora (#3)"
        );
    }

    #[test]
    fn row_shows_dash_for_missing_fields() {
        let r = row(&animal(7, "Relâmpago"), false);
        assert_eq!(r.sexo, "-");
        assert_eq!(r.nascimento, "-");
        assert_eq!(r.status, "Ativo");
    }
}
