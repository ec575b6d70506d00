//! Feed product, stock, feeding-plan and delivery command handlers.

use serde_json::{Map, Value};
use tabled::Tabled;

use haras_api::PlanoFilter;
use haras_api::models::{
    CalculoNutricional, CategoriaNutricional, ConsumoAnimalRacao, FornecimentoRacao,
    ItemPlanoAlimentar, PlanoAlimentar, PrevisaoConsumoRacao, ProdutoRacao, ProdutoRacaoOption,
};
use haras_core::{Farm, Labeled, Notice, labels};

use crate::cli::{
    FornecimentosCommand, GlobalOpts, OutputFormat, PlanosCommand, RacaoArgs, RacaoCommand,
};
use crate::error::CliError;
use crate::output::{self, paint};

use super::crud::{self, View};
use super::{estoque, util};

#[derive(Tabled)]
struct RacaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Marca")]
    marca: String,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Validade")]
    validade: String,
    #[tabled(rename = "Situação")]
    situacao: String,
}

fn row(p: &ProdutoRacao, color: bool) -> RacaoRow {
    RacaoRow {
        id: p.id,
        nome: p.nome.clone(),
        tipo: p.tipo_alimento.label().to_owned(),
        marca: output::opt(p.marca.as_ref()),
        estoque: format!(
            "{} / {} {}",
            p.estoque_atual, p.estoque_minimo, p.unidade_medida
        ),
        validade: output::date(p.data_validade.as_ref()),
        situacao: p
            .status_estoque
            .map_or_else(|| "-".into(), |s| paint(s.label(), s.color(), color)),
    }
}

const VIEW: View<ProdutoRacao, RacaoRow> = View {
    noun: "Produto de ração",
    to_row: row,
    detail: output::render_detail,
};

// ── Product search ──────────────────────────────────────────────────

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Produto")]
    nome: String,
    #[tabled(rename = "Tipo")]
    tipo: &'static str,
    #[tabled(rename = "Estoque")]
    estoque: String,
    #[tabled(rename = "Situação")]
    situacao: String,
}

fn option_row(o: &ProdutoRacaoOption, color: bool) -> OptionRow {
    OptionRow {
        id: o.value,
        nome: o.nome.clone(),
        tipo: o.tipo_alimento.label(),
        estoque: format!("{} {}", o.estoque_atual, o.unidade_medida),
        situacao: paint(o.status_estoque.label(), o.status_estoque.color(), color),
    }
}

// ── Feeding plans ───────────────────────────────────────────────────

#[derive(Tabled)]
struct PlanoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Categoria")]
    categoria: &'static str,
    #[tabled(rename = "Peso ref.")]
    peso: String,
    #[tabled(rename = "Diário")]
    diario: String,
    #[tabled(rename = "Refeições")]
    refeicoes: u8,
    #[tabled(rename = "Produtos")]
    produtos: String,
    #[tabled(rename = "Custo/dia")]
    custo: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn plano_row(p: &PlanoAlimentar, color: bool) -> PlanoRow {
    PlanoRow {
        id: p.id,
        animal: p
            .animal_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", p.id_animal)),
        categoria: p.categoria_nutricional.label(),
        peso: format!("{} kg", p.peso_referencia),
        diario: p
            .quantidade_diaria_total
            .map_or_else(|| "-".into(), |q| format!("{q} kg")),
        refeicoes: p.numero_refeicoes,
        produtos: output::opt(p.total_produtos.as_ref()),
        custo: output::money(p.custo_diario_estimado),
        status: p
            .status_plano
            .map_or_else(|| "-".into(), |s| paint(s.label(), s.color(), color)),
    }
}

fn plano_detail(p: &PlanoAlimentar) -> String {
    [
        format!("ID:              {}", p.id),
        format!(
            "Animal:          {}",
            p.animal_nome
                .clone()
                .unwrap_or_else(|| format!("#{}", p.id_animal))
        ),
        format!("Categoria:       {}", p.categoria_nutricional.label()),
        format!("Peso referência: {} kg", p.peso_referencia),
        format!("Escore corporal: {}", output::opt(p.escore_corporal.as_ref())),
        format!(
            "Trabalho:        {}",
            p.intensidade_trabalho.map_or("-", |i| i.label())
        ),
        format!("Diário total:    {}", output::opt(p.quantidade_diaria_total.as_ref())),
        format!("Refeições:       {}", p.numero_refeicoes),
        format!("Início:          {}", output::date(p.data_inicio.as_ref())),
        format!("Fim:             {}", output::date(p.data_fim.as_ref())),
        format!("Status:          {}", p.status_plano.map_or("-", |s| s.label())),
        format!("Observações:     {}", output::opt(p.observacoes.as_ref())),
    ]
    .join("\n")
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Ordem")]
    ordem: String,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Por refeição")]
    por_refeicao: String,
    #[tabled(rename = "Diário")]
    diario: String,
    #[tabled(rename = "Horários")]
    horarios: String,
    #[tabled(rename = "Custo/dia")]
    custo: String,
}

fn item_row(i: &ItemPlanoAlimentar) -> ItemRow {
    let unidade = i.produto_unidade.as_deref().unwrap_or("kg");
    let horarios = i.horarios();
    ItemRow {
        id: i.id,
        ordem: output::opt(i.ordem_fornecimento.as_ref()),
        produto: i
            .produto_nome
            .clone()
            .unwrap_or_else(|| format!("#{}", i.id_produto)),
        por_refeicao: format!("{} {unidade}", i.quantidade_por_refeicao),
        diario: format!("{} {unidade}", i.quantidade_diaria),
        horarios: if horarios.is_empty() {
            "-".into()
        } else {
            horarios.join(", ")
        },
        custo: output::money(i.custo_diario),
    }
}

/// Fail unless the payload names every key in `keys`.
fn require_keys(payload: &Map<String, Value>, keys: &[&str]) -> Result<(), CliError> {
    match keys.iter().find(|k| payload.get(**k).is_none_or(Value::is_null)) {
        Some(missing) => Err(CliError::Validation {
            field: (*missing).to_owned(),
            reason: "is required".into(),
        }),
        None => Ok(()),
    }
}

/// Item payload for `plano_id`; the plan named on the command line wins.
fn item_payload(mut payload: Map<String, Value>, plano_id: i64) -> Result<Map<String, Value>, CliError> {
    payload.insert("ID_PLANO".into(), Value::from(plano_id));
    require_keys(&payload, &["ID_PRODUTO", "QUANTIDADE_POR_REFEICAO", "QUANTIDADE_DIARIA"])?;
    Ok(payload)
}

// ── Deliveries ──────────────────────────────────────────────────────

fn fornecimento_detail(f: &FornecimentoRacao) -> String {
    let unidade = f.produto_unidade.as_deref().unwrap_or("kg");
    [
        format!("ID:          {}", f.id),
        format!(
            "Animal:      {}",
            f.animal_nome
                .clone()
                .unwrap_or_else(|| format!("#{}", f.id_animal))
        ),
        format!(
            "Produto:     {}",
            f.produto_nome
                .clone()
                .unwrap_or_else(|| format!("#{}", f.id_produto))
        ),
        format!("Quantidade:  {} {unidade}", f.quantidade_fornecida),
        format!("Planejada:   {}", output::opt(f.quantidade_planejada.as_ref())),
        format!("Data:        {}", output::date(f.data_fornecimento.as_ref())),
        format!("Refeição:    {}", output::opt(f.numero_refeicao.as_ref())),
        format!("Responsável: {}", output::opt(f.funcionario_responsavel.as_ref())),
        format!("Custo:       {}", output::money(f.custo_fornecimento)),
    ]
    .join("\n")
}

// ── Nutrition and reports ───────────────────────────────────────────

fn calculo_detail(c: &CalculoNutricional) -> String {
    let mut lines = vec![
        format!("Categoria:      {}", c.categoria_nutricional.label()),
        format!("Peso do animal: {} kg", c.peso_animal),
        format!("Sugerido/dia:   {} kg", c.quantidade_sugerida_kg),
        format!("% peso vivo:    {}%", c.percentual_peso_vivo),
    ];
    if !c.distribuicao_refeicoes.is_empty() {
        lines.push("Refeições:".into());
        for (refeicao, kg) in &c.distribuicao_refeicoes {
            lines.push(format!("  {refeicao}: {kg} kg"));
        }
    }
    if !c.observacoes_nutricionais.is_empty() {
        lines.push(format!("Observações:    {}", c.observacoes_nutricionais));
    }
    lines.join("\n")
}

#[derive(Tabled)]
struct ConsumoRow {
    #[tabled(rename = "Animal")]
    animal: String,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Tipo")]
    tipo: &'static str,
    #[tabled(rename = "Total")]
    total: f64,
    #[tabled(rename = "Média diária")]
    media: f64,
    #[tabled(rename = "Custo")]
    custo: String,
    #[tabled(rename = "Última refeição")]
    ultima: String,
}

fn consumo_row(c: &ConsumoAnimalRacao) -> ConsumoRow {
    ConsumoRow {
        animal: c.animal_nome.clone(),
        produto: c.produto_nome.clone(),
        tipo: c.tipo_alimento.label(),
        total: c.total_consumido,
        media: c.media_diaria,
        custo: labels::format_currency(c.custo_total),
        ultima: output::date(c.ultima_refeicao.as_ref()),
    }
}

#[derive(Tabled)]
struct PrevisaoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Produto")]
    produto: String,
    #[tabled(rename = "Consumo/dia")]
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

fn previsao_row(p: &PrevisaoConsumoRacao, color: bool) -> PrevisaoRow {
    PrevisaoRow {
        id: p.produto_id,
        produto: p.produto_nome.clone(),
        consumo: p.consumo_diario_medio,
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

// ── Handler ─────────────────────────────────────────────────────────

async fn planos(farm: &Farm, cmd: PlanosCommand, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    match cmd {
        PlanosCommand::List {
            animal,
            categoria,
            status,
            page,
            limit,
        } => {
            let filtro = PlanoFilter {
                animal_id: animal,
                categoria: util::parse_optional_code(categoria.as_deref(), "categoria")?,
                status: util::parse_optional_code(status.as_deref(), "status")?,
                page: page.max(1),
                limit: limit.clamp(1, 100),
            };
            let planos = farm.api().planos_alimentares(&filtro).await?;
            let out = output::render_list(
                format,
                &planos.items,
                |p| plano_row(p, color),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if format == OutputFormat::Table && !global.quiet {
                eprintln!("{}", estoque::page_footer(&planos));
            }
            Ok(())
        }

        PlanosCommand::Create(payload) => {
            let body = util::read_payload(&payload)?;
            require_keys(&body, &["ID_ANIMAL", "CATEGORIA_NUTRICIONAL", "PESO_REFERENCIA"])?;
            let plano = farm.api().create_plano(&body).await?;
            output::print_notice(
                &Notice::success("Plano alimentar criado com sucesso!"),
                global.quiet,
                color,
            );
            let out = output::render_single(format, &plano, plano_detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlanosCommand::Update { id, payload } => {
            let body = util::read_payload(&payload)?;
            let plano = farm.api().update_plano(id, &body).await?;
            output::print_notice(
                &Notice::success("Plano alimentar atualizado com sucesso!"),
                global.quiet,
                color,
            );
            let out = output::render_single(format, &plano, plano_detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlanosCommand::Itens { plano_id } => {
            let itens = farm.api().itens_plano(plano_id).await?;
            estoque::print_report(
                &itens,
                "Plano sem produtos ativos.",
                global,
                item_row,
                |i| i.id.to_string(),
            );
            Ok(())
        }

        PlanosCommand::AddItem { plano_id, payload } => {
            let body = item_payload(util::read_payload(&payload)?, plano_id)?;
            let item = farm.api().add_item_plano(plano_id, &body).await?;
            output::print_notice(
                &Notice::success("Produto adicionado ao plano!"),
                global.quiet,
                color,
            );
            let out = output::render_list(format, std::slice::from_ref(&item), item_row, |i| {
                i.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlanosCommand::UpdateItem { item_id, payload } => {
            let body = util::read_payload(&payload)?;
            let item = farm.api().update_item_plano(item_id, &body).await?;
            output::print_notice(&Notice::success("Item atualizado!"), global.quiet, color);
            let out = output::render_list(format, std::slice::from_ref(&item), item_row, |i| {
                i.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlanosCommand::RemoveItem { item_id } => {
            let prompt = format!("Remover o item #{item_id} do plano?");
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            farm.api().remove_item_plano(item_id).await?;
            output::print_notice(&Notice::success("Item removido do plano!"), global.quiet, color);
            Ok(())
        }
    }
}

async fn fornecimentos(
    farm: &Farm,
    cmd: FornecimentosCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color_mode());
    let (fornecimento, message) = match cmd {
        FornecimentosCommand::Create(payload) => {
            let body = util::read_payload(&payload)?;
            require_keys(&body, &["ID_ANIMAL", "ID_PRODUTO", "QUANTIDADE_FORNECIDA"])?;
            (
                farm.api().registrar_fornecimento(&body).await?,
                "Fornecimento registrado com sucesso!",
            )
        }
        FornecimentosCommand::Update { id, payload } => {
            let body = util::read_payload(&payload)?;
            (
                farm.api().update_fornecimento(id, &body).await?,
                "Fornecimento atualizado com sucesso!",
            )
        }
    };
    output::print_notice(&Notice::success(message), global.quiet, color);
    let out = output::render_single(
        global.output_format(),
        &fornecimento,
        fornecimento_detail,
        |f| f.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(farm: &Farm, args: RacaoArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    match args.command {
        RacaoCommand::Crud(cmd) => crud::handle(farm.racao(), cmd, &VIEW, global).await,

        RacaoCommand::Buscar { termo } => {
            let found = farm.api().autocomplete_racao(&termo).await?;
            let out = output::render_list(
                format,
                &found,
                |o| option_row(o, color),
                |o| o.value.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RacaoCommand::Entrada(entrada) => {
            let mov = farm.api().entrada_racao(&estoque::entrada(entrada)?).await?;
            estoque::print_movement("Entrada registrada com sucesso!", &mov, global);
            Ok(())
        }

        RacaoCommand::Saida { saida, animal } => {
            let mov = farm
                .api()
                .saida_racao(&estoque::saida(saida, animal, None)?)
                .await?;
            estoque::print_movement("Saída registrada com sucesso!", &mov, global);
            Ok(())
        }

        RacaoCommand::Ajuste(ajuste) => {
            let mov = farm.api().ajuste_racao(&estoque::ajuste(ajuste)?).await?;
            estoque::print_movement("Estoque ajustado com sucesso!", &mov, global);
            Ok(())
        }

        RacaoCommand::Movimentacoes(ledger) => {
            let filtro = util::ledger_filter(&ledger, None)?;
            let page = farm.api().movimentacoes_racao(&filtro).await?;
            estoque::print_ledger(&page, global);
            Ok(())
        }

        RacaoCommand::Planos(planos_args) => planos(farm, planos_args.command, global).await,

        RacaoCommand::Fornecimentos(f) => fornecimentos(farm, f.command, global).await,

        RacaoCommand::Necessidades {
            animal_id,
            categoria,
        } => {
            let categoria: CategoriaNutricional = util::parse_code(&categoria, "categoria")?;
            let calculo = farm.api().calculo_nutricional(animal_id, categoria).await?;
            let out = output::render_single(format, &calculo, calculo_detail, |c| {
                c.quantidade_sugerida_kg.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RacaoCommand::Consumo { animal, period } => {
            let filtro = util::period_filter(&period, None)?;
            let consumo = farm
                .api()
                .consumo_racao_animal(animal, filtro.data_inicio, filtro.data_fim)
                .await?;
            estoque::print_report(
                &consumo,
                "Nenhum fornecimento no período.",
                global,
                consumo_row,
                |c| c.animal_id.to_string(),
            );
            Ok(())
        }

        RacaoCommand::Previsao => {
            let previsao = farm.api().previsao_consumo_racao().await?;
            estoque::print_report(
                &previsao,
                "Sem consumo registrado nos últimos 30 dias.",
                global,
                |p| previsao_row(p, color),
                |p| p.produto_id.to_string(),
            );
            Ok(())
        }

        RacaoCommand::EstoqueBaixo => {
            let alertas = farm.api().estoque_baixo_racao().await?;
            estoque::print_alerts(&alertas, global);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn item_payload_takes_plan_from_command_line() {
        let body = item_payload(
            object(json!({
                "ID_PLANO": 99,
                "ID_PRODUTO": 4,
                "QUANTIDADE_POR_REFEICAO": 1.5,
                "QUANTIDADE_DIARIA": 4.5,
            })),
            7,
        )
        .unwrap();
        assert_eq!(body["ID_PLANO"], json!(7));
    }

    #[test]
    fn item_payload_needs_quantities() {
        let err = item_payload(object(json!({"ID_PRODUTO": 4})), 7).unwrap_err();
        assert!(
            matches!(err, CliError::Validation { ref field, .. } if field == "QUANTIDADE_POR_REFEICAO")
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let body = object(json!({"ID_ANIMAL": null, "ID_PRODUTO": 1, "QUANTIDADE_FORNECIDA": 2}));
        let err = require_keys(&body, &["ID_ANIMAL", "ID_PRODUTO"]).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "ID_ANIMAL"));
    }

    #[test]
    fn item_row_lists_meal_times() {
        let item: ItemPlanoAlimentar = serde_json::from_value(json!({
            "ID": 3,
            "ID_PLANO": 7,
            "ID_PRODUTO": 4,
            "QUANTIDADE_POR_REFEICAO": 1.5,
            "QUANTIDADE_DIARIA": 4.5,
            "HORARIO_REFEICAO_1": "06:00",
            "HORARIO_REFEICAO_2": "",
            "HORARIO_REFEICAO_3": "18:00",
            "produto_nome": "Aveia",
        }))
        .unwrap();
        let r = item_row(&item);
        assert_eq!(r.horarios, "06:00, 18:00");
        assert_eq!(r.por_refeicao, "1.5 kg");
        assert_eq!(r.produto, "Aveia");
    }

    #[test]
    fn forecast_row_translates_recommendation() {
        let p = PrevisaoConsumoRacao {
            produto_id: 1,
            produto_nome: "Feno".into(),
            consumo_diario_medio: 20.0,
            estoque_atual: 100.0,
            dias_restantes: 5,
            data_prevista_fim: None,
            recomendacao: "COMPRAR_URGENTE".into(),
        };
        assert_eq!(previsao_row(&p, false).recomendacao, "Comprar Urgente");
    }

    #[test]
    fn nutrition_view_lists_meals() {
        let c: CalculoNutricional = serde_json::from_value(json!({
            "categoria_nutricional": "EGUA_LACTANTE",
            "peso_animal": 500.0,
            "quantidade_sugerida_kg": 15.0,
            "percentual_peso_vivo": 3.0,
            "distribuicao_refeicoes": {"manha": 6.0, "noite": 4.5, "tarde": 4.5},
        }))
        .unwrap();
        let view = calculo_detail(&c);
        assert!(view.contains("Égua Lactante"));
        assert!(view.contains("  manha: 6 kg"));
        assert!(!view.contains("Observações"));
    }
}
