//! List/get/create/update/delete shared by every resource command.

use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use haras_api::Resource;
use haras_core::{Notice, ResourceStore, StoreState};

use crate::cli::{CrudCommand, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// How one resource is shown.
pub struct View<T, R> {
    /// Singular noun for notices ("Animal", "Terreno", ...).
    pub noun: &'static str,
    pub to_row: fn(&T, bool) -> R,
    pub detail: fn(&T) -> String,
}

/// Fetch the page asked for, or every page from it on with `--all`.
///
/// The returned state carries the accumulated rows so the store views
/// see the whole listing.
pub async fn load<T: Resource>(
    store: &ResourceStore<T>,
    args: &ListArgs,
) -> Result<StoreState<T>, CliError> {
    let err = |e| CliError::from_core(e, T::SPEC.name);

    let mut overrides = util::overrides(args)?;
    let first = store.fetch(overrides.clone()).await.map_err(err)?;
    let mut items = first.items;

    if args.all {
        let total_pages = store.snapshot().pagination.total_pages();
        let mut page = args.page.max(1);
        while u64::from(page) < total_pages {
            page += 1;
            overrides.page = Some(page);
            debug!(resource = T::SPEC.name, page, total_pages, "fetching next page");
            let next = store.fetch(overrides.clone()).await.map_err(err)?;
            if next.items.is_empty() {
                break;
            }
            items.extend(next.items);
        }
    }

    let snapshot = store.snapshot();
    Ok(StoreState {
        items,
        ..(*snapshot).clone()
    })
}

/// Pagination footer printed under tables.
pub fn page_footer<T>(state: &StoreState<T>, all: bool) -> String {
    let p = &state.pagination;
    if all {
        return format!("{} de {} registros", state.items.len(), p.rows_number);
    }
    format!(
        "Página {} de {} ({} registros)",
        p.page,
        p.total_pages().max(1),
        p.rows_number
    )
}

pub async fn handle<T, R>(
    store: &ResourceStore<T>,
    cmd: CrudCommand,
    view: &View<T, R>,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    T: Resource + Serialize,
    R: Tabled,
{
    let err = |e| CliError::from_core(e, T::SPEC.name);
    let color = output::should_color(global.color_mode());
    let format = global.output_format();

    match cmd {
        CrudCommand::List(args) => {
            let state = load(store, &args).await?;
            let out = output::render_list(
                format,
                &state.items,
                |t| (view.to_row)(t, color),
                |t| t.id().to_string(),
            );
            output::print_output(&out, global.quiet);
            if format == crate::cli::OutputFormat::Table && !global.quiet {
                eprintln!("{}", page_footer(&state, args.all));
            }
            Ok(())
        }

        CrudCommand::Get { id } => {
            let record = store.get(id).await.map_err(err)?;
            let out = output::render_single(format, &record, view.detail, |t| t.id().to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Create(payload) => {
            let form = util::read_payload(&payload)?;
            let created = store.create(form).await.map_err(err)?;
            output::print_notice(
                &Notice::success(format!("{} cadastrado com sucesso!", view.noun)),
                global.quiet,
                color,
            );
            let out = output::render_single(format, &created, view.detail, |t| t.id().to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Update { id, payload } => {
            let form = util::read_payload(&payload)?;
            let updated = store.update(id, form).await.map_err(err)?;
            output::print_notice(
                &Notice::success(format!("{} atualizado com sucesso!", view.noun)),
                global.quiet,
                color,
            );
            let out = output::render_single(format, &updated, view.detail, |t| t.id().to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Delete { id } => {
            let prompt = format!("Excluir {} #{id}? Esta ação não pode ser desfeita.", view.noun);
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            store.delete(id).await.map_err(err)?;
            output::print_notice(
                &Notice::success(format!("{} excluído com sucesso!", view.noun)),
                global.quiet,
                color,
            );
            Ok(())
        }
    }
}
