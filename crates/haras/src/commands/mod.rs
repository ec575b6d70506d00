//! Command dispatch: bridges CLI args -> farm stores -> output formatting.

pub mod animals;
pub mod aplicacoes;
pub mod auth;
pub mod config_cmd;
pub mod crescimento;
pub mod crud;
pub mod dashboard;
pub mod estoque;
pub mod ferrageamento;
pub mod manejo;
pub mod medicamentos;
pub mod movimentacoes;
pub mod racao;
pub mod reproducao;
pub mod saude;
pub mod terrenos;
pub mod util;

use haras_core::Farm;

use crate::cli::{Command, GlobalOpts};
use crate::config::ActiveProfile;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    farm: &Farm,
    active: &ActiveProfile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !matches!(cmd, Command::Auth(_)) {
        util::require_session(farm)?;
    }

    match cmd {
        Command::Auth(args) => auth::handle(farm, args, active, global).await,
        Command::Dashboard(args) => dashboard::handle(farm, args, global).await,
        Command::Animals(args) => animals::handle(farm, args, global).await,
        Command::Terrenos(args) => terrenos::handle(farm, args, global).await,
        Command::Saude(args) => saude::handle(farm, args, global).await,
        Command::Crescimento(args) => crescimento::handle(farm, args, global).await,
        Command::Ferrageamento(args) => ferrageamento::handle(farm, args, global).await,
        Command::Medicamentos(args) => medicamentos::handle(farm, args, global).await,
        Command::Reproducao(args) => reproducao::handle(farm, args, global).await,
        Command::Manejo(args) => manejo::handle(farm, args, global).await,
        Command::Aplicacoes(args) => aplicacoes::handle(farm, args, global).await,
        Command::Racao(args) => racao::handle(farm, args, global).await,
        Command::Movimentacoes(args) => movimentacoes::handle(farm, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
