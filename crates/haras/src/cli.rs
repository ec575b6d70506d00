//! Clap derive structures for the `haras` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// haras -- farm management from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "haras",
    version,
    about = "Manage the horse farm from the command line",
    long_about = "Command-line client for the Haras farm-management backend.\n\n\
        Animals, paddocks, health, growth, shoeing, medicines, reproduction,\n\
        field management, feed and movements, plus the dashboard reports.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "HARAS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'u', env = "HARAS_URL", global = true)]
    pub url: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "HARAS_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "HARAS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "HARAS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HARAS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, log out and manage two-factor authentication
    Auth(AuthArgs),

    /// Farm overview: KPIs, alerts and costs per owner
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Manage animals
    #[command(alias = "animais", alias = "a")]
    Animals(AnimalsArgs),

    /// Manage paddocks
    #[command(alias = "t")]
    Terrenos(TerrenosArgs),

    /// Manage health records (vaccines, deworming, exams, ...)
    Saude(SaudeArgs),

    /// Manage growth measurements
    Crescimento(CrescimentoArgs),

    /// Manage shoeing and hoof care records
    Ferrageamento(FerrageamentoArgs),

    /// Manage medicines and their stock
    #[command(alias = "med")]
    Medicamentos(MedicamentosArgs),

    /// Manage coverings, diagnoses and births
    #[command(alias = "repro")]
    Reproducao(ReproducaoArgs),

    /// Manage field-management products
    Manejo(ManejoArgs),

    /// Manage field-management applications on paddocks
    Aplicacoes(AplicacoesArgs),

    /// Manage feed products
    Racao(RacaoArgs),

    /// Manage animal movements between paddocks
    #[command(alias = "mov")]
    Movimentacoes(MovimentacoesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Pagination, sorting and filtering shared by every list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page [default: per resource]
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Sort column (backend name, e.g. NOME or DATA_OCORRENCIA)
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, conflicts_with = "asc")]
    pub desc: bool,

    /// Sort ascending
    #[arg(long)]
    pub asc: bool,

    /// Filter as field=value (repeatable), e.g. --filter sexo=F
    #[arg(long, short = 'f', value_name = "FIELD=VALUE")]
    pub filter: Vec<String>,

    /// Fetch all pages automatically
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// JSON payload for create/update, inline or from a file.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct WriteArgs {
    /// Inline JSON object with backend column names
    #[arg(long, short = 'd', value_name = "JSON")]
    pub data: Option<String>,

    /// Read the JSON object from a file ("-" for stdin)
    #[arg(long, short = 'F', value_name = "PATH")]
    pub from_file: Option<PathBuf>,
}

/// Operations every resource supports.
#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// List records
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one record
    Get {
        /// Record ID
        id: i64,
    },

    /// Create a record
    Create(WriteArgs),

    /// Update a record
    Update {
        /// Record ID
        id: i64,

        #[command(flatten)]
        payload: WriteArgs,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in and store the session for this profile
    Login {
        /// Login e-mail (defaults to the profile's or HARAS_EMAIL)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// MFA code, when the account has two-factor enabled
        #[arg(long)]
        code: Option<String>,
    },

    /// Revoke and remove the stored session
    Logout,

    /// Show the logged-in user
    #[command(alias = "whoami")]
    Status,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Two-factor authentication
    Mfa(MfaArgs),
}

#[derive(Debug, Args)]
pub struct MfaArgs {
    #[command(subcommand)]
    pub command: MfaCommand,
}

#[derive(Debug, Subcommand)]
pub enum MfaCommand {
    /// Generate a TOTP secret for the logged-in user
    Setup,

    /// Turn two-factor authentication off
    Disable,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DASHBOARD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Period and owner filter (dates as DD/MM/YYYY or YYYY-MM-DD).
#[derive(Debug, Clone, Default, Args)]
pub struct PeriodArgs {
    /// Period start
    #[arg(long, value_name = "DATE")]
    pub data_inicio: Option<String>,

    /// Period end
    #[arg(long, value_name = "DATE")]
    pub data_fim: Option<String>,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Restrict to one owner
    #[arg(long)]
    pub proprietario: Option<String>,

    /// Only show critical alerts
    #[arg(long)]
    pub criticos: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ANIMALS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AnimalsArgs {
    #[command(subcommand)]
    pub command: AnimalsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AnimalsCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Show the pedigree tree
    Genealogia {
        /// Animal ID
        id: i64,
    },

    /// List active sires and dams available as parents
    Pais,

    /// Upload a JPEG or PNG photo
    Foto {
        /// Animal ID
        id: i64,

        /// Image file
        path: PathBuf,
    },

    /// Costs and care summary for one animal
    Relatorio {
        /// Animal ID
        id: i64,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Counts by status and sex over the listed page
    Resumo(ListArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TERRENOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TerrenosArgs {
    #[command(subcommand)]
    pub command: TerrenosCommand,
}

#[derive(Debug, Subcommand)]
pub enum TerrenosCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Occupation and management summary for one paddock
    Relatorio {
        /// Paddock ID
        id: i64,
    },

    /// Counts by status and total area over the listed page
    Resumo(ListArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SAUDE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SaudeArgs {
    #[command(subcommand)]
    pub command: SaudeCommand,
}

#[derive(Debug, Subcommand)]
pub enum SaudeCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Upcoming applications, split into overdue / urgent / upcoming
    Proximas {
        /// Look-ahead window in days
        #[arg(long, default_value = "30")]
        dias: u32,
    },

    /// Record an application in one step (stock is debited by the backend)
    Aplicar(AplicarArgs),

    /// General health statistics
    Estatisticas,

    /// Health history of one animal
    Historico {
        /// Animal ID
        animal_id: i64,

        /// Months to look back
        #[arg(long, default_value = "12")]
        meses: u32,
    },

    /// Listed records grouped by application status
    PorStatus(ListArgs),
}

#[derive(Debug, Args)]
pub struct AplicarArgs {
    /// Animal ID
    #[arg(long)]
    pub animal: i64,

    /// Record type (VACINA, VERMIFUGO, MEDICAMENTO, EXAME, CONSULTA, ...)
    #[arg(long, short = 't')]
    pub tipo: String,

    /// Medicine ID taken from stock
    #[arg(long)]
    pub medicamento: Option<i64>,

    /// Quantity taken from stock
    #[arg(long)]
    pub quantidade: Option<f64>,

    /// Medicine name, when not taken from stock
    #[arg(long)]
    pub medicamento_nome: Option<String>,

    /// Dose description
    #[arg(long)]
    pub dose: Option<String>,

    /// Responsible veterinarian
    #[arg(long)]
    pub veterinario: Option<String>,

    #[arg(long)]
    pub observacoes: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CRESCIMENTO / FERRAGEAMENTO / RACAO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CrescimentoArgs {
    #[command(subcommand)]
    pub command: CrudCommand,
}

#[derive(Debug, Args)]
pub struct FerrageamentoArgs {
    #[command(subcommand)]
    pub command: FerrageamentoCommand,
}

#[derive(Debug, Subcommand)]
pub enum FerrageamentoCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Record a shoeing dated today; the next evaluation is scheduled
    /// from the type
    Rapido(RapidoArgs),

    /// Evaluations overdue or due soon
    Vencimentos {
        /// Look-ahead window in days
        #[arg(long, default_value = "15")]
        dias: u32,
    },

    /// Farm-wide counters and per-animal history
    Estatisticas {
        /// Months of per-animal history
        #[arg(long, default_value = "12")]
        meses: u32,
    },

    /// Activity per farrier
    Ferradores {
        /// Restrict to one year
        #[arg(long)]
        ano: Option<i32>,
    },

    /// Search farriers by name
    Buscar {
        /// Name fragment (blank lists everyone)
        #[arg(default_value = "")]
        termo: String,
    },

    /// Report over a period
    Relatorio {
        /// Period start
        #[arg(long, value_name = "DATE")]
        data_inicio: String,

        /// Period end
        #[arg(long, value_name = "DATE")]
        data_fim: String,

        /// Restrict to one animal
        #[arg(long)]
        animal: Option<i64>,

        /// Restrict to one type (FERRAGEAMENTO, CASQUEAMENTO, ...)
        #[arg(long, short = 't')]
        tipo: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct RapidoArgs {
    /// Animal ID
    #[arg(long)]
    pub animal: i64,

    /// Type (FERRAGEAMENTO, CASQUEAMENTO, FERRAGEAMENTO_CORRETIVO, ...)
    #[arg(long, short = 't')]
    pub tipo: String,

    /// Limb treated (AD, AE, PD, PE, TODOS)
    #[arg(long, default_value = "TODOS")]
    pub membro: String,

    #[arg(long)]
    pub ferrador: Option<String>,

    /// Hoof condition (BOM, REGULAR, RUIM, PROBLEMA)
    #[arg(long)]
    pub casco: Option<String>,

    /// Cost (R$)
    #[arg(long)]
    pub custo: Option<f64>,

    #[arg(long)]
    pub observacoes: Option<String>,
}

#[derive(Debug, Args)]
pub struct RacaoArgs {
    #[command(subcommand)]
    pub command: RacaoCommand,
}

#[derive(Debug, Subcommand)]
pub enum RacaoCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Search active feed products
    Buscar {
        /// Name fragment
        termo: String,
    },

    /// Record a stock entry (purchase)
    Entrada(StockEntryArgs),

    /// Record a stock exit
    Saida {
        #[command(flatten)]
        saida: StockExitArgs,

        /// Animal the feed went to
        #[arg(long)]
        animal: Option<i64>,
    },

    /// Set the stock to a counted quantity
    Ajuste(StockAdjustArgs),

    /// Stock ledger
    Movimentacoes(LedgerArgs),

    /// Feeding plans
    Planos(PlanosArgs),

    /// Feed deliveries
    Fornecimentos(FornecimentosArgs),

    /// Suggested daily intake for an animal
    Necessidades {
        /// Animal ID
        animal_id: i64,

        /// Nutritional category (ADULTO_MANUTENCAO, EGUA_LACTANTE, ...)
        #[arg(long, short = 'c', default_value = "ADULTO_MANUTENCAO")]
        categoria: String,
    },

    /// Consumption per animal and product
    Consumo {
        /// Restrict to one animal
        #[arg(long)]
        animal: Option<i64>,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Days of stock left at the current consumption rate
    Previsao,

    /// Products low on stock or close to expiry
    EstoqueBaixo,
}

#[derive(Debug, Args)]
pub struct PlanosArgs {
    #[command(subcommand)]
    pub command: PlanosCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlanosCommand {
    /// List feeding plans
    #[command(alias = "ls")]
    List {
        /// Restrict to one animal
        #[arg(long)]
        animal: Option<i64>,

        /// Nutritional category
        #[arg(long, short = 'c')]
        categoria: Option<String>,

        /// Plan status (ATIVO, INATIVO, SUSPENSO)
        #[arg(long)]
        status: Option<String>,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Rows per page
        #[arg(long, short = 'l', default_value = "20")]
        limit: u32,
    },

    /// Create a plan
    Create(WriteArgs),

    /// Update a plan
    Update {
        /// Plan ID
        id: i64,

        #[command(flatten)]
        payload: WriteArgs,
    },

    /// Active items of a plan
    Itens {
        /// Plan ID
        plano_id: i64,
    },

    /// Add a product to a plan
    AddItem {
        /// Plan ID
        plano_id: i64,

        #[command(flatten)]
        payload: WriteArgs,
    },

    /// Update a plan item
    UpdateItem {
        /// Item ID
        item_id: i64,

        #[command(flatten)]
        payload: WriteArgs,
    },

    /// Remove a product from its plan
    #[command(alias = "rm-item")]
    RemoveItem {
        /// Item ID
        item_id: i64,
    },
}

#[derive(Debug, Args)]
pub struct FornecimentosArgs {
    #[command(subcommand)]
    pub command: FornecimentosCommand,
}

#[derive(Debug, Subcommand)]
pub enum FornecimentosCommand {
    /// Record a delivery; debits the product's stock
    Create(WriteArgs),

    /// Update a delivery
    Update {
        /// Delivery ID
        id: i64,

        #[command(flatten)]
        payload: WriteArgs,
    },
}

// ── Shared stock arguments ───────────────────────────────────────────

/// Product stock entry shared by feed and field inputs.
#[derive(Debug, Args)]
pub struct StockEntryArgs {
    /// Product ID
    #[arg(long)]
    pub produto: i64,

    #[arg(long)]
    pub quantidade: f64,

    /// Invoice number
    #[arg(long)]
    pub nota_fiscal: String,

    #[arg(long)]
    pub fornecedor: String,

    /// Unit price (R$)
    #[arg(long)]
    pub preco: f64,

    /// Batch number
    #[arg(long)]
    pub lote: String,

    /// Expiry date
    #[arg(long, value_name = "DATE")]
    pub validade: Option<String>,

    /// Manufacturing date
    #[arg(long, value_name = "DATE")]
    pub fabricacao: Option<String>,

    #[arg(long)]
    pub observacoes: Option<String>,
}

#[derive(Debug, Args)]
pub struct StockExitArgs {
    /// Product ID
    #[arg(long)]
    pub produto: i64,

    #[arg(long)]
    pub quantidade: f64,

    #[arg(long)]
    pub motivo: String,

    #[arg(long)]
    pub observacoes: Option<String>,
}

#[derive(Debug, Args)]
pub struct StockAdjustArgs {
    /// Product ID
    #[arg(long)]
    pub produto: i64,

    /// Counted quantity
    #[arg(long)]
    pub quantidade_nova: f64,

    #[arg(long)]
    pub motivo: String,

    #[arg(long)]
    pub observacoes: Option<String>,
}

/// Stock ledger filters.
#[derive(Debug, Clone, Args)]
pub struct LedgerArgs {
    /// Restrict to one product
    #[arg(long)]
    pub produto: Option<i64>,

    /// Movement type (ENTRADA, SAIDA, AJUSTE)
    #[arg(long, short = 't')]
    pub tipo: Option<String>,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MEDICAMENTOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MedicamentosArgs {
    #[command(subcommand)]
    pub command: MedicamentosCommand,
}

#[derive(Debug, Subcommand)]
pub enum MedicamentosCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Search medicines with stock on hand
    Buscar {
        /// Name fragment
        termo: String,

        /// Max results (1-50)
        #[arg(long, short = 'l', default_value = "20")]
        limit: u32,
    },

    /// Record a stock entry (purchase)
    Entrada(EntradaArgs),

    /// Medicines below minimum stock or close to expiry
    EstoqueBaixo {
        /// Expiry window in days
        #[arg(long, default_value = "30")]
        dias: u32,
    },

    /// Give a medicine from stock; creates the health record
    Aplicar {
        /// Medicine ID
        #[arg(long)]
        medicamento: i64,

        /// Animal ID
        #[arg(long)]
        animal: i64,

        #[arg(long)]
        quantidade: f64,

        /// Responsible veterinarian
        #[arg(long)]
        veterinario: Option<String>,

        #[arg(long)]
        observacoes: Option<String>,
    },

    /// Stock ledger
    Movimentacoes {
        #[command(flatten)]
        ledger: LedgerArgs,

        /// Restrict to one animal
        #[arg(long)]
        animal: Option<i64>,
    },

    /// Medicines given to one animal
    Consumo {
        /// Animal ID
        animal_id: i64,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Days of stock left at the average consumption
    Previsao {
        /// Days of history analysed
        #[arg(long, default_value = "90")]
        dias: u32,
    },

    /// Entries, exits and balance per medicine over a period
    MovimentacaoPeriodo {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

#[derive(Debug, Args)]
pub struct EntradaArgs {
    /// Medicine ID
    #[arg(long)]
    pub medicamento: i64,

    #[arg(long)]
    pub quantidade: f64,

    /// Batch number
    #[arg(long)]
    pub lote: String,

    /// Expiry date
    #[arg(long, value_name = "DATE")]
    pub validade: String,

    /// Manufacturing date
    #[arg(long, value_name = "DATE")]
    pub fabricacao: Option<String>,

    /// Invoice number
    #[arg(long)]
    pub nota_fiscal: Option<String>,

    #[arg(long)]
    pub fornecedor: Option<String>,

    /// Unit price (R$)
    #[arg(long)]
    pub preco: Option<f64>,

    #[arg(long)]
    pub observacoes: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPRODUCAO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReproducaoArgs {
    #[command(subcommand)]
    pub command: ReproducaoCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReproducaoCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Covering success rates
    Estatisticas {
        /// Restrict to one year
        #[arg(long)]
        ano: Option<i32>,
    },

    /// Upcoming diagnoses and expected births
    Calendario {
        /// Look-ahead window in days
        #[arg(long, default_value = "60")]
        dias: u32,
    },

    /// Reproductive history of one mare
    HistoricoEgua {
        /// Mare ID
        id: i64,
    },

    /// Confirmed pregnancies in progress among the listed records
    Gestacoes(ListArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MANEJO / APLICACOES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ManejoArgs {
    #[command(subcommand)]
    pub command: ManejoCommand,
}

#[derive(Debug, Subcommand)]
pub enum ManejoCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Active products low on or out of stock among the listed page
    EstoqueBaixo(ListArgs),

    /// Record a stock entry (purchase)
    Entrada(StockEntryArgs),

    /// Record a stock exit
    Saida {
        #[command(flatten)]
        saida: StockExitArgs,

        /// Paddock the product went to
        #[arg(long)]
        terreno: Option<i64>,
    },

    /// Set the stock to a counted quantity
    Ajuste(StockAdjustArgs),

    /// Stock ledger
    Movimentacoes(LedgerArgs),

    /// Products low on stock or close to expiry, from the backend
    Alertas,

    /// Entries, exits and value per product
    Resumo {
        /// Product type (FERTILIZANTE, CORRETIVO, ...)
        #[arg(long, short = 't')]
        tipo: Option<String>,
    },

    /// Soil analyses and their lab reports
    Analises(AnalisesArgs),

    /// Inputs applied per paddock
    Consumo {
        /// Restrict to one paddock
        #[arg(long)]
        terreno: Option<i64>,

        /// Product type
        #[arg(long, short = 't')]
        tipo: Option<String>,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Days of stock left at the average monthly consumption
    Previsao {
        /// Product type
        #[arg(long, short = 't')]
        tipo: Option<String>,
    },

    /// Paddocks whose withdrawal period ends soon
    Liberacao {
        /// Look-ahead window in days (1-365)
        #[arg(long, default_value = "30")]
        dias: u32,
    },
}

#[derive(Debug, Args)]
pub struct AnalisesArgs {
    #[command(subcommand)]
    pub command: AnalisesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AnalisesCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Attach a lab report (PDF, JPEG or PNG)
    Upload {
        /// Analysis ID
        id: i64,

        /// Report file
        path: PathBuf,
    },

    /// Save the lab report
    Download {
        /// Analysis ID
        id: i64,

        /// Destination (defaults to the server's file name)
        #[arg(long, value_name = "PATH")]
        destino: Option<PathBuf>,
    },

    /// Metadata of the attached report
    Info {
        /// Analysis ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct AplicacoesArgs {
    #[command(subcommand)]
    pub command: AplicacoesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AplicacoesCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Count, total cost and paddocks covered over the listed page
    Resumo(ListArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MOVIMENTACOES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MovimentacoesArgs {
    #[command(subcommand)]
    pub command: MovimentacoesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MovimentacoesCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Where each animal is now
    Localizacoes {
        /// Only this animal
        #[arg(long)]
        animal: Option<i64>,

        /// Only movements from or to this paddock
        #[arg(long)]
        terreno: Option<i64>,
    },

    /// Movement history of one animal
    Historico {
        /// Animal ID
        animal_id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (url, email, password_env, ca_cert, insecure, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name [default: active profile]
        name: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
