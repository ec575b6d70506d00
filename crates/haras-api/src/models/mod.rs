// ── Wire records for the farm API ──
//
// Field names on the wire are the backend's upper-case column names;
// server-computed fields (`animal_nome`, `dias_gestacao`, ...) are
// lower-case. Dates arrive as strings in whatever format each endpoint
// serializes them and are left as such; `haras-core::dates` normalizes them.

pub mod animal;
pub mod crescimento;
pub mod dashboard;
pub mod estoque;
pub mod ferrageamento;
pub mod manejo;
pub mod medicamento;
pub mod movimentacao;
pub mod racao;
pub mod reproducao;
pub mod saude;
pub mod terreno;
pub mod user;

pub use animal::{Animal, Genealogia, ParentOption, PhotoUpload, Sexo, StatusAnimal};
pub use crescimento::Crescimento;
pub use dashboard::{
    AlertaEstoque, AlertaSaude, CustoProprietario, Dashboard, DashboardKpis, RelatorioAnimal,
    RelatorioTerreno,
};
pub use estoque::{
    AjusteEstoque, AlertaEstoqueProduto, EntradaProduto, MovimentacaoProduto, SaidaProduto,
};
pub use ferrageamento::{
    AlertaVencimentoFerrageamento, EstatisticaFerrageamentoAnimal, EstatisticasFerrageamento,
    FerradorEstatisticas, FerradorOption, Ferrageamento, FerrageamentoRapido, MembroTratado,
    RelatorioFerrageamento, StatusCasco, TipoFerradura, TipoFerrageamento,
};
pub use manejo::{
    AnaliseSolo, AplicacaoManejo, ConsumoTerreno, LaudoUpload, LiberacaoTerreno,
    PrevisaoConsumoManejo, ProdutoManejo, ResumoEstoqueManejo, TipoManejo, TipoProdutoManejo,
};
pub use medicamento::{
    AplicacaoMedicamento, AplicacaoMedicamentoResult, ConsumoMedicamentoAnimal, EntradaEstoque,
    EntradaEstoqueResult, EstoqueBaixo, FormaFarmaceutica, Medicamento, MedicamentoOption,
    MovimentacaoMedicamento, MovimentacaoPeriodoMedicamento, PrevisaoConsumoMedicamento,
    StatusEstoque, TipoMovimentacaoEstoque,
};
pub use movimentacao::{HistoricoMovimentacao, LocalizacaoAtual, Movimentacao, TipoMovimentacao};
pub use racao::{
    CalculoNutricional, CategoriaNutricional, ConsumoAnimalRacao, FornecimentoRacao,
    IntensidadeTrabalho, ItemPlanoAlimentar, PlanoAlimentar, PrevisaoConsumoRacao, ProdutoRacao,
    ProdutoRacaoOption, StatusPlano, TipoAlimento,
};
pub use reproducao::{
    EstatisticasReproducao, EventoReproducao, HistoricoEgua, Reproducao, ResultadoDiagnostico,
    StatusReproducao, TipoCobertura,
};
pub use saude::{
    AplicacaoRapida, EstatisticasSaude, HistoricoSaude, ProximaAplicacao, Saude, TipoRegistro,
};
pub use terreno::{StatusTerreno, Terreno};
pub use user::{Perfil, User};

