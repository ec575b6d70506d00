// ── Display labels and colors ──
//
// pt-BR labels and design-system color names for every backend enum,
// plus the select options built from them. Codes that are not modelled as
// enums (alert priorities, application status) get free functions taking
// the raw string.

use haras_api::models::{
    CategoriaNutricional, FormaFarmaceutica, IntensidadeTrabalho, MembroTratado,
    ResultadoDiagnostico, Sexo, StatusAnimal, StatusCasco, StatusEstoque, StatusPlano,
    StatusReproducao, StatusTerreno, TipoAlimento, TipoCobertura, TipoFerradura,
    TipoFerrageamento, TipoManejo, TipoMovimentacao, TipoMovimentacaoEstoque, TipoProdutoManejo,
    TipoRegistro,
};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::store::SelectOption;

const DEFAULT_COLOR: &str = "grey";

/// A backend code with a human label.
pub trait Labeled {
    fn label(&self) -> &'static str;

    fn color(&self) -> &'static str {
        DEFAULT_COLOR
    }
}

/// Every variant of `E` as a select option, in declaration order.
pub fn options<E>() -> Vec<SelectOption>
where
    E: Labeled + IntoEnumIterator + AsRef<str>,
{
    E::iter()
        .map(|e| SelectOption::new(Value::String(e.as_ref().to_owned()), e.label()))
        .collect()
}

impl Labeled for Sexo {
    fn label(&self) -> &'static str {
        match self {
            Self::M => "Macho",
            Self::F => "Fêmea",
        }
    }
}

impl Labeled for StatusAnimal {
    fn label(&self) -> &'static str {
        match self {
            Self::Ativo => "Ativo",
            Self::Vendido => "Vendido",
            Self::Morto => "Morto",
            Self::Emprestado => "Emprestado",
            Self::Aposentado => "Aposentado",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Ativo => "positive",
            Self::Vendido => "info",
            Self::Morto => "negative",
            Self::Emprestado => "warning",
            Self::Aposentado => DEFAULT_COLOR,
        }
    }
}

impl Labeled for StatusTerreno {
    fn label(&self) -> &'static str {
        match self {
            Self::Disponivel => "Disponível",
            Self::Ocupado => "Ocupado",
            Self::Manutencao => "Manutenção",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Disponivel => "positive",
            Self::Ocupado => "warning",
            Self::Manutencao => "negative",
        }
    }
}

impl Labeled for TipoRegistro {
    fn label(&self) -> &'static str {
        match self {
            Self::Vacina => "Vacina",
            Self::Vermifugo => "Vermífugo",
            Self::Medicamento => "Medicamento",
            Self::Exame => "Exame",
            Self::Consulta => "Consulta",
            Self::Cirurgia => "Cirurgia",
            Self::Tratamento => "Tratamento",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Vacina => "green",
            Self::Vermifugo => "blue",
            Self::Medicamento => "purple",
            Self::Exame => "orange",
            Self::Consulta => "teal",
            Self::Cirurgia => "red",
            Self::Tratamento => "indigo",
        }
    }
}

impl Labeled for TipoFerrageamento {
    fn label(&self) -> &'static str {
        match self {
            Self::Ferrageamento => "Ferrageamento",
            Self::Casqueamento => "Casqueamento",
            Self::FerrageamentoCorretivo => "Ferrageamento Corretivo",
            Self::CasqueamentoTerapeutico => "Casqueamento Terapêutico",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Ferrageamento => "blue",
            Self::Casqueamento => "green",
            Self::FerrageamentoCorretivo => "orange",
            Self::CasqueamentoTerapeutico => "red",
        }
    }
}

impl Labeled for TipoFerradura {
    fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Corretiva => "Corretiva",
            Self::Terapeutica => "Terapêutica",
            Self::Especial => "Especial",
        }
    }
}

impl Labeled for MembroTratado {
    fn label(&self) -> &'static str {
        match self {
            Self::Ad => "Anterior Direito",
            Self::Ae => "Anterior Esquerdo",
            Self::Pd => "Posterior Direito",
            Self::Pe => "Posterior Esquerdo",
            Self::Todos => "Todos os membros",
        }
    }
}

impl Labeled for StatusCasco {
    fn label(&self) -> &'static str {
        match self {
            Self::Bom => "Bom",
            Self::Regular => "Regular",
            Self::Ruim => "Ruim",
            Self::Problema => "Problema",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Bom => "green",
            Self::Regular => "orange",
            Self::Ruim => "red",
            Self::Problema => "red-10",
        }
    }
}

impl Labeled for FormaFarmaceutica {
    fn label(&self) -> &'static str {
        match self {
            Self::Injetavel => "Injetável",
            Self::Oral => "Oral",
            Self::Topico => "Tópico",
        }
    }
}

impl Labeled for TipoMovimentacaoEstoque {
    fn label(&self) -> &'static str {
        match self {
            Self::Entrada => "Entrada",
            Self::Saida => "Saída",
            Self::Ajuste => "Ajuste",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Entrada => "positive",
            Self::Saida => "negative",
            Self::Ajuste => "info",
        }
    }
}

impl Labeled for StatusEstoque {
    fn label(&self) -> &'static str {
        match self {
            Self::Ok => "Normal",
            Self::EstoqueBaixo => "Estoque Baixo",
            Self::SemEstoque => "Sem Estoque",
            Self::Vencendo => "Vencendo",
            Self::VencimentoProximo => "Vencimento Próximo",
            Self::Vencido => "Vencido",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Ok => "positive",
            Self::EstoqueBaixo => "warning",
            Self::SemEstoque | Self::Vencido => "negative",
            Self::Vencendo => "orange",
            Self::VencimentoProximo => "purple",
        }
    }
}

impl Labeled for TipoCobertura {
    fn label(&self) -> &'static str {
        match self {
            Self::Natural => "Natural",
            Self::Ia => "Inseminação Artificial",
            Self::Te => "Transferência de Embrião",
        }
    }
}

impl Labeled for ResultadoDiagnostico {
    fn label(&self) -> &'static str {
        match self {
            Self::Positivo => "Positivo",
            Self::Negativo => "Negativo",
            Self::Pendente => "Pendente",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Positivo => "positive",
            Self::Negativo => "negative",
            Self::Pendente => "warning",
        }
    }
}

impl Labeled for StatusReproducao {
    fn label(&self) -> &'static str {
        match self {
            Self::Ativo => "Ativo",
            Self::Concluido => "Concluído",
            Self::Falhado => "Falhado",
        }
    }
}

impl Labeled for TipoMovimentacao {
    fn label(&self) -> &'static str {
        match self {
            Self::Transferencia => "Transferência",
            Self::Entrada => "Entrada",
            Self::Saida => "Saída",
            Self::Venda => "Venda",
            Self::Emprestimo => "Empréstimo",
            Self::Retorno => "Retorno",
        }
    }
}

impl Labeled for TipoProdutoManejo {
    fn label(&self) -> &'static str {
        match self {
            Self::Fertilizante => "Fertilizante",
            Self::Defensivo => "Defensivo",
            Self::Corretivo => "Corretivo",
            Self::Semente => "Semente",
        }
    }
}

impl Labeled for TipoManejo {
    fn label(&self) -> &'static str {
        match self {
            Self::Adubacao => "Adubação",
            Self::Calagem => "Calagem",
            Self::Plantio => "Plantio",
            Self::AplicacaoDefensivo => "Aplicação Defensivo",
            Self::Gessagem => "Gessagem",
            Self::Sulcagem => "Sulcagem",
        }
    }
}

impl Labeled for TipoAlimento {
    fn label(&self) -> &'static str {
        match self {
            Self::Concentrado => "Concentrado",
            Self::Volumoso => "Volumoso",
            Self::Suplemento => "Suplemento",
            Self::Premix => "Premix",
            Self::SalMineral => "Sal Mineral",
        }
    }
}

impl Labeled for CategoriaNutricional {
    fn label(&self) -> &'static str {
        match self {
            Self::Potro => "Potro",
            Self::Jovem => "Jovem",
            Self::AdultoManutencao => "Adulto - Manutenção",
            Self::AdultoTrabalhoLeve => "Adulto - Trabalho Leve",
            Self::AdultoTrabalhoModerado => "Adulto - Trabalho Moderado",
            Self::AdultoTrabalhoIntenso => "Adulto - Trabalho Intenso",
            Self::EguaGestante => "Égua Gestante",
            Self::EguaLactante => "Égua Lactante",
            Self::Reprodutor => "Reprodutor",
            Self::Idoso => "Idoso",
        }
    }
}

impl Labeled for IntensidadeTrabalho {
    fn label(&self) -> &'static str {
        match self {
            Self::Repouso => "Repouso",
            Self::Leve => "Leve",
            Self::Moderado => "Moderado",
            Self::Intenso => "Intenso",
        }
    }
}

impl Labeled for StatusPlano {
    fn label(&self) -> &'static str {
        match self {
            Self::Ativo => "Ativo",
            Self::Inativo => "Inativo",
            Self::Suspenso => "Suspenso",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Ativo => "green",
            Self::Inativo => DEFAULT_COLOR,
            Self::Suspenso => "orange",
        }
    }
}

// ── Free-text codes ─────────────────────────────────────────────────

/// Purchase recommendation of the consumption forecasts.
pub fn recomendacao_label(recomendacao: &str) -> &str {
    match recomendacao {
        "COMPRAR_URGENTE" => "Comprar Urgente",
        "COMPRAR_BREVE" => "Comprar em Breve",
        "OK" => "Estoque OK",
        "SEM_CONSUMO" => "Sem Consumo",
        other => other,
    }
}

pub fn recomendacao_color(recomendacao: &str) -> &'static str {
    match recomendacao {
        "COMPRAR_URGENTE" => "negative",
        "COMPRAR_BREVE" => "warning",
        "OK" => "positive",
        _ => DEFAULT_COLOR,
    }
}

/// Due status of a farriery evaluation.
pub fn vencimento_label(status: &str) -> &str {
    match status {
        "VENCIDO" => "Vencido",
        "VENCE_SEMANA" => "Vence em 7 dias",
        "VENCE_QUINZENA" => "Vence em 15 dias",
        "EM_DIA" => "Em dia",
        "SEM_AGENDAMENTO" => "Sem agendamento",
        other => other,
    }
}

pub fn vencimento_color(status: &str) -> &'static str {
    match status {
        "VENCIDO" => "negative",
        "VENCE_SEMANA" => "warning",
        "VENCE_QUINZENA" => "orange",
        "EM_DIA" => "positive",
        _ => DEFAULT_COLOR,
    }
}

/// `status_aplicacao` of a health record.
pub fn status_aplicacao_color(status: &str) -> &'static str {
    match status {
        "APLICADO" => "green",
        "PENDENTE" => "orange",
        "ATRASADO" => "red",
        _ => DEFAULT_COLOR,
    }
}

/// Health-alert priority.
pub fn prioridade_color(prioridade: &str) -> &'static str {
    match prioridade {
        "ALTA" => "negative",
        "MEDIA" => "warning",
        "BAIXA" => "info",
        _ => DEFAULT_COLOR,
    }
}

/// Dashboard stock-alert status.
pub fn alerta_estoque_color(status: &str) -> &'static str {
    match status {
        "CRITICO" => "negative",
        "BAIXO" => "warning",
        "VENCENDO" => "orange",
        "OK" => "positive",
        _ => DEFAULT_COLOR,
    }
}

pub fn tipo_estoque_label(tipo: &str) -> &str {
    match tipo {
        "MEDICAMENTO" => "Medicamento",
        "RACAO" => "Ração",
        "MANEJO" => "Manejo",
        other => other,
    }
}

/// Brazilian real, `R$ 1.234,56`. Negative values keep their sign.
#[allow(clippy::float_cmp)]
pub fn format_currency(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "R$ 0,00".into();
    }

    #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (value.abs() * 100.0).round() as u64;
    let (units, cents) = (cents / 100, cents % 100);

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_labels_and_colors() {
        assert_eq!(Sexo::F.label(), "Fêmea");
        assert_eq!(TipoRegistro::Vermifugo.label(), "Vermífugo");
        assert_eq!(TipoRegistro::Consulta.color(), "teal");
        assert_eq!(StatusCasco::Problema.color(), "red-10");
        assert_eq!(TipoCobertura::Ia.label(), "Inseminação Artificial");
        assert_eq!(MembroTratado::Todos.label(), "Todos os membros");
        assert_eq!(TipoFerradura::Especial.color(), "grey");
        assert_eq!(CategoriaNutricional::EguaLactante.label(), "Égua Lactante");
        assert_eq!(StatusPlano::Suspenso.color(), "orange");
    }

    #[test]
    fn options_use_wire_codes() {
        let opts = options::<StatusReproducao>();
        assert_eq!(opts.len(), 3);
        assert_eq!(opts[0].value, Value::String("A".into()));
        assert_eq!(opts[1].label, "Concluído");

        let opts = options::<TipoAlimento>();
        assert_eq!(opts[4].value, Value::String("SAL_MINERAL".into()));
        assert_eq!(opts[4].label, "Sal Mineral");
    }

    #[test]
    fn free_text_codes() {
        assert_eq!(status_aplicacao_color("ATRASADO"), "red");
        assert_eq!(prioridade_color("ALTA"), "negative");
        assert_eq!(alerta_estoque_color("???"), "grey");
        assert_eq!(tipo_estoque_label("RACAO"), "Ração");
        assert_eq!(tipo_estoque_label("OUTRO"), "OUTRO");
        assert_eq!(recomendacao_label("COMPRAR_BREVE"), "Comprar em Breve");
        assert_eq!(recomendacao_color("SEM_CONSUMO"), "grey");
        assert_eq!(vencimento_label("VENCE_SEMANA"), "Vence em 7 dias");
        assert_eq!(vencimento_color("VENCIDO"), "negative");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(12.5), "R$ 12,50");
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency(-45.9), "-R$ 45,90");
    }
}
