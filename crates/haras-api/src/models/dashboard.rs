use serde::{Deserialize, Serialize};

/// Headline counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardKpis {
    pub total_animais: u64,
    pub total_terrenos: u64,
    pub animais_tratamento: u64,
    pub alertas_estoque: u64,
    pub proximas_aplicacoes: u64,
    pub gestacoes_ativas: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertaSaude {
    pub animal_id: i64,
    pub animal_nome: String,
    pub tipo_alerta: String,
    pub descricao: String,
    pub dias_atraso: i64,
    /// `ALTA`, `MEDIA` or `BAIXA`.
    pub prioridade: String,
    pub data_vencimento: Option<String>,
}

impl AlertaSaude {
    pub fn is_critical(&self) -> bool {
        self.prioridade == "ALTA"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertaEstoque {
    pub produto_id: i64,
    pub produto_nome: String,
    /// `MEDICAMENTO`, `RACAO` or `MANEJO`.
    pub tipo_produto: String,
    pub estoque_atual: f64,
    pub estoque_minimo: f64,
    pub unidade_medida: String,
    /// `CRITICO`, `BAIXO` or `VENCENDO`.
    pub status: String,
    pub dias_vencimento: Option<i64>,
}

impl AlertaEstoque {
    pub fn is_critical(&self) -> bool {
        self.status == "CRITICO"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustoProprietario {
    pub proprietario: String,
    pub total_medicamentos: f64,
    pub total_racao: f64,
    pub total_manejo: f64,
    pub total_geral: f64,
    pub numero_animais: u64,
    pub custo_por_animal: f64,
    pub periodo: String,
}

/// Aggregate served by `GET /api/dashboard/`.
///
/// Chart payloads are passed through untyped; they are rendering hints,
/// not data this client computes with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    pub kpis: DashboardKpis,
    pub alertas_saude: Vec<AlertaSaude>,
    pub alertas_estoque: Vec<AlertaEstoque>,
    pub custos_proprietarios: Vec<CustoProprietario>,
    pub grafico_custos_mensal: serde_json::Value,
    pub grafico_distribuicao_animais: serde_json::Value,
    pub ultimo_update: Option<String>,
}

/// Per-animal cost/health report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatorioAnimal {
    pub animal_id: i64,
    pub animal_nome: String,
    #[serde(default)]
    pub raca: String,
    #[serde(default)]
    pub proprietario: String,
    pub data_nascimento: Option<String>,
    pub idade_anos: Option<i64>,
    pub ultima_vacina: Option<String>,
    pub ultimo_vermifugo: Option<String>,
    #[serde(default)]
    pub tratamentos_ativos: u64,
    #[serde(default)]
    pub custo_medicamentos: f64,
    #[serde(default)]
    pub custo_racao: f64,
    #[serde(default)]
    pub custo_total: f64,
    pub status_reproducao: Option<String>,
    pub data_ultima_cobertura: Option<String>,
}

/// Per-paddock occupation/management report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatorioTerreno {
    pub terreno_id: i64,
    pub terreno_nome: String,
    pub area_hectares: f64,
    #[serde(default)]
    pub tipo_uso: String,
    #[serde(default)]
    pub animais_atuais: u64,
    pub capacidade_maxima: Option<i64>,
    pub taxa_ocupacao: Option<f64>,
    pub ultima_aplicacao: Option<String>,
    #[serde(default)]
    pub produtos_aplicados: u64,
    #[serde(default)]
    pub custo_manejo: f64,
    pub ultima_analise: Option<String>,
    pub ph_medio: Option<f64>,
}
