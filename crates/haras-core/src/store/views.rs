// ── Derived views over loaded pages ──
//
// Computed from the rows currently in a store; nothing here issues a
// request. Counts therefore cover the loaded page, not the whole table.

use std::collections::HashSet;

use haras_api::models::{
    AplicacaoManejo, Animal, Movimentacao, ProdutoManejo, ProximaAplicacao, Reproducao,
    ResultadoDiagnostico, Saude, Sexo, StatusAnimal, StatusEstoque, StatusReproducao,
    StatusTerreno, Terreno,
};
use indexmap::IndexMap;
use serde::Serialize;

use super::resource_store::StoreState;

/// Status assumed for health records that do not report one.
pub const DEFAULT_STATUS_APLICACAO: &str = "APLICADO";

// ── Animals ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnimalStats {
    pub total: usize,
    pub ativos: usize,
    pub machos: usize,
    pub femeas: usize,
    pub vendidos: usize,
    pub emprestados: usize,
    pub mortos: usize,
}

impl StoreState<Animal> {
    pub fn ativos(&self) -> Vec<&Animal> {
        self.items.iter().filter(|a| a.is_active()).collect()
    }

    /// Active stallions.
    pub fn machos(&self) -> Vec<&Animal> {
        self.active_by_sex(Sexo::M)
    }

    /// Active mares.
    pub fn femeas(&self) -> Vec<&Animal> {
        self.active_by_sex(Sexo::F)
    }

    fn active_by_sex(&self, sexo: Sexo) -> Vec<&Animal> {
        self.items
            .iter()
            .filter(|a| a.sexo == Some(sexo) && a.is_active())
            .collect()
    }

    /// Sex counts include inactive animals.
    pub fn estatisticas(&self) -> AnimalStats {
        let with_status =
            |status: StatusAnimal| self.items.iter().filter(|a| a.status_animal == status).count();
        let with_sex = |sexo: Sexo| self.items.iter().filter(|a| a.sexo == Some(sexo)).count();
        AnimalStats {
            total: self.items.len(),
            ativos: with_status(StatusAnimal::Ativo),
            machos: with_sex(Sexo::M),
            femeas: with_sex(Sexo::F),
            vendidos: with_status(StatusAnimal::Vendido),
            emprestados: with_status(StatusAnimal::Emprestado),
            mortos: with_status(StatusAnimal::Morto),
        }
    }
}

// ── Terrains ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TerrenoStats {
    pub total: usize,
    pub disponiveis: usize,
    pub ocupados: usize,
    pub manutencao: usize,
    /// Hectares, rounded to two decimals.
    pub area_total: f64,
}

impl StoreState<Terreno> {
    pub fn disponiveis(&self) -> Vec<&Terreno> {
        self.with_terreno_status(StatusTerreno::Disponivel).collect()
    }

    pub fn ocupados(&self) -> Vec<&Terreno> {
        self.with_terreno_status(StatusTerreno::Ocupado).collect()
    }

    fn with_terreno_status(&self, status: StatusTerreno) -> impl Iterator<Item = &Terreno> {
        self.items.iter().filter(move |t| t.status() == Some(status))
    }

    pub fn estatisticas(&self) -> TerrenoStats {
        let area: f64 = self.items.iter().filter_map(|t| t.area_hectares).sum();
        TerrenoStats {
            total: self.items.len(),
            disponiveis: self.with_terreno_status(StatusTerreno::Disponivel).count(),
            ocupados: self.with_terreno_status(StatusTerreno::Ocupado).count(),
            manutencao: self.with_terreno_status(StatusTerreno::Manutencao).count(),
            area_total: round2(area),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ── Health ──────────────────────────────────────────────────────────

impl StoreState<Saude> {
    /// Rows grouped by `status_aplicacao`, groups in first-seen order.
    pub fn por_status(&self) -> IndexMap<String, Vec<&Saude>> {
        let mut groups: IndexMap<String, Vec<&Saude>> = IndexMap::new();
        for registro in &self.items {
            let status = registro
                .status_aplicacao
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_STATUS_APLICACAO);
            groups.entry(status.to_owned()).or_default().push(registro);
        }
        groups
    }
}

/// Due applications split by urgency. Entries more than 30 days out are
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpcomingBuckets {
    /// Past due (negative days).
    pub atrasadas: Vec<ProximaAplicacao>,
    /// Due within a week, today included.
    pub urgentes: Vec<ProximaAplicacao>,
    /// Due in 8 to 30 days.
    pub proximas: Vec<ProximaAplicacao>,
}

impl UpcomingBuckets {
    pub fn split(aplicacoes: impl IntoIterator<Item = ProximaAplicacao>) -> Self {
        let mut buckets = Self::default();
        for a in aplicacoes {
            match a.dias_restantes {
                d if d < 0 => buckets.atrasadas.push(a),
                0..=7 => buckets.urgentes.push(a),
                8..=30 => buckets.proximas.push(a),
                _ => {}
            }
        }
        buckets
    }

    pub fn len(&self) -> usize {
        self.atrasadas.len() + self.urgentes.len() + self.proximas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Reproduction & movements ────────────────────────────────────────

impl StoreState<Reproducao> {
    pub fn por_egua(&self, egua_id: i64) -> Vec<&Reproducao> {
        self.items.iter().filter(|r| r.id_egua == egua_id).collect()
    }

    /// Confirmed pregnancies still in progress.
    pub fn gestacoes_ativas(&self) -> Vec<&Reproducao> {
        self.items
            .iter()
            .filter(|r| {
                r.status_reproducao == StatusReproducao::Ativo
                    && r.resultado_diagnostico == ResultadoDiagnostico::Positivo
            })
            .collect()
    }
}

impl StoreState<Movimentacao> {
    pub fn por_animal(&self, animal_id: i64) -> Vec<&Movimentacao> {
        self.items
            .iter()
            .filter(|m| m.id_animal == animal_id)
            .collect()
    }
}

// ── Field management ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ManejoStats {
    pub total_aplicacoes: usize,
    /// Summed `CUSTO_TOTAL`, rounded to two decimals.
    pub custo_total: f64,
    pub terrenos_manejados: usize,
}

impl StoreState<AplicacaoManejo> {
    pub fn estatisticas(&self) -> ManejoStats {
        let custo: f64 = self.items.iter().filter_map(|a| a.custo_total).sum();
        let terrenos: HashSet<i64> = self.items.iter().map(|a| a.id_terreno).collect();
        ManejoStats {
            total_aplicacoes: self.items.len(),
            custo_total: round2(custo),
            terrenos_manejados: terrenos.len(),
        }
    }
}

impl StoreState<ProdutoManejo> {
    /// Active products that are low on or out of stock.
    pub fn estoque_baixo(&self) -> Vec<&ProdutoManejo> {
        self.items
            .iter()
            .filter(|p| {
                p.ativo.as_deref() == Some("S")
                    && matches!(
                        p.status_estoque,
                        Some(StatusEstoque::EstoqueBaixo | StatusEstoque::SemEstoque)
                    )
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::filter::FilterSet;
    use crate::store::pagination::Pagination;
    use haras_api::Resource;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn state<T: Resource>(rows: serde_json::Value) -> StoreState<T> {
        StoreState {
            items: serde_json::from_value(rows).unwrap(),
            current: None,
            filters: FilterSet::new(),
            pagination: Pagination::for_spec(&T::SPEC),
            loading: false,
        }
    }

    #[test]
    fn animal_views() {
        let s: StoreState<Animal> = state(json!([
            {"ID": 1, "NOME": "Trovão", "SEXO": "M", "STATUS_ANIMAL": "ATIVO"},
            {"ID": 2, "NOME": "Estrela", "SEXO": "F", "STATUS_ANIMAL": "ATIVO"},
            {"ID": 3, "NOME": "Lua", "SEXO": "F", "STATUS_ANIMAL": "VENDIDO"},
            {"ID": 4, "NOME": "Sol", "SEXO": "M", "STATUS_ANIMAL": "MORTO"}
        ]));
        assert_eq!(s.machos().len(), 1);
        assert_eq!(s.femeas().iter().map(|a| a.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(
            s.estatisticas(),
            AnimalStats {
                total: 4,
                ativos: 2,
                machos: 2,
                femeas: 2,
                vendidos: 1,
                emprestados: 0,
                mortos: 1,
            }
        );
    }

    #[test]
    fn terreno_area_is_rounded() {
        let s: StoreState<Terreno> = state(json!([
            {"ID": 1, "NOME": "A", "AREA_HECTARES": 1.111, "STATUS_TERRENO": "DISPONIVEL"},
            {"ID": 2, "NOME": "B", "AREA_HECTARES": 2.226, "STATUS_TERRENO": "OCUPADO"},
            {"ID": 3, "NOME": "C", "STATUS_TERRENO": "MANUTENÇÃO"}
        ]));
        let stats = s.estatisticas();
        assert!((stats.area_total - 3.34).abs() < f64::EPSILON);
        assert_eq!(stats.manutencao, 1);
        assert_eq!(s.disponiveis().len(), 1);
        assert_eq!(s.ocupados()[0].id, 2);
    }

    #[test]
    fn saude_groups_default_to_applied() {
        let s: StoreState<Saude> = state(json!([
            {"ID": 1, "ID_ANIMAL": 1, "TIPO_REGISTRO": "VACINA"},
            {"ID": 2, "ID_ANIMAL": 1, "TIPO_REGISTRO": "EXAME", "status_aplicacao": "PENDENTE"},
            {"ID": 3, "ID_ANIMAL": 2, "TIPO_REGISTRO": "VACINA", "status_aplicacao": "APLICADO"}
        ]));
        let groups = s.por_status();
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["APLICADO", "PENDENTE"]);
        assert_eq!(groups["APLICADO"].len(), 2);
    }

    #[test]
    fn upcoming_buckets_by_days() {
        let rows: Vec<ProximaAplicacao> = serde_json::from_value(json!([
            {"animal_id": 1, "animal_nome": "a", "tipo_registro": "VACINA", "dias_restantes": -2},
            {"animal_id": 1, "animal_nome": "a", "tipo_registro": "VACINA", "dias_restantes": 0},
            {"animal_id": 1, "animal_nome": "a", "tipo_registro": "VACINA", "dias_restantes": 7},
            {"animal_id": 1, "animal_nome": "a", "tipo_registro": "VACINA", "dias_restantes": 8},
            {"animal_id": 1, "animal_nome": "a", "tipo_registro": "VACINA", "dias_restantes": 45}
        ]))
        .unwrap();
        let b = UpcomingBuckets::split(rows);
        assert_eq!(b.atrasadas.len(), 1);
        assert_eq!(b.urgentes.len(), 2);
        assert_eq!(b.proximas.len(), 1);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn manejo_stats() {
        let s: StoreState<AplicacaoManejo> = state(json!([
            {"ID": 1, "ID_TERRENO": 5, "ID_PRODUTO": 1, "TIPO_MANEJO": "ADUBACAO", "QUANTIDADE": 10.0, "CUSTO_TOTAL": 100.1},
            {"ID": 2, "ID_TERRENO": 5, "ID_PRODUTO": 2, "TIPO_MANEJO": "CALAGEM", "QUANTIDADE": 3.0},
            {"ID": 3, "ID_TERRENO": 9, "ID_PRODUTO": 2, "TIPO_MANEJO": "CALAGEM", "QUANTIDADE": 3.0, "CUSTO_TOTAL": 50.0}
        ]));
        let stats = s.estatisticas();
        assert_eq!(stats.total_aplicacoes, 3);
        assert_eq!(stats.terrenos_manejados, 2);
        assert!((stats.custo_total - 150.1).abs() < 1e-9);
    }

    #[test]
    fn lookups_by_animal() {
        let r: StoreState<Reproducao> = state(json!([
            {"ID": 1, "ID_EGUA": 2, "TIPO_COBERTURA": "NATURAL", "RESULTADO_DIAGNOSTICO": "POSITIVO", "STATUS_REPRODUCAO": "A"},
            {"ID": 2, "ID_EGUA": 3, "TIPO_COBERTURA": "IA", "STATUS_REPRODUCAO": "C"}
        ]));
        assert_eq!(r.por_egua(2).len(), 1);
        assert_eq!(r.gestacoes_ativas().len(), 1);

        let m: StoreState<Movimentacao> = state(json!([
            {"ID": 1, "ID_ANIMAL": 4, "TIPO_MOVIMENTACAO": "ENTRADA"},
            {"ID": 2, "ID_ANIMAL": 5, "TIPO_MOVIMENTACAO": "VENDA"}
        ]));
        assert_eq!(m.por_animal(5)[0].id, 2);
    }
}
