// ── Resource stores ──
//
// One generic store instantiated per backend resource, plus the dashboard
// store. The filter fields each resource starts with live here.

pub mod dashboard;
pub mod filter;
pub mod pagination;
pub mod resource_store;
pub mod views;

pub use dashboard::{CriticalAlert, DashboardState, DashboardStore, DashboardSummary};
pub use filter::{FilterSet, FilterValue, SelectOption};
pub use pagination::{FetchOverrides, Pagination, PaginationUpdate};
pub use resource_store::{ResourceStore, StoreState};
pub use views::{AnimalStats, ManejoStats, TerrenoStats, UpcomingBuckets};

/// Starting filters for a resource, by [`ResourceSpec::name`]: the
/// searchable fields (inactive), boolean flags (off) and fixed values.
///
/// [`ResourceSpec::name`]: haras_api::ResourceSpec
pub fn default_filters(resource: &str) -> FilterSet {
    const DATES: &[&str] = &["data_inicio", "data_fim"];

    let (fields, flags, fixed): (&[&str], &[&str], &[(&str, &str)]) = match resource {
        "animals" => (
            &["nome", "sexo", "status", "numero_registro", "chip"],
            &[],
            &[],
        ),
        "terrenos" => (&["nome", "status"], &[], &[]),
        "saude" => (&["animal_id", "tipo_registro", "veterinario"], &[], &[]),
        "crescimento" => (&["animal_id"], &[], &[]),
        "ferrageamento" => (
            &["animal_id", "tipo_ferrageamento", "ferrador"],
            &["apenas_vencidos"],
            &[],
        ),
        "medicamentos" => (
            &["nome", "forma_farmaceutica"],
            &["estoque_baixo"],
            &[("ativo", "S")],
        ),
        "reproducao" => (
            &["egua_id", "parceiro_id", "tipo_cobertura", "resultado", "status"],
            &[],
            &[],
        ),
        "manejo" => (&["nome", "tipo_produto"], &["estoque_baixo"], &[("ativo", "S")]),
        "aplicacoes" => (&["terreno_id", "tipo_manejo"], &[], &[]),
        "analises" => (&["terreno_id", "laboratorio"], &[], &[]),
        "racao" => (&["nome", "tipo_alimento"], &["estoque_baixo"], &[]),
        "movimentacoes" => (&["animal_id", "tipo_movimentacao", "terreno_id"], &[], &[]),
        _ => return FilterSet::new(),
    };

    let mut set: FilterSet = fields.iter().map(|f| (*f, FilterValue::Null)).collect();
    if !matches!(resource, "animals" | "terrenos" | "manejo" | "medicamentos") {
        for field in DATES {
            set.set(field, FilterValue::Null);
        }
    }
    for flag in flags {
        set.set(flag, false);
    }
    for (field, value) in fixed {
        set.set(field, *value);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_inactive_except_flags() {
        let f = default_filters("ferrageamento");
        assert_eq!(f.len(), 6);
        assert_eq!(
            f.to_query(),
            vec![("apenas_vencidos".to_owned(), "false".to_owned())]
        );
        assert_eq!(
            default_filters("medicamentos").to_query(),
            vec![
                ("estoque_baixo".to_owned(), "false".to_owned()),
                ("ativo".to_owned(), "S".to_owned()),
            ]
        );
        assert!(default_filters("animals").to_query().is_empty());
        assert_eq!(default_filters("analises").len(), 4);
        assert!(default_filters("desconhecido").is_empty());
    }
}
