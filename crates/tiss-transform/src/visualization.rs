use std::collections::BTreeMap;

use tiss_model::{FinanceiroVisualization, Guia, LineItem, LoteData, ProcessedData};
use tracing::debug;

use crate::aggregate::{accumulate_totais, build_guia};
use crate::classify::classify_items;
use crate::header::{build_cabecalho, build_lote_info, empty_totais};
use crate::roster::build_roster;

/// Reshape a flat batch into the per-claim financial view.
///
/// Pure and total: inputs are only read, and missing or malformed values
/// become `"N/A"`, `0`, `"pendente"` or null instead of errors.
pub fn build_financeiro_visualization(
    lote_data: &LoteData,
    all_items: &[LineItem],
) -> FinanceiroVisualization {
    let claims = classify_items(all_items);
    let guias: Vec<Guia> = claims
        .iter()
        .map(|claim| build_guia(claim, lote_data))
        .collect();

    let cabecalho = build_cabecalho(lote_data);
    let lote = build_lote_info(lote_data);
    let mut totais = empty_totais(&lote);
    accumulate_totais(&mut totais, &guias);
    let profissionais = build_roster(&claims, &guias);
    let guias_map = guias_by_numero(&guias);

    debug!(
        item_count = all_items.len(),
        guia_count = guias.len(),
        profissional_count = profissionais.len(),
        "financial visualization built"
    );

    FinanceiroVisualization {
        processed_data: ProcessedData {
            cabecalho,
            lote,
            guias,
            totais,
            profissionais,
        },
        guias_map,
    }
}

/// Claim lookup by provider claim number. A later claim with the same number
/// replaces the earlier one. Iteration and serialization follow key order.
pub fn guias_by_numero(guias: &[Guia]) -> BTreeMap<String, Guia> {
    let mut map = BTreeMap::new();
    for guia in guias {
        map.insert(guia.numero_guia_prestador.clone(), guia.clone());
    }
    map
}
