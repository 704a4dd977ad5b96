//! Batch inspection.
//!
//! Reports the conditions the transformer tolerates silently: orphan items,
//! unclassified expenses, duplicate claim numbers and so on. The report is
//! informational; the transformation output does not depend on it.

use std::collections::{HashMap, HashSet};

use tiss_model::{
    InspectionIssue, InspectionReport, IssueKind, ItemKind, LineItem, LoteData, RecordKey, Scalar,
};
use tracing::{debug, warn};

use crate::aggregate::build_guia;
use crate::classify::{classify_items, is_child_kind};
use crate::resolve::text_or_na;

/// Tolerance for comparing claim subtotals against the stored grand total.
pub const TOTAL_TOLERANCE: f64 = 0.01;

pub fn inspect_batch(lote_data: &LoteData, all_items: &[LineItem]) -> InspectionReport {
    let mut issues = Vec::new();

    let claim_keys: HashSet<RecordKey> = all_items
        .iter()
        .filter(|item| item.is_guia())
        .filter_map(|item| item.id.as_ref().and_then(Scalar::record_key))
        .collect();

    for item in all_items {
        match item.kind() {
            ItemKind::Guia => {}
            ItemKind::Other | ItemKind::Missing => {
                let tipo = item
                    .tipo_item
                    .as_ref()
                    .map_or_else(|| "<none>".to_string(), Scalar::to_text);
                issues.push(
                    InspectionIssue::new(
                        IssueKind::UnknownItemType,
                        format!("item {} has unknown tipo_item {tipo}", item.id_text()),
                    )
                    .with_item(item.id_text()),
                );
            }
            ItemKind::Procedimento | ItemKind::Despesa => {
                match item.parent_id.as_ref().and_then(Scalar::record_key) {
                    None => issues.push(
                        InspectionIssue::new(
                            IssueKind::MissingParent,
                            format!("item {} has no parent_id", item.id_text()),
                        )
                        .with_item(item.id_text()),
                    ),
                    Some(key) if !claim_keys.contains(&key) => issues.push(
                        InspectionIssue::new(
                            IssueKind::OrphanItem,
                            format!(
                                "item {} references missing guia {}",
                                item.id_text(),
                                item.parent_id.as_ref().map_or_else(String::new, Scalar::to_text)
                            ),
                        )
                        .with_item(item.id_text()),
                    ),
                    Some(_) => {}
                }
            }
        }
    }

    let mut numero_counts: HashMap<String, usize> = HashMap::new();
    let claims = classify_items(all_items);
    for claim in &claims {
        let numero = text_or_na(claim.guia.numero_guia_prestador.as_ref());
        let seen = numero_counts.entry(numero.clone()).or_default();
        *seen += 1;
        if *seen == 2 {
            issues.push(
                InspectionIssue::new(
                    IssueKind::DuplicateGuia,
                    format!("numero_guia_prestador {numero} is used by more than one guia"),
                )
                .with_guia(numero.clone()),
            );
        }

        for item in &claim.unclassified {
            let codigo = item
                .codigo_item
                .as_ref()
                .map_or_else(|| "<none>".to_string(), Scalar::to_text);
            issues.push(
                InspectionIssue::new(
                    IssueKind::UnclassifiedExpense,
                    format!(
                        "expense {} (codigo_item {codigo}) matches no category",
                        item.id_text()
                    ),
                )
                .with_item(item.id_text())
                .with_guia(numero.clone()),
            );
        }

        let guia = build_guia(claim, lote_data);
        let subtotal = guia.valor_total.subtotal_sum();
        let stored = guia.valor_total.valor_total_geral;
        if (subtotal - stored).abs() > TOTAL_TOLERANCE {
            issues.push(
                InspectionIssue::new(
                    IssueKind::TotalMismatch,
                    format!(
                        "guia {numero} subtotals sum to {subtotal:.2} but valor_total is {stored:.2}"
                    ),
                )
                .with_guia(numero),
            );
        }
    }

    for issue in &issues {
        warn!(code = issue.kind.code(), "{}", issue.message);
    }
    debug!(
        item_count = all_items.len(),
        child_count = all_items.iter().filter(|item| is_child_kind(item)).count(),
        issue_count = issues.len(),
        "batch inspected"
    );

    InspectionReport { issues }
}
