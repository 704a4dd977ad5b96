//! Tests for batch inspection.

use serde_json::{Value, json};
use tiss_model::{InspectionMode, IssueKind, LineItem, LoteData};
use tiss_transform::{build_financeiro_visualization, inspect_batch};

fn items(value: Value) -> Vec<LineItem> {
    serde_json::from_value(value).expect("deserialize items")
}

#[test]
fn clean_batch_has_no_issues() {
    let all_items = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1", "valor_total": 300},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "valor_total": 300}
    ]));
    let report = inspect_batch(&LoteData::default(), &all_items);
    assert!(report.is_empty(), "unexpected issues: {:?}", report.issues);
    assert!(!report.blocks(InspectionMode::Strict));
}

#[test]
fn reports_orphans_and_missing_parents() {
    let all_items = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "parent_id": 9, "tipo_item": "procedimento"},
        {"id": 3, "tipo_item": "despesa", "codigo_despesa": "02"}
    ]));
    let report = inspect_batch(&LoteData::default(), &all_items);
    assert_eq!(report.count_of(IssueKind::OrphanItem), 1);
    assert_eq!(report.count_of(IssueKind::MissingParent), 1);
    assert_eq!(report.issues[0].item_id.as_deref(), Some("2"));
    assert!(!report.has_errors());
    assert!(report.blocks(InspectionMode::Strict));
    assert!(!report.blocks(InspectionMode::Permissive));
}

#[test]
fn reports_duplicate_claim_numbers_once() {
    let all_items = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 3, "tipo_item": "guia", "numero_guia_prestador": "G1"}
    ]));
    let report = inspect_batch(&LoteData::default(), &all_items);
    assert_eq!(report.count_of(IssueKind::DuplicateGuia), 1);
    assert!(report.has_errors());
}

#[test]
fn reports_unclassified_expenses_and_unknown_types() {
    let all_items = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "parent_id": 1, "tipo_item": "despesa", "codigo_item": "8001"},
        {"id": 3, "parent_id": 1, "tipo_item": "anexo"},
        {"id": 4, "parent_id": 1}
    ]));
    let report = inspect_batch(&LoteData::default(), &all_items);
    assert_eq!(report.count_of(IssueKind::UnclassifiedExpense), 1);
    assert_eq!(report.count_of(IssueKind::UnknownItemType), 2);
    let unclassified = report
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::UnclassifiedExpense)
        .expect("unclassified issue");
    assert_eq!(unclassified.guia.as_deref(), Some("G1"));
}

#[test]
fn reports_total_mismatch() {
    let all_items = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1", "valor_total": 500},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "valor_total": 450}
    ]));
    let report = inspect_batch(&LoteData::default(), &all_items);
    assert_eq!(report.count_of(IssueKind::TotalMismatch), 1);
}

#[test]
fn inspection_does_not_change_the_view() {
    let all_items = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "parent_id": 9, "tipo_item": "procedimento"}
    ]));
    let before = build_financeiro_visualization(&LoteData::default(), &all_items);
    let _ = inspect_batch(&LoteData::default(), &all_items);
    let after = build_financeiro_visualization(&LoteData::default(), &all_items);
    assert_eq!(before, after);
}
